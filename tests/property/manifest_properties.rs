//! Property-based tests for content grouping

use now_client::ignore::IgnoreRules;
use now_client::tree::build_manifest;
use now_client::tree::hasher::digest_bytes;
use proptest::prelude::*;
use std::collections::BTreeSet;
use tempfile::TempDir;

/// Identical bytes always land in one group with equal sizes
#[test]
fn test_identical_content_shares_group_property() {
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(32));

    runner
        .run(
            &(prop::collection::vec(any::<u8>(), 0..512), 1usize..6),
            |(content, copies)| {
                let temp = TempDir::new().unwrap();
                for i in 0..copies {
                    std::fs::write(temp.path().join(format!("copy{}.bin", i)), &content).unwrap();
                }

                let manifest = build_manifest(temp.path(), IgnoreRules::empty()).unwrap();
                prop_assert_eq!(manifest.len(), 1);

                let group = manifest.group(&digest_bytes(&content)).unwrap();
                prop_assert_eq!(group.names.len(), copies);
                prop_assert!(group.names.iter().all(|r| r.size == content.len() as u64));
                Ok(())
            },
        )
        .unwrap();
}

/// Distinct contents each get a singleton group
#[test]
fn test_unique_content_singleton_groups_property() {
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(32));

    runner
        .run(
            &prop::collection::btree_set(prop::collection::vec(any::<u8>(), 0..128), 1..8),
            |contents: BTreeSet<Vec<u8>>| {
                let temp = TempDir::new().unwrap();
                for (i, content) in contents.iter().enumerate() {
                    std::fs::write(temp.path().join(format!("file{}", i)), content).unwrap();
                }

                let manifest = build_manifest(temp.path(), IgnoreRules::empty()).unwrap();
                prop_assert_eq!(manifest.len(), contents.len());
                for group in manifest.groups() {
                    prop_assert_eq!(group.names.len(), 1);
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Digests are deterministic and 40 lowercase hex characters
#[test]
fn test_digest_shape_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&any::<Vec<u8>>(), |content| {
            let first = digest_bytes(&content);
            prop_assert_eq!(&first, &digest_bytes(&content));
            prop_assert_eq!(first.len(), 40);
            prop_assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
            Ok(())
        })
        .unwrap();
}
