//! End-to-end manifest scenarios over real directories

use super::test_utils::write_file;
use now_client::ignore::IgnoreRules;
use now_client::project::ProjectType;
use now_client::tree::build_manifest;
use std::collections::BTreeSet;
use tempfile::TempDir;

const HELLO_SHA: &str = "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d";
const WORLD_SHA: &str = "7c211433f02071597741e6ff5a8ea34789abbf43";

/// Two identical files share a group; `.git` content never appears
#[test]
fn test_duplicates_grouped_and_git_dir_ignored() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "a.txt", "hello");
    write_file(root, "b.txt", "hello");
    write_file(root, "c.txt", "world");
    write_file(root, ".git/config", "[core]");

    let manifest = build_manifest(root, IgnoreRules::defaults()).unwrap();

    assert_eq!(manifest.len(), 2);
    let hello = manifest.group(HELLO_SHA).unwrap();
    let names: Vec<&str> = hello.file_names().collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
    assert!(hello.names.iter().all(|r| r.size == 5));

    let world = manifest.group(WORLD_SHA).unwrap();
    assert_eq!(world.file_names().collect::<Vec<_>>(), vec!["c.txt"]);

    assert!(manifest
        .records()
        .iter()
        .all(|r| !r.file.starts_with(".git")));
}

/// Patterns from a project ignore file apply alongside the defaults
#[test]
fn test_ignore_file_patterns_applied() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, ".gitignore", "*.log\n");
    write_file(root, "app.js", "console.log('hi')");
    write_file(root, "debug.log", "trace");
    write_file(root, "logs/server.log", "trace");

    let rules = ProjectType::detect(root).load_rules(root).unwrap();
    let manifest = build_manifest(root, rules).unwrap();

    let files: Vec<&str> = manifest.records().iter().map(|r| r.file.as_str()).collect();
    assert_eq!(files, vec!["app.js"]);
}

/// A symlinked file uploads the target's bytes under the link's own name
#[cfg(unix)]
#[test]
fn test_symlinked_file_joins_target_group() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "real.txt", "hello");
    std::os::unix::fs::symlink(root.join("real.txt"), root.join("link.txt")).unwrap();

    let manifest = build_manifest(root, IgnoreRules::defaults()).unwrap();

    assert_eq!(manifest.len(), 1);
    let group = manifest.group(HELLO_SHA).unwrap();
    assert_eq!(
        group.file_names().collect::<Vec<_>>(),
        vec!["link.txt", "real.txt"]
    );
    assert!(group
        .names
        .iter()
        .all(|r| r.size == 5 && r.mode & 0o170000 == 0o100000));
}

/// Rebuilding an unchanged directory yields the same digests and name sets
#[test]
fn test_manifest_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "index.html", "<h1>hi</h1>");
    write_file(root, "assets/app.css", "body {}");
    write_file(root, "assets/copy.css", "body {}");
    write_file(root, "empty.txt", "");

    let first = build_manifest(root, IgnoreRules::defaults()).unwrap();
    let second = build_manifest(root, IgnoreRules::defaults()).unwrap();

    let digests = |m: &now_client::Manifest| m.digests().map(String::from).collect::<Vec<_>>();
    assert_eq!(digests(&first), digests(&second));
    for group in first.groups() {
        let other = second.group(&group.sha).unwrap();
        let a: BTreeSet<&str> = group.file_names().collect();
        let b: BTreeSet<&str> = other.file_names().collect();
        assert_eq!(a, b);
    }
    assert_eq!(first.records(), second.records());
}

#[test]
fn test_empty_file_has_known_digest() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "empty", "");

    let manifest = build_manifest(temp.path(), IgnoreRules::empty()).unwrap();
    let group = manifest
        .group("da39a3ee5e6b4b0d3255bfef95601890afd80709")
        .unwrap();
    assert_eq!(group.size(), 0);
}

#[test]
fn test_every_mode_has_regular_file_bit() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a", "1");
    write_file(temp.path(), "nested/b", "2");

    let manifest = build_manifest(temp.path(), IgnoreRules::empty()).unwrap();
    assert!(manifest.records().iter().all(|r| r.mode & 0o100000 != 0));
}

#[test]
fn test_empty_directory_gives_empty_manifest() {
    let temp = TempDir::new().unwrap();
    let manifest = build_manifest(temp.path(), IgnoreRules::defaults()).unwrap();
    assert!(manifest.is_empty());
    assert_eq!(manifest.total_size(), 0);
}

#[test]
fn test_missing_root_is_an_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("does-not-exist");
    assert!(build_manifest(&missing, IgnoreRules::defaults()).is_err());
}

#[test]
fn test_docker_project_uses_dockerignore() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "Dockerfile", "FROM scratch");
    write_file(root, ".dockerignore", "secrets\n");
    write_file(root, "secrets/key.pem", "xxx");
    write_file(root, "main.go", "package main");

    let project_type = ProjectType::detect(root);
    assert_eq!(project_type, ProjectType::Docker);

    let manifest = build_manifest(root, project_type.load_rules(root).unwrap()).unwrap();
    let files: Vec<&str> = manifest.records().iter().map(|r| r.file.as_str()).collect();
    assert!(files.contains(&"Dockerfile"));
    assert!(files.contains(&"main.go"));
    assert!(!files.iter().any(|f| f.starts_with("secrets")));
}
