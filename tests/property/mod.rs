//! Property-based tests for manifest guarantees

mod manifest_properties;
