/// Partial update semantics for every patch type
pub mod patch_tests;

/// Document shape of each record type
pub mod serde_tests;
