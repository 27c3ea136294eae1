//! Shared runtime helpers: logging setup and data directory preparation.

pub mod env;
pub mod utils;
