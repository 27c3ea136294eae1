//! Record store for the ChocAn benefits cooperative.
//! - Five collections (users, members, providers, service claims, service directory),
//!   each persisted as one whole JSON document.
//! - Linear-scan lookups by business key; no indexes, no caching beyond residency.
//! - Field-format checks live in `models::validation` and are the caller's job.

pub mod errors;
pub mod ids;
pub mod record_store;
pub mod seed;
pub mod storage;

pub use errors::ServiceError;
pub use record_store::{RecordStore, StoreOptions};
pub use storage::{Collection, DocumentBackend, JsonFileBackend, MemoryBackend};
