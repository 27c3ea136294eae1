//! Whole-document persistence for the record store.
//!
//! Every collection lives in one document that is read completely on load
//! and rewritten completely on save. Backends only move bytes; encoding is
//! done here so every backend stores the same JSON.

pub mod json_file;
pub mod memory;

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::errors::ServiceError;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;

/// The five collections the record store owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Members,
    Providers,
    ServiceClaims,
    ServiceDirectory,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Users,
        Collection::Members,
        Collection::Providers,
        Collection::ServiceClaims,
        Collection::ServiceDirectory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Members => "members",
            Collection::Providers => "providers",
            Collection::ServiceClaims => "service_claims",
            Collection::ServiceDirectory => "service_directory",
        }
    }

    pub fn file_name(&self) -> String { format!("{}.json", self.name()) }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Reads and overwrites whole collection documents.
///
/// Implementations must not merge or append: `write` replaces the document.
pub trait DocumentBackend {
    /// Raw document bytes, `None` when the document does not exist yet.
    fn read(&self, collection: Collection) -> Result<Option<Vec<u8>>, ServiceError>;
    fn write(&mut self, collection: Collection, bytes: &[u8]) -> Result<(), ServiceError>;
}

/// Decode a collection document.
///
/// A missing document is an empty collection. An unparseable one is also
/// loaded as empty (its contents are lost on the next save) unless `strict`
/// is set, in which case it is reported.
pub fn load<T, B>(backend: &B, collection: Collection, strict: bool) -> Result<T, ServiceError>
where
    T: DeserializeOwned + Default,
    B: DocumentBackend + ?Sized,
{
    let Some(bytes) = backend.read(collection)? else {
        return Ok(T::default());
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(value),
        Err(e) if strict => Err(ServiceError::MalformedDocument { collection, reason: e.to_string() }),
        Err(e) => {
            warn!(%collection, error = %e, bytes = bytes.len(), "malformed document discarded; loading empty collection");
            Ok(T::default())
        }
    }
}

/// Encode a collection as 2-space indented JSON and overwrite its document.
pub fn save<T, B>(backend: &mut B, collection: Collection, value: &T) -> Result<(), ServiceError>
where
    T: Serialize + ?Sized,
    B: DocumentBackend + ?Sized,
{
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| ServiceError::Serialize { collection, reason: e.to_string() })?;
    backend.write(collection, &bytes)
}
