use std::collections::{HashMap, HashSet};

use super::{Collection, DocumentBackend};
use crate::errors::ServiceError;

/// Keeps documents in memory. Writes to collections marked with
/// [`MemoryBackend::fail_writes`] return an I/O error and leave the stored bytes untouched.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    documents: HashMap<Collection, Vec<u8>>,
    failing: HashSet<Collection>,
}

impl MemoryBackend {
    pub fn new() -> Self { Self::default() }

    pub fn with_document(mut self, collection: Collection, bytes: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(collection, bytes.into());
        self
    }

    pub fn document(&self, collection: Collection) -> Option<&[u8]> {
        self.documents.get(&collection).map(Vec::as_slice)
    }

    pub fn fail_writes(&mut self, collection: Collection) { self.failing.insert(collection); }

    pub fn clear_failures(&mut self) { self.failing.clear(); }
}

impl DocumentBackend for MemoryBackend {
    fn read(&self, collection: Collection) -> Result<Option<Vec<u8>>, ServiceError> {
        Ok(self.documents.get(&collection).cloned())
    }

    fn write(&mut self, collection: Collection, bytes: &[u8]) -> Result<(), ServiceError> {
        if self.failing.contains(&collection) {
            return Err(ServiceError::io(
                collection.file_name(),
                std::io::Error::other("write rejected"),
            ));
        }
        self.documents.insert(collection, bytes.to_vec());
        Ok(())
    }
}
