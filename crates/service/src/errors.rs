use std::path::PathBuf;

use thiserror::Error;

use crate::storage::Collection;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Service code {0} not found")]
    UnknownServiceCode(String),
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot serialize {collection}: {reason}")]
    Serialize { collection: Collection, reason: String },
    #[error("malformed {collection} document: {reason}")]
    MalformedDocument { collection: Collection, reason: String },
    #[error("no unused id found after {attempts} attempts")]
    IdSpaceExhausted { attempts: u32 },
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Errors a caller could fix by changing its input, as opposed to storage faults.
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::UnknownServiceCode(_))
    }
}
