use std::path::{Path, PathBuf};
use std::{fs, io};

use chrono::Local;
use tracing::{debug, info};

use super::{Collection, DocumentBackend};
use crate::errors::ServiceError;

/// One JSON file per collection under a base directory.
///
/// Writes overwrite the file in place; there is no temp-file rename and no
/// locking, so two processes sharing a directory race and the last writer wins.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    data_dir: PathBuf,
}

impl JsonFileBackend {
    /// Use `data_dir` as the base directory, creating it if missing.
    pub fn open<P: Into<PathBuf>>(data_dir: P) -> Result<Self, ServiceError> {
        let data_dir = data_dir.into();
        common::env::ensure_data_dir(&data_dir).map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path { &self.data_dir }

    pub fn path_for(&self, collection: Collection) -> PathBuf { self.data_dir.join(collection.file_name()) }

    /// Copy every existing document into `backup_dir/backup_YYYYMMDD_HHMMSS/`.
    ///
    /// Fails if that timestamped directory already exists.
    pub fn backup_to(&self, backup_dir: &Path) -> Result<PathBuf, ServiceError> {
        fs::create_dir_all(backup_dir).map_err(|e| ServiceError::io(backup_dir, e))?;
        let target = backup_dir.join(format!("backup_{}", Local::now().format("%Y%m%d_%H%M%S")));
        fs::create_dir(&target).map_err(|e| ServiceError::io(&target, e))?;

        let mut copied = 0usize;
        for collection in Collection::ALL {
            let source = self.path_for(collection);
            if !source.exists() {
                continue;
            }
            let dest = target.join(collection.file_name());
            fs::copy(&source, &dest).map_err(|e| ServiceError::io(&source, e))?;
            copied += 1;
        }
        info!(backup = %target.display(), files = copied, "backup_written");
        Ok(target)
    }
}

impl DocumentBackend for JsonFileBackend {
    fn read(&self, collection: Collection) -> Result<Option<Vec<u8>>, ServiceError> {
        let path = self.path_for(collection);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "document absent");
                Ok(None)
            }
            Err(e) => Err(ServiceError::io(path, e)),
        }
    }

    fn write(&mut self, collection: Collection, bytes: &[u8]) -> Result<(), ServiceError> {
        let path = self.path_for(collection);
        fs::write(&path, bytes).map_err(|e| ServiceError::io(&path, e))?;
        debug!(path = %path.display(), bytes = bytes.len(), "document written");
        Ok(())
    }
}
