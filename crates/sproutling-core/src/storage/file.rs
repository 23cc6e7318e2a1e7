//! File-backed blob storage.
//!
//! One JSON file per blob in the data directory.

use std::path::PathBuf;

use super::{data_dir, Blob, Storage};
use crate::error::StorageError;

pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open against the default data directory.
    ///
    /// # Errors
    /// Returns [`StorageError::Unavailable`] when the directory cannot be
    /// created; callers fall back to an in-memory session.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self { dir: data_dir()? })
    }

    /// Storage rooted at a custom directory (tests).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Storage for FileStorage {
    fn read(&self, blob: Blob) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.dir.join(blob.file_name())) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed {
                blob,
                message: e.to_string(),
            }),
        }
    }

    fn write(&self, blob: Blob, contents: &str) -> Result<(), StorageError> {
        std::fs::write(self.dir.join(blob.file_name()), contents).map_err(|e| {
            StorageError::WriteFailed {
                blob,
                message: e.to_string(),
            }
        })
    }
}
