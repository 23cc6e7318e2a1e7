//! In-memory blob storage.
//!
//! Test double for the persistence port, and the fallback store for a
//! degraded session when the file store cannot be opened.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{Blob, Storage};
use crate::error::StorageError;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: RefCell<HashMap<Blob, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail, to exercise degraded mode.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Raw contents of a blob, for assertions.
    pub fn contents(&self, blob: Blob) -> Option<String> {
        self.blobs.borrow().get(&blob).cloned()
    }

    /// Seed a blob before handing the store to an engine.
    pub fn seed(&self, blob: Blob, contents: &str) {
        self.blobs.borrow_mut().insert(blob, contents.to_string());
    }
}

impl Storage for MemoryStorage {
    fn read(&self, blob: Blob) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.borrow().get(&blob).cloned())
    }

    fn write(&self, blob: Blob, contents: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::WriteFailed {
                blob,
                message: "memory storage configured to fail".to_string(),
            });
        }
        self.blobs.borrow_mut().insert(blob, contents.to_string());
        Ok(())
    }
}

// Shared-handle variant so a test can keep inspecting the store after
// handing it to an engine.
impl Storage for std::rc::Rc<MemoryStorage> {
    fn read(&self, blob: Blob) -> Result<Option<String>, StorageError> {
        self.as_ref().read(blob)
    }

    fn write(&self, blob: Blob, contents: &str) -> Result<(), StorageError> {
        self.as_ref().write(blob, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_read_write() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read(Blob::Settings).unwrap(), None);

        storage.seed(Blob::Settings, "{}");
        assert_eq!(storage.read(Blob::Settings).unwrap().as_deref(), Some("{}"));

        storage.write(Blob::Notes, "{}").unwrap();
        assert_eq!(storage.contents(Blob::Notes).as_deref(), Some("{}"));
    }

    #[test]
    fn failing_writes_keep_old_contents() {
        let storage = MemoryStorage::new();
        storage.write(Blob::Log, "[1]").unwrap();
        storage.set_fail_writes(true);
        assert!(storage.write(Blob::Log, "[2]").is_err());
        assert_eq!(storage.contents(Blob::Log).as_deref(), Some("[1]"));
    }
}
