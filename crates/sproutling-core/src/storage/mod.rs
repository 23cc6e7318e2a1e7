//! Persistence: named JSON blobs plus the TOML application config.
//!
//! State lives in three independent blobs (settings aggregate, event log,
//! notes map), each JSON-serializable and tolerant of being missing. The
//! [`Storage`] trait is the injected port the engine writes through; the
//! file-backed implementation is the production store, the in-memory one
//! doubles for tests and for degraded sessions.

mod config;
mod file;
mod memory;

pub use config::Config;
pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::fmt;
use std::path::PathBuf;

use crate::error::StorageError;

/// The three independently persisted blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Blob {
    Settings,
    Log,
    Notes,
}

impl Blob {
    pub fn file_name(self) -> &'static str {
        match self {
            Blob::Settings => "settings.json",
            Blob::Log => "log.json",
            Blob::Notes => "notes.json",
        }
    }
}

impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Blob::Settings => "settings",
            Blob::Log => "log",
            Blob::Notes => "notes",
        };
        f.write_str(name)
    }
}

/// Persistence port. Writes are best-effort from the engine's point of
/// view: a failure degrades the session to in-memory-only, it never
/// blocks or unwinds the in-memory state change.
pub trait Storage {
    /// Read a blob. `Ok(None)` means the blob has never been written.
    fn read(&self, blob: Blob) -> Result<Option<String>, StorageError>;

    /// Durably write a blob.
    fn write(&self, blob: Blob, contents: &str) -> Result<(), StorageError>;
}

/// Returns `~/.config/sproutling[-dev]/` based on SPROUTLING_ENV.
///
/// Set SPROUTLING_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SPROUTLING_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("sproutling-dev")
    } else {
        base_dir.join("sproutling")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::Unavailable {
        reason: e.to_string(),
    })?;
    Ok(dir)
}
