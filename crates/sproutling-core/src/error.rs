//! Core error types for sproutling-core.
//!
//! Public operations are total with respect to runtime conditions: they
//! return a status instead of panicking, and persistence failures degrade
//! to in-memory state rather than unwinding. These enums carry the
//! conditions callers can act on.

use thiserror::Error;
use uuid::Uuid;

use crate::storage::Blob;

/// Core error type for sproutling-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Habit registry errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration parse errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration serialize errors
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Persistence-medium errors.
///
/// These never escape the engine's read/write paths: a read failure falls
/// back to defaults, a write failure flips the engine into degraded
/// (in-memory-only) mode for the session.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The storage medium cannot be used at all.
    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },

    /// Reading a blob failed for a reason other than absence.
    #[error("Failed to read {blob}: {message}")]
    ReadFailed { blob: Blob, message: String },

    /// Writing a blob failed.
    #[error("Failed to write {blob}: {message}")]
    WriteFailed { blob: Blob, message: String },
}

/// Habit registry errors. All reject the operation with no state change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry already holds the maximum number of buttons.
    #[error("Habit registry is full ({max} buttons)")]
    AtCapacity { max: usize },

    /// The label is empty after trimming.
    #[error("Habit label is empty")]
    EmptyLabel,

    /// No habit with this id exists in the registry.
    #[error("No habit with id {0}")]
    UnknownHabit(Uuid),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
