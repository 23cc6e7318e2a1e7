//! # Sproutling Core Library
//!
//! This library provides the core logic for Sproutling, a virtual-pet
//! habit tracker: users tap habit buttons to log "decisions", which both
//! accumulate an append-only event log and advance a creature through
//! growth stages. All operations are available through the engine facade;
//! UI layers (the CLI in this workspace, or any other shell) are thin
//! glue over the same library.
//!
//! ## Architecture
//!
//! - **Event Log**: append-only, timestamped action records; undo removes
//!   the most recent matching event
//! - **Stage Engine**: threshold-gated growth state machine (stages 1-6)
//! - **Aggregation**: calendar-bucketed counts and chart histograms,
//!   recomputed on demand
//! - **Registry**: ordered, bounded collection of habit buttons
//! - **Storage**: JSON blob persistence behind an injected port, plus
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`HabitEngine`]: the facade every state change goes through
//! - [`Stats`] / [`Histogram`]: derived statistics
//! - [`Config`]: application configuration (threshold table etc.)

pub mod engine;
pub mod error;
pub mod log;
pub mod notes;
pub mod registry;
pub mod settings;
pub mod stage;
pub mod stats;
pub mod storage;

pub use engine::{ActionOutcome, HabitEngine, StateSnapshot, UndoOutcome};
pub use error::{CoreError, RegistryError, StorageError};
pub use log::{Event, EventLog};
pub use notes::NotesMap;
pub use registry::{HabitButton, HabitPatch, HabitRegistry, LABEL_LIMIT, MAX_BUTTONS};
pub use settings::Settings;
pub use stage::{StageEngine, StageState, DEFAULT_THRESHOLDS};
pub use stats::{per_habit_counts, Histogram, HistogramRange, Stats};
pub use storage::{Blob, Config, FileStorage, MemoryStorage, Storage};
