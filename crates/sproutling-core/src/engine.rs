//! Engine facade.
//!
//! [`HabitEngine`] is the single object a UI layer drives: it owns the
//! settings aggregate (button registry + stage state), the event log and
//! the notes map, and writes them through the injected [`Storage`] port.
//! Every public operation is one atomic unit -- state changes complete in
//! memory first, then a best-effort commit persists the touched blobs. A
//! failed commit flips the engine into degraded (in-memory-only) mode for
//! the session and is never surfaced as an operation failure.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::RegistryError;
use crate::log::EventLog;
use crate::notes::NotesMap;
use crate::registry::{HabitButton, HabitPatch};
use crate::settings::Settings;
use crate::stage::StageEngine;
use crate::stats::{per_habit_counts, Histogram, HistogramRange, Stats};
use crate::storage::{Blob, Config, FileStorage, MemoryStorage, Storage};

/// Result of recording one action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionOutcome {
    /// The action crossed a stage threshold (UI plays the celebration).
    pub stage_advanced: bool,
    pub new_stage: u8,
    pub new_percent: u8,
}

/// Result of undoing one action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UndoOutcome {
    /// Whether a matching event existed and was removed. When `false`
    /// nothing changed.
    pub removed: bool,
    pub stage_reverted: bool,
    pub new_stage: u8,
    pub new_percent: u8,
}

/// Full serializable dump of the persisted state (all three blobs).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateSnapshot {
    pub settings: Settings,
    pub log: EventLog,
    pub notes: NotesMap,
}

pub struct HabitEngine {
    settings: Settings,
    log: EventLog,
    notes: NotesMap,
    stages: StageEngine,
    storage: Box<dyn Storage>,
    degraded: bool,
}

impl HabitEngine {
    /// Open against the default file store, falling back to an in-memory
    /// session (degraded mode) when the storage medium is unavailable.
    pub fn open() -> Self {
        let config = Config::load_or_default();
        match FileStorage::open() {
            Ok(storage) => Self::with_storage(Box::new(storage), &config),
            Err(_) => {
                let mut engine =
                    Self::with_storage(Box::new(MemoryStorage::new()), &config);
                engine.degraded = true;
                engine
            }
        }
    }

    /// Load state from the given port. Missing or corrupt blobs fall back
    /// to versioned defaults; settings are normalized once on load.
    pub fn with_storage(storage: Box<dyn Storage>, config: &Config) -> Self {
        let stages = StageEngine::new(config.stage_thresholds.clone());
        let mut settings: Settings =
            read_blob(storage.as_ref(), Blob::Settings).unwrap_or_default();
        let log: EventLog = read_blob(storage.as_ref(), Blob::Log).unwrap_or_default();
        let notes: NotesMap = read_blob(storage.as_ref(), Blob::Notes).unwrap_or_default();
        settings.normalize(&stages);

        Self {
            settings,
            log,
            notes,
            stages,
            storage,
            degraded: false,
        }
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Record one action for a habit, timestamped now.
    pub fn record_action(&mut self, habit_id: Uuid) -> ActionOutcome {
        self.record_action_at(habit_id, Utc::now())
    }

    /// Record one action at an explicit instant. Ids absent from the
    /// registry are still logged (deleted habits keep their history); the
    /// event then carries an empty label.
    pub fn record_action_at(&mut self, habit_id: Uuid, timestamp: DateTime<Utc>) -> ActionOutcome {
        let label = self
            .settings
            .buttons
            .get(habit_id)
            .map(|b| b.label.clone())
            .unwrap_or_default();
        self.log.append(Some(habit_id), label, timestamp);

        let mut state = self.settings.stage_state();
        let stage_advanced = self.stages.advance(&mut state);
        self.settings.set_stage_state(state);
        self.commit(&[Blob::Log, Blob::Settings]);

        ActionOutcome {
            stage_advanced,
            new_stage: state.stage,
            new_percent: self.stages.percent(&state),
        }
    }

    /// Undo the most recent action of a habit. When no matching event
    /// exists, nothing changes and `removed` is `false`.
    pub fn undo_action(&mut self, habit_id: Uuid) -> UndoOutcome {
        let label = self
            .settings
            .buttons
            .get(habit_id)
            .map(|b| b.label.clone())
            .unwrap_or_default();
        let removed = self.log.remove_last_matching(habit_id, &label);

        let mut state = self.settings.stage_state();
        let stage_reverted = if removed {
            let reverted = self.stages.revert(&mut state);
            self.settings.set_stage_state(state);
            self.commit(&[Blob::Log, Blob::Settings]);
            reverted
        } else {
            false
        };

        UndoOutcome {
            removed,
            stage_reverted,
            new_stage: state.stage,
            new_percent: self.stages.percent(&state),
        }
    }

    // ── Statistics ───────────────────────────────────────────────────

    pub fn stats<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Stats {
        Stats::collect(&self.log, now)
    }

    pub fn histogram<Tz: TimeZone>(&self, range: HistogramRange, now: &DateTime<Tz>) -> Histogram {
        Histogram::collect(&self.log, range, now)
    }

    pub fn per_habit_counts(&self) -> HashMap<Uuid, u64> {
        per_habit_counts(&self.log, &self.settings.buttons)
    }

    pub fn event_count(&self) -> usize {
        self.log.len()
    }

    // ── Habit registry ───────────────────────────────────────────────

    pub fn list_habits(&self) -> &[HabitButton] {
        self.settings.buttons.list()
    }

    pub fn add_habit(&mut self, label: &str, color: &str) -> Result<Uuid, RegistryError> {
        let id = self.settings.buttons.add(label, color)?;
        self.commit(&[Blob::Settings]);
        Ok(id)
    }

    /// Remove a habit and its note. Historical log events referencing the
    /// id are left untouched.
    pub fn remove_habit(&mut self, habit_id: Uuid) -> Result<(), RegistryError> {
        self.settings.buttons.remove(habit_id)?;
        let had_note = self.notes.remove(habit_id);
        if had_note {
            self.commit(&[Blob::Settings, Blob::Notes]);
        } else {
            self.commit(&[Blob::Settings]);
        }
        Ok(())
    }

    pub fn update_habit(&mut self, habit_id: Uuid, patch: HabitPatch) -> Result<(), RegistryError> {
        self.settings.buttons.update(habit_id, patch)?;
        self.commit(&[Blob::Settings]);
        Ok(())
    }

    pub fn move_habit(&mut self, habit_id: Uuid, to_index: usize) -> Result<(), RegistryError> {
        self.settings.buttons.move_to(habit_id, to_index)?;
        self.commit(&[Blob::Settings]);
        Ok(())
    }

    /// Resolve a habit from user input: a uuid string, or a label.
    pub fn find_habit(&self, query: &str) -> Option<&HabitButton> {
        if let Ok(id) = query.trim().parse::<Uuid>() {
            if let Some(button) = self.settings.buttons.get(id) {
                return Some(button);
            }
        }
        self.settings.buttons.find_by_label(query)
    }

    // ── Notes ────────────────────────────────────────────────────────

    pub fn note(&self, habit_id: Uuid) -> Option<&str> {
        self.notes.get(habit_id)
    }

    /// Attach a free-text note to a registered habit.
    pub fn set_note(&mut self, habit_id: Uuid, text: &str) -> Result<(), RegistryError> {
        if self.settings.buttons.get(habit_id).is_none() {
            return Err(RegistryError::UnknownHabit(habit_id));
        }
        self.notes.set(habit_id, text);
        // The note is keyed by a button id that may so far exist only in
        // memory (assigned during load normalization), so the settings
        // blob is written with it.
        self.commit(&[Blob::Settings, Blob::Notes]);
        Ok(())
    }

    pub fn clear_note(&mut self, habit_id: Uuid) -> bool {
        let removed = self.notes.remove(habit_id);
        if removed {
            self.commit(&[Blob::Settings, Blob::Notes]);
        }
        removed
    }

    // ── Settings flags ───────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_show_counts(&mut self, on: bool) {
        self.settings.show_counts = on;
        self.commit(&[Blob::Settings]);
    }

    pub fn set_show_progress(&mut self, on: bool) {
        self.settings.show_progress = on;
        self.commit(&[Blob::Settings]);
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub fn export_state(&self) -> StateSnapshot {
        StateSnapshot {
            settings: self.settings.clone(),
            log: self.log.clone(),
            notes: self.notes.clone(),
        }
    }

    /// Replace all state with a snapshot. Imported settings go through
    /// the same normalization as loaded ones.
    pub fn import_state(&mut self, snapshot: StateSnapshot) {
        self.settings = snapshot.settings;
        self.log = snapshot.log;
        self.notes = snapshot.notes;
        self.settings.normalize(&self.stages);
        self.commit(&[Blob::Settings, Blob::Log, Blob::Notes]);
    }

    /// Whether a persistence write has failed this session (state is
    /// in-memory only). The UI surfaces this warning once.
    pub fn storage_degraded(&self) -> bool {
        self.degraded
    }

    pub fn stage_engine(&self) -> &StageEngine {
        &self.stages
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Best-effort durable write of the touched blobs. Never fails the
    /// calling operation; a write error marks the session degraded.
    fn commit(&mut self, blobs: &[Blob]) {
        for &blob in blobs {
            let serialized = match blob {
                Blob::Settings => serde_json::to_string(&self.settings),
                Blob::Log => serde_json::to_string(&self.log),
                Blob::Notes => serde_json::to_string(&self.notes),
            };
            let ok = match serialized {
                Ok(raw) => self.storage.write(blob, &raw).is_ok(),
                Err(_) => false,
            };
            if !ok {
                self.degraded = true;
            }
        }
    }
}

fn read_blob<T: DeserializeOwned>(storage: &dyn Storage, blob: Blob) -> Option<T> {
    match storage.read(blob) {
        // Corrupt data falls back to defaults rather than propagating.
        Ok(Some(raw)) => serde_json::from_str(&raw).ok(),
        _ => None,
    }
}
