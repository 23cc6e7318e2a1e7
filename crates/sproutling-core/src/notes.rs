//! Per-habit free-text notes.
//!
//! A standalone persisted map from habit id to note text. A habit's note
//! is deleted together with the habit (cascade handled by the engine).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct NotesMap {
    notes: HashMap<Uuid, String>,
}

impl NotesMap {
    pub fn get(&self, habit_id: Uuid) -> Option<&str> {
        self.notes.get(&habit_id).map(String::as_str)
    }

    /// Store the note for a habit; empty text clears it instead.
    pub fn set(&mut self, habit_id: Uuid, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            self.notes.remove(&habit_id);
        } else {
            self.notes.insert(habit_id, text.to_string());
        }
    }

    /// Remove a habit's note. Returns whether one existed.
    pub fn remove(&mut self, habit_id: Uuid) -> bool {
        self.notes.remove(&habit_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
