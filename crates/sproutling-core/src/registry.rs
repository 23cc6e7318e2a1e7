//! Habit button registry.
//!
//! An ordered, bounded collection of user-defined buttons. Order is
//! display order and user-reorderable; ids are the stable identity that
//! log entries reference (label matching only survives as a legacy
//! fallback in lookups, see [`crate::log::Event::matches`]).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RegistryError;

/// Maximum number of buttons the registry holds.
pub const MAX_BUTTONS: usize = 5;
/// Maximum label length in characters; longer labels are truncated.
pub const LABEL_LIMIT: usize = 10;
/// Label of the single seeded default button.
pub const DEFAULT_LABEL: &str = "Decision";
/// Color assigned when none is given.
pub const DEFAULT_COLOR: &str = "#3b82f6";

/// One tappable habit button.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HabitButton {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub label: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Partial update for [`HabitRegistry::update`]. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitPatch {
    pub label: Option<String>,
    pub color: Option<String>,
}

/// Ordered collection of 1..=[`MAX_BUTTONS`] buttons with unique ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct HabitRegistry {
    buttons: Vec<HabitButton>,
}

impl Default for HabitRegistry {
    fn default() -> Self {
        Self {
            buttons: vec![HabitButton {
                id: Uuid::new_v4(),
                label: DEFAULT_LABEL.to_string(),
                color: default_color(),
            }],
        }
    }
}

impl HabitRegistry {
    /// Add a button. Rejects when full or when the label trims to empty;
    /// labels are truncated to [`LABEL_LIMIT`] characters.
    pub fn add(&mut self, label: &str, color: &str) -> Result<Uuid, RegistryError> {
        if self.buttons.len() >= MAX_BUTTONS {
            return Err(RegistryError::AtCapacity { max: MAX_BUTTONS });
        }
        let label = clean_label(label).ok_or(RegistryError::EmptyLabel)?;
        let id = Uuid::new_v4();
        self.buttons.push(HabitButton {
            id,
            label,
            color: clean_color(color),
        });
        Ok(id)
    }

    /// Remove a button. The registry never goes below one entry: removing
    /// the last button reseeds the default one.
    pub fn remove(&mut self, id: Uuid) -> Result<HabitButton, RegistryError> {
        let pos = self.position(id)?;
        let removed = self.buttons.remove(pos);
        if self.buttons.is_empty() {
            *self = Self::default();
        }
        Ok(removed)
    }

    /// Apply a partial update in place.
    pub fn update(&mut self, id: Uuid, patch: HabitPatch) -> Result<(), RegistryError> {
        let pos = self.position(id)?;
        if let Some(label) = patch.label {
            self.buttons[pos].label = clean_label(&label).ok_or(RegistryError::EmptyLabel)?;
        }
        if let Some(color) = patch.color {
            self.buttons[pos].color = clean_color(&color);
        }
        Ok(())
    }

    /// Stable reorder: remove, then reinsert at `index` (clamped to the
    /// end). All other relative orderings are preserved.
    pub fn move_to(&mut self, id: Uuid, index: usize) -> Result<(), RegistryError> {
        let pos = self.position(id)?;
        let button = self.buttons.remove(pos);
        let index = index.min(self.buttons.len());
        self.buttons.insert(index, button);
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Option<&HabitButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// First button whose label equals `label` (trimmed). Legacy lookup
    /// path for records that predate ids.
    pub fn find_by_label(&self, label: &str) -> Option<&HabitButton> {
        let label = label.trim();
        self.buttons.iter().find(|b| b.label == label)
    }

    pub fn list(&self) -> &[HabitButton] {
        &self.buttons
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// One-time repair of persisted data from older schema versions:
    /// trims/truncates labels (empty ones become the default label),
    /// fills missing colors, regenerates duplicate ids, clamps to
    /// [`MAX_BUTTONS`] and reseeds the default button when empty.
    /// Idempotent: already-normalized data passes through unchanged.
    pub fn normalize(&mut self) {
        self.buttons.truncate(MAX_BUTTONS);
        let mut seen = Vec::with_capacity(self.buttons.len());
        for button in &mut self.buttons {
            button.label =
                clean_label(&button.label).unwrap_or_else(|| DEFAULT_LABEL.to_string());
            button.color = clean_color(&button.color);
            if seen.contains(&button.id) {
                button.id = Uuid::new_v4();
            }
            seen.push(button.id);
        }
        if self.buttons.is_empty() {
            *self = Self::default();
        }
    }

    fn position(&self, id: Uuid) -> Result<usize, RegistryError> {
        self.buttons
            .iter()
            .position(|b| b.id == id)
            .ok_or(RegistryError::UnknownHabit(id))
    }
}

fn clean_label(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(LABEL_LIMIT).collect())
    }
}

fn clean_color(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        default_color()
    } else {
        trimmed.to_string()
    }
}
