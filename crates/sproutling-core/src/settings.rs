//! Persisted settings aggregate.
//!
//! One JSON blob owning the button registry, the HUD flags and the stage
//! state. Every mutation to any nested field re-serializes the whole
//! aggregate (no partial writes). Serde aliases keep blobs written by
//! older app versions loadable; [`Settings::normalize`] repairs whatever
//! the aliases cannot express.

use serde::{Deserialize, Serialize};

use crate::registry::HabitRegistry;
use crate::stage::{StageEngine, StageState};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub buttons: HabitRegistry,
    /// Show the per-habit count HUD.
    #[serde(default, alias = "showStatsHUD", alias = "showCounts")]
    pub show_counts: bool,
    /// Show the stage progress percentage.
    #[serde(default, alias = "showProgressCounter", alias = "showProgress")]
    pub show_progress: bool,
    #[serde(default = "default_stage")]
    pub stage: u8,
    #[serde(default, alias = "stageProgress")]
    pub stage_progress: u32,
}

fn default_stage() -> u8 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            buttons: HabitRegistry::default(),
            show_counts: false,
            show_progress: false,
            stage: default_stage(),
            stage_progress: 0,
        }
    }
}

impl Settings {
    pub fn stage_state(&self) -> StageState {
        StageState {
            stage: self.stage,
            progress: self.stage_progress,
        }
    }

    pub fn set_stage_state(&mut self, state: StageState) {
        self.stage = state.stage;
        self.stage_progress = state.progress;
    }

    /// One-time normalization on load: repair the registry (ids, labels,
    /// size) and clamp the stage state into the engine's valid range.
    /// Idempotent -- re-normalizing already-clean data is a no-op.
    pub fn normalize(&mut self, stages: &StageEngine) {
        self.buttons.normalize();

        let mut state = self.stage_state();
        state.stage = state.stage.clamp(1, stages.max_stage());
        match stages.threshold(state.stage) {
            Some(threshold) if state.progress >= threshold => {
                state.progress = threshold - 1;
            }
            None => state.progress = 0,
            _ => {}
        }
        self.set_stage_state(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{DEFAULT_LABEL, MAX_BUTTONS};

    #[test]
    fn legacy_blob_loads_and_normalizes() {
        // Shape written by the first app version: labels only, HUD flag
        // under its old name, no progress counter flag.
        let raw = r#"{
            "buttons": [{"label": "Decision"}, {"label": "a ridiculously long label"}],
            "showStatsHUD": true,
            "stage": 3,
            "stageProgress": 250
        }"#;
        let mut settings: Settings = serde_json::from_str(raw).unwrap();
        settings.normalize(&StageEngine::default());

        assert!(settings.show_counts);
        assert!(!settings.show_progress);
        assert_eq!(settings.buttons.list()[0].label, DEFAULT_LABEL);
        assert_eq!(settings.buttons.list()[1].label.chars().count(), 10);
        // Progress 250 is out of range for stage 3 (threshold 100).
        assert_eq!(settings.stage, 3);
        assert_eq!(settings.stage_progress, 99);
    }

    #[test]
    fn normalize_is_idempotent() {
        let raw = r#"{"buttons":[{"label":"x"},{"label":"y"},{"label":"z"},{"label":"w"},{"label":"v"},{"label":"u"}],"stage":9,"stageProgress":7}"#;
        let mut settings: Settings = serde_json::from_str(raw).unwrap();
        let stages = StageEngine::default();

        settings.normalize(&stages);
        assert_eq!(settings.buttons.len(), MAX_BUTTONS);
        assert_eq!(settings.stage, 6);
        assert_eq!(settings.stage_progress, 0);

        let once = settings.clone();
        settings.normalize(&stages);
        assert_eq!(settings, once);
    }

    #[test]
    fn missing_blob_fields_default() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.stage, 1);
        assert_eq!(settings.stage_progress, 0);
        assert!(!settings.show_counts);
        assert_eq!(settings.buttons.len(), 1);
    }
}
