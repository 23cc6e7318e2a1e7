//! Stage progression state machine.
//!
//! The creature grows through discrete stages (1 up to the table length
//! plus one, 6 by default). Each recorded action adds one point of
//! progress; reaching the threshold for the current stage advances to the
//! next stage with progress reset to zero. Undo walks the same path
//! backwards: an underflow drops one stage and lands just short of
//! re-advancing, and stage 1 clamps at zero progress.
//!
//! The final stage is terminal: further increments are ignored and
//! progress stays clamped at zero, so replaying the same action sequence
//! always produces the same state.

use serde::{Deserialize, Serialize};

/// Events required to advance from each stage (index 0 = stage 1 -> 2).
pub const DEFAULT_THRESHOLDS: [u32; 5] = [5, 20, 100, 250, 500];

/// Current growth position: stage plus progress within that stage.
///
/// Invariant (checked after every transition): `stage` stays within
/// `1..=max_stage`, and below the final stage `progress` is strictly less
/// than the current threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageState {
    pub stage: u8,
    pub progress: u32,
}

impl Default for StageState {
    fn default() -> Self {
        Self { stage: 1, progress: 0 }
    }
}

/// Pure transition logic over [`StageState`], parameterized by the
/// threshold table. Holds no mutable state of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageEngine {
    thresholds: Vec<u32>,
}

impl Default for StageEngine {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLDS.to_vec())
    }
}

impl StageEngine {
    /// Build an engine from a threshold table. An empty table falls back
    /// to the default one; zero entries are floored at 1 so a threshold
    /// can never be met before the first action.
    pub fn new(thresholds: Vec<u32>) -> Self {
        let thresholds = if thresholds.is_empty() {
            DEFAULT_THRESHOLDS.to_vec()
        } else {
            thresholds.into_iter().map(|t| t.max(1)).collect()
        };
        Self { thresholds }
    }

    /// Highest reachable stage (table length + 1).
    pub fn max_stage(&self) -> u8 {
        (self.thresholds.len() + 1) as u8
    }

    /// Events required to leave `stage`, or `None` at the final stage.
    pub fn threshold(&self, stage: u8) -> Option<u32> {
        if stage < 1 {
            return None;
        }
        self.thresholds.get((stage - 1) as usize).copied()
    }

    /// Record one action. Returns `true` when the state crossed into the
    /// next stage (the "stage advanced" flag consumed by the UI).
    pub fn advance(&self, state: &mut StageState) -> bool {
        let Some(threshold) = self.threshold(state.stage) else {
            // Terminal stage: increments are ignored, progress stays 0.
            state.progress = 0;
            return false;
        };
        state.progress += 1;
        let advanced = state.progress >= threshold;
        if advanced {
            state.stage += 1;
            state.progress = 0;
        }
        self.debug_check(state);
        advanced
    }

    /// Undo one action. Returns `true` when the state dropped a stage.
    /// At the stage-1 floor progress clamps to zero instead.
    pub fn revert(&self, state: &mut StageState) -> bool {
        if state.progress > 0 {
            state.progress -= 1;
            self.debug_check(state);
            return false;
        }
        if state.stage > 1 {
            state.stage -= 1;
            // Just short of re-advancing.
            state.progress = self
                .threshold(state.stage)
                .map(|t| t.saturating_sub(1))
                .unwrap_or(0);
            self.debug_check(state);
            return true;
        }
        // stage 1, progress 0: floor.
        false
    }

    /// Displayed progress percentage, `floor(progress / threshold * 100)`.
    /// Reported as 100 at the terminal stage.
    pub fn percent(&self, state: &StageState) -> u8 {
        match self.threshold(state.stage) {
            Some(threshold) => ((state.progress as u64 * 100) / threshold as u64) as u8,
            None => 100,
        }
    }

    fn debug_check(&self, state: &StageState) {
        debug_assert!(state.stage >= 1 && state.stage <= self.max_stage());
        if let Some(t) = self.threshold(state.stage) {
            debug_assert!(state.progress < t);
        }
    }
}
