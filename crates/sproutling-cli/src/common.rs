//! Shared CLI helpers.

use sproutling_core::HabitEngine;
use uuid::Uuid;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the engine and surface the one-time degraded-storage warning.
pub fn open_engine() -> HabitEngine {
    let engine = HabitEngine::open();
    warn_if_degraded(&engine);
    engine
}

/// Print the storage warning once per invocation if a write failed or the
/// store could not be opened.
pub fn warn_if_degraded(engine: &HabitEngine) {
    if engine.storage_degraded() {
        eprintln!("warning: storage unavailable, changes are kept in memory for this session only");
    }
}

/// Resolve user input (label or uuid) to a registered habit id.
pub fn resolve_habit(engine: &HabitEngine, query: &str) -> Result<Uuid, Box<dyn std::error::Error>> {
    engine
        .find_habit(query)
        .map(|b| b.id)
        .ok_or_else(|| format!("no habit matching '{query}'").into())
}
