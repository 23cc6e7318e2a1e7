use std::path::PathBuf;

use clap::Subcommand;
use sproutling_core::StateSnapshot;

use crate::common::{open_engine, warn_if_degraded, CliResult};

#[derive(Subcommand)]
pub enum StateAction {
    /// Dump all persisted state as JSON to stdout
    Export,
    /// Replace all state with a JSON snapshot (from a file, or stdin)
    Import {
        /// Snapshot file; reads stdin when omitted
        file: Option<PathBuf>,
    },
}

pub fn run(action: StateAction) -> CliResult {
    match action {
        StateAction::Export => {
            let engine = open_engine();
            println!("{}", serde_json::to_string_pretty(&engine.export_state())?);
        }
        StateAction::Import { file } => {
            let raw = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => std::io::read_to_string(std::io::stdin())?,
            };
            let snapshot: StateSnapshot = serde_json::from_str(&raw)?;

            let mut engine = open_engine();
            engine.import_state(snapshot);
            println!(
                "imported {} habits, {} events",
                engine.list_habits().len(),
                engine.event_count()
            );
            warn_if_degraded(&engine);
        }
    }
    Ok(())
}
