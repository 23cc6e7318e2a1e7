use clap::Subcommand;

use crate::common::{open_engine, warn_if_degraded, CliResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the HUD flags
    Show,
    /// Toggle the per-habit count HUD (on|off)
    Counts { state: String },
    /// Toggle the stage progress percentage (on|off)
    Progress { state: String },
}

pub fn run(action: SettingsAction) -> CliResult {
    let mut engine = open_engine();

    match action {
        SettingsAction::Show => {
            let settings = engine.settings();
            println!("show_counts    {}", settings.show_counts);
            println!("show_progress  {}", settings.show_progress);
            println!("stage          {}", settings.stage);
            println!("stage_progress {}", settings.stage_progress);
        }
        SettingsAction::Counts { state } => {
            engine.set_show_counts(parse_toggle(&state)?);
            println!("show_counts = {}", engine.settings().show_counts);
        }
        SettingsAction::Progress { state } => {
            engine.set_show_progress(parse_toggle(&state)?);
            println!("show_progress = {}", engine.settings().show_progress);
        }
    }
    warn_if_degraded(&engine);
    Ok(())
}

fn parse_toggle(raw: &str) -> Result<bool, Box<dyn std::error::Error>> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        other => Err(format!("expected on|off, got '{other}'").into()),
    }
}
