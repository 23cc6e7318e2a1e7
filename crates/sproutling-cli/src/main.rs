use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "sproutling-cli", version, about = "Sproutling CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record one action for a habit
    Tap {
        /// Habit label or id
        habit: String,
    },
    /// Undo the most recent action of a habit
    Undo {
        /// Habit label or id
        habit: String,
    },
    /// Habit button management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Statistics and charts
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Per-habit notes
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// HUD settings flags
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// State export/import
    State {
        #[command(subcommand)]
        action: commands::state::StateAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Tap { habit } => commands::tap::run_tap(&habit),
        Commands::Undo { habit } => commands::tap::run_undo(&habit),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Note { action } => commands::note::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::State { action } => commands::state::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
