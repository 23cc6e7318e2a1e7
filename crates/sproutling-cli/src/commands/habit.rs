use clap::Subcommand;
use sproutling_core::HabitPatch;

use crate::common::{open_engine, resolve_habit, warn_if_degraded, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a habit button
    Add {
        label: String,
        /// RGB hex color, e.g. #3b82f6
        #[arg(long, default_value = "")]
        color: String,
    },
    /// Remove a habit button (its note is deleted too)
    Remove {
        /// Habit label or id
        habit: String,
    },
    /// Change a habit's label
    Rename {
        /// Habit label or id
        habit: String,
        label: String,
    },
    /// Change a habit's color
    Color {
        /// Habit label or id
        habit: String,
        color: String,
    },
    /// Move a habit to a display position (0-based)
    Move {
        /// Habit label or id
        habit: String,
        index: usize,
    },
    /// List habit buttons in display order
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: HabitAction) -> CliResult {
    let mut engine = open_engine();

    match action {
        HabitAction::Add { label, color } => {
            let id = engine.add_habit(&label, &color)?;
            println!("added {id}");
        }
        HabitAction::Remove { habit } => {
            let id = resolve_habit(&engine, &habit)?;
            engine.remove_habit(id)?;
            println!("removed {id}");
        }
        HabitAction::Rename { habit, label } => {
            let id = resolve_habit(&engine, &habit)?;
            engine.update_habit(
                id,
                HabitPatch {
                    label: Some(label),
                    color: None,
                },
            )?;
            println!("renamed {id}");
        }
        HabitAction::Color { habit, color } => {
            let id = resolve_habit(&engine, &habit)?;
            engine.update_habit(
                id,
                HabitPatch {
                    label: None,
                    color: Some(color),
                },
            )?;
            println!("recolored {id}");
        }
        HabitAction::Move { habit, index } => {
            let id = resolve_habit(&engine, &habit)?;
            engine.move_habit(id, index)?;
            println!("moved {id} to {index}");
        }
        HabitAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(engine.list_habits())?);
            } else {
                for (i, button) in engine.list_habits().iter().enumerate() {
                    println!("{i}  {}  {}  {}", button.id, button.color, button.label);
                }
            }
        }
    }
    warn_if_degraded(&engine);
    Ok(())
}
