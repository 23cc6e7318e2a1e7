use clap::Subcommand;

use crate::common::{open_engine, resolve_habit, warn_if_degraded, CliResult};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Set a habit's note
    Set {
        /// Habit label or id
        habit: String,
        text: String,
    },
    /// Print a habit's note
    Show {
        /// Habit label or id
        habit: String,
    },
    /// Delete a habit's note
    Clear {
        /// Habit label or id
        habit: String,
    },
}

pub fn run(action: NoteAction) -> CliResult {
    let mut engine = open_engine();

    match action {
        NoteAction::Set { habit, text } => {
            let id = resolve_habit(&engine, &habit)?;
            engine.set_note(id, &text)?;
            println!("note saved");
        }
        NoteAction::Show { habit } => {
            let id = resolve_habit(&engine, &habit)?;
            match engine.note(id) {
                Some(text) => println!("{text}"),
                None => println!("(no note)"),
            }
        }
        NoteAction::Clear { habit } => {
            let id = resolve_habit(&engine, &habit)?;
            if engine.clear_note(id) {
                println!("note cleared");
            } else {
                println!("(no note)");
            }
        }
    }
    warn_if_degraded(&engine);
    Ok(())
}
