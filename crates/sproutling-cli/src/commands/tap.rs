use crate::common::{open_engine, resolve_habit, warn_if_degraded, CliResult};

pub fn run_tap(habit: &str) -> CliResult {
    let mut engine = open_engine();
    let id = resolve_habit(&engine, habit)?;

    let outcome = engine.record_action(id);
    if outcome.stage_advanced {
        println!(
            "stage up! now stage {} ({}%)",
            outcome.new_stage, outcome.new_percent
        );
    } else {
        println!(
            "recorded. stage {} ({}%)",
            outcome.new_stage, outcome.new_percent
        );
    }
    warn_if_degraded(&engine);
    Ok(())
}

pub fn run_undo(habit: &str) -> CliResult {
    let mut engine = open_engine();
    let id = resolve_habit(&engine, habit)?;

    let outcome = engine.undo_action(id);
    if !outcome.removed {
        println!("nothing to undo for this habit");
        return Ok(());
    }
    if outcome.stage_reverted {
        println!(
            "undone, dropped to stage {} ({}%)",
            outcome.new_stage, outcome.new_percent
        );
    } else {
        println!(
            "undone. stage {} ({}%)",
            outcome.new_stage, outcome.new_percent
        );
    }
    warn_if_degraded(&engine);
    Ok(())
}
