//! End-to-end engine tests.
//!
//! Exercise the engine facade against the real storage implementations:
//! persistence across engine restarts, legacy-schema migration, cascade
//! deletes, snapshots and degraded mode.

use std::rc::Rc;

use chrono::{TimeZone, Utc};
use sproutling_core::storage::{Blob, Storage};
use sproutling_core::{
    Config, FileStorage, HabitEngine, HistogramRange, MemoryStorage, RegistryError, StorageError,
    MAX_BUTTONS,
};
use uuid::Uuid;

fn engine_on(storage: Rc<MemoryStorage>) -> HabitEngine {
    HabitEngine::with_storage(Box::new(storage), &Config::default())
}

#[test]
fn state_survives_an_engine_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    let water = {
        let storage = FileStorage::with_dir(dir.path());
        let mut engine = HabitEngine::with_storage(Box::new(storage), &Config::default());
        let water = engine.add_habit("water", "#00aaff").unwrap();
        for _ in 0..3 {
            engine.record_action(water);
        }
        engine.set_note(water, "two liters a day").unwrap();
        assert!(!engine.storage_degraded());
        water
    };

    let storage = FileStorage::with_dir(dir.path());
    let engine = HabitEngine::with_storage(Box::new(storage), &Config::default());
    assert_eq!(engine.list_habits().len(), 2);
    assert_eq!(engine.settings().stage_progress, 3);
    assert_eq!(engine.note(water), Some("two liters a day"));
    assert_eq!(engine.per_habit_counts().get(&water), Some(&3));
}

#[test]
fn legacy_blobs_migrate_once_and_stay_stable() {
    let storage = Rc::new(MemoryStorage::new());
    storage.seed(
        Blob::Settings,
        r#"{"buttons":[{"label":"Decision"},{"label":"an oversized label"}],"showStatsHUD":true,"stage":2,"stageProgress":3}"#,
    );
    storage.seed(
        Blob::Log,
        r#"[{"decisionLabel":"Decision","timestamp":"2024-03-11T09:00:00Z"},
            {"decisionLabel":"Decision","timestamp":"2024-03-15T08:00:00Z"}]"#,
    );

    let mut engine = engine_on(storage.clone());
    assert_eq!(engine.list_habits().len(), 2);
    assert!(engine.list_habits().iter().all(|b| !b.id.is_nil()));
    // Label got truncated to the limit.
    assert_eq!(engine.list_habits()[1].label, "an oversiz");

    // Legacy events are attributed to buttons by label.
    let decision = engine.find_habit("Decision").unwrap().id;
    assert_eq!(engine.per_habit_counts().get(&decision), Some(&2));

    // Undo matches the legacy record by label fallback.
    let outcome = engine.undo_action(decision);
    assert!(outcome.removed);

    // A mutation persisted the normalized settings; a fresh engine sees
    // the same ids (normalization happened once, not per load).
    let ids: Vec<Uuid> = engine.list_habits().iter().map(|b| b.id).collect();
    let reloaded = engine_on(storage);
    let reloaded_ids: Vec<Uuid> = reloaded.list_habits().iter().map(|b| b.id).collect();
    assert_eq!(ids, reloaded_ids);
}

#[test]
fn a_note_set_in_the_first_session_survives_restart() {
    let storage = Rc::new(MemoryStorage::new());

    // First session on an empty store: the seeded button's id exists only
    // in memory until something persists the settings blob.
    let id = {
        let mut engine = engine_on(storage.clone());
        let id = engine.list_habits()[0].id;
        engine.set_note(id, "remember why").unwrap();
        id
    };

    // The next session must see the same id, with the note still attached
    // to it rather than orphaned under a regenerated one.
    let engine = engine_on(storage);
    assert_eq!(engine.list_habits()[0].id, id);
    assert_eq!(engine.note(id), Some("remember why"));
}

#[test]
fn corrupt_blobs_fall_back_to_defaults() {
    let storage = Rc::new(MemoryStorage::new());
    storage.seed(Blob::Settings, "{ not json");
    storage.seed(Blob::Log, "also not json");

    let engine = engine_on(storage);
    assert_eq!(engine.list_habits().len(), 1);
    assert_eq!(engine.settings().stage, 1);
    assert_eq!(engine.stats(&Utc::now()).total, 0);
}

#[test]
fn removing_a_habit_cascades_the_note_but_keeps_history() {
    let storage = Rc::new(MemoryStorage::new());
    let mut engine = engine_on(storage);

    let walk = engine.add_habit("walk", "#22cc44").unwrap();
    engine.set_note(walk, "around the block").unwrap();
    engine.record_action(walk);
    engine.record_action(walk);

    engine.remove_habit(walk).unwrap();
    assert!(engine.list_habits().iter().all(|b| b.id != walk));
    assert_eq!(engine.note(walk), None);
    assert_eq!(engine.set_note(walk, "x"), Err(RegistryError::UnknownHabit(walk)));

    // Historical events stay, and still count under the dead id.
    assert_eq!(engine.per_habit_counts().get(&walk), Some(&2));
}

#[test]
fn registry_capacity_is_enforced_end_to_end() {
    let mut engine = engine_on(Rc::new(MemoryStorage::new()));
    for i in 1..MAX_BUTTONS {
        engine.add_habit(&format!("habit{i}"), "#111111").unwrap();
    }
    assert_eq!(
        engine.add_habit("overflow", "#222222"),
        Err(RegistryError::AtCapacity { max: MAX_BUTTONS })
    );
    assert_eq!(engine.list_habits().len(), MAX_BUTTONS);
}

#[test]
fn export_import_roundtrips_all_three_blobs() {
    let mut engine = engine_on(Rc::new(MemoryStorage::new()));
    let water = engine.add_habit("water", "#00aaff").unwrap();
    engine.record_action(water);
    engine.set_note(water, "note").unwrap();
    engine.set_show_counts(true);

    let snapshot = engine.export_state();

    let mut other = engine_on(Rc::new(MemoryStorage::new()));
    other.import_state(snapshot.clone());
    assert_eq!(other.export_state(), snapshot);
    assert_eq!(other.note(water), Some("note"));
    assert!(other.settings().show_counts);
    assert_eq!(other.event_count(), 1);
    assert_eq!(other.stats(&Utc::now()).total, 1);
}

#[test]
fn histogram_and_stats_agree_through_the_facade() {
    let mut engine = engine_on(Rc::new(MemoryStorage::new()));
    let id = engine.list_habits()[0].id;
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();

    for day in [11, 13, 15, 15] {
        engine.record_action_at(id, Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap());
    }
    engine.record_action_at(id, Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap());

    let stats = engine.stats(&now);
    assert_eq!(stats.today, 2);
    assert_eq!(stats.week, 4);
    assert_eq!(stats.month, 4);
    assert_eq!(stats.total, 5);

    let week = engine.histogram(HistogramRange::Week, &now);
    assert_eq!(week.total(), stats.week);
}

/// Storage whose writes always fail: the degraded-mode path.
struct BrokenStorage;

impl Storage for BrokenStorage {
    fn read(&self, _blob: Blob) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&self, blob: Blob, _contents: &str) -> Result<(), StorageError> {
        Err(StorageError::WriteFailed {
            blob,
            message: "disk on fire".to_string(),
        })
    }
}

#[test]
fn failed_writes_degrade_without_losing_in_memory_state() {
    let mut engine = HabitEngine::with_storage(Box::new(BrokenStorage), &Config::default());
    assert!(!engine.storage_degraded());

    let id = engine.list_habits()[0].id;
    let outcome = engine.record_action(id);

    // The in-memory effect happened; the session is flagged degraded.
    assert_eq!(engine.settings().stage_progress, 1);
    assert_eq!(engine.stats(&Utc::now()).total, 1);
    assert_eq!(outcome.new_stage, 1);
    assert!(engine.storage_degraded());
}

#[test]
fn custom_threshold_table_drives_the_stage_count() {
    let config = Config {
        stage_thresholds: vec![2, 3],
        ..Config::default()
    };
    let mut engine = HabitEngine::with_storage(Box::new(MemoryStorage::new()), &config);
    let id = engine.list_habits()[0].id;

    assert!(!engine.record_action(id).stage_advanced);
    assert!(engine.record_action(id).stage_advanced);
    assert_eq!(engine.settings().stage, 2);

    for _ in 0..2 {
        assert!(!engine.record_action(id).stage_advanced);
    }
    let outcome = engine.record_action(id);
    assert!(outcome.stage_advanced);
    assert_eq!(outcome.new_stage, 3);
    assert_eq!(outcome.new_percent, 100); // terminal stage

    // Terminal: further actions no longer advance.
    assert!(!engine.record_action(id).stage_advanced);
    assert_eq!(engine.settings().stage, 3);
}
