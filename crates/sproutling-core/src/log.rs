//! Append-only event log.
//!
//! Every tap on a habit button appends one timestamped [`Event`].
//! Insertion order is chronological order and is never reordered; undo
//! removes the most recent matching event (LIFO per habit). Queries are
//! linear scans over the full log -- no index is maintained, which is an
//! accepted trade-off at the log sizes a single user produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded habit action.
///
/// Records written before habit ids existed carry `habit_id: None` and are
/// identified by label text only; lookups fall back to label equality for
/// those (legacy compatibility).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub habit_id: Option<Uuid>,
    #[serde(alias = "decisionLabel")]
    pub label: String,
    pub timestamp: DateTime<Utc>,
}

impl Event {
    /// Whether this event belongs to the habit identified by `habit_id` /
    /// `label`. Legacy records without an id match by label.
    pub fn matches(&self, habit_id: Uuid, label: &str) -> bool {
        match self.habit_id {
            Some(id) => id == habit_id,
            None => self.label == label,
        }
    }
}

/// The persisted, append-only list of events.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Append one event. Always succeeds in memory; durability is the
    /// engine's commit step, not the log's concern.
    pub fn append(
        &mut self,
        habit_id: Option<Uuid>,
        label: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.events.push(Event {
            id,
            habit_id,
            label: label.into(),
            timestamp,
        });
        id
    }

    /// Remove the most recent event matching the habit (by id, falling
    /// back to label for legacy records). Returns whether a removal
    /// occurred.
    pub fn remove_last_matching(&mut self, habit_id: Uuid, label: &str) -> bool {
        match self.events.iter().rposition(|e| e.matches(habit_id, label)) {
            Some(pos) => {
                self.events.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Count events satisfying `pred`. Linear scan.
    pub fn count_where<F>(&self, pred: F) -> u64
    where
        F: Fn(&Event) -> bool,
    {
        self.events.iter().filter(|e| pred(e)).count() as u64
    }

    /// Distribute events into `buckets` counters. `bucket_fn` returns the
    /// bucket index for an event, or `None` to leave it out; out-of-range
    /// indices are also left out.
    pub fn bucketize<F>(&self, buckets: usize, bucket_fn: F) -> Vec<u64>
    where
        F: Fn(&Event) -> Option<usize>,
    {
        let mut counts = vec![0u64; buckets];
        for event in &self.events {
            if let Some(idx) = bucket_fn(event) {
                if idx < buckets {
                    counts[idx] += 1;
                }
            }
        }
        counts
    }
}
