//! Calendar-bucketed statistics over the event log.
//!
//! Pure queries: an immutable log snapshot plus a reference instant
//! `now`, recomputed on demand. Comparisons are wall-clock calendar
//! comparisons in `now`'s timezone -- "today" is the same (year, month,
//! day), "this week" the same ISO-8601 week (Monday start, Jan-4 rule).
//! Events are stored in UTC and converted per query.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::log::EventLog;
use crate::registry::HabitRegistry;

/// Scalar counts for the stats HUD.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub today: u64,
    pub week: u64,
    pub month: u64,
    pub total: u64,
}

impl Stats {
    /// Single pass over the log; an empty log yields all zeros.
    pub fn collect<Tz: TimeZone>(log: &EventLog, now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let mut stats = Stats::default();
        for event in log.iter() {
            let ts = event.timestamp.with_timezone(&tz);
            if same_day(&ts, now) {
                stats.today += 1;
            }
            if same_iso_week(&ts, now) {
                stats.week += 1;
            }
            if same_month(&ts, now) {
                stats.month += 1;
            }
            stats.total += 1;
        }
        stats
    }
}

/// Chart granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistogramRange {
    /// 24 hour buckets of today's events.
    Day,
    /// 7 weekday buckets (Mon..Sun) of this ISO week.
    Week,
    /// `ceil(days_in_month / 7)` buckets of this month, 7 days each.
    Month,
    /// 12 month buckets of this calendar year.
    Year,
}

impl std::str::FromStr for HistogramRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!("unknown range '{other}' (day|week|month|year)")),
        }
    }
}

/// Fixed-length ordered bucket counts for one [`HistogramRange`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Histogram {
    pub range: HistogramRange,
    pub buckets: Vec<u64>,
}

impl Histogram {
    pub fn collect<Tz: TimeZone>(log: &EventLog, range: HistogramRange, now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let buckets = match range {
            HistogramRange::Day => log.bucketize(24, |event| {
                let ts = event.timestamp.with_timezone(&tz);
                same_day(&ts, now).then(|| ts.hour() as usize)
            }),
            HistogramRange::Week => log.bucketize(7, |event| {
                let ts = event.timestamp.with_timezone(&tz);
                same_iso_week(&ts, now).then(|| ts.weekday().num_days_from_monday() as usize)
            }),
            HistogramRange::Month => {
                let days = days_in_month(now.year(), now.month());
                let buckets = days.div_ceil(7) as usize;
                log.bucketize(buckets, |event| {
                    let ts = event.timestamp.with_timezone(&tz);
                    same_month(&ts, now).then(|| ((ts.day() - 1) / 7) as usize)
                })
            }
            HistogramRange::Year => log.bucketize(12, |event| {
                let ts = event.timestamp.with_timezone(&tz);
                same_year(&ts, now).then(|| ts.month0() as usize)
            }),
        };
        Self { range, buckets }
    }

    /// Largest bucket, floored at 1 so display scaling never divides by
    /// zero on an empty log.
    pub fn scale_max(&self) -> u64 {
        self.buckets.iter().copied().max().unwrap_or(0).max(1)
    }

    pub fn total(&self) -> u64 {
        self.buckets.iter().sum()
    }
}

/// All-time event count per habit id. Legacy events without an id are
/// attributed by label match against the registry; events whose habit has
/// been deleted still count under their recorded id.
pub fn per_habit_counts(log: &EventLog, registry: &HabitRegistry) -> HashMap<Uuid, u64> {
    let mut counts = HashMap::new();
    for event in log.iter() {
        let key = event
            .habit_id
            .or_else(|| registry.find_by_label(&event.label).map(|b| b.id));
        if let Some(id) = key {
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    counts
}

fn same_day<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

fn same_iso_week<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    a.iso_week().year() == b.iso_week().year() && a.iso_week().week() == b.iso_week().week()
}

fn same_month<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn same_year<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    a.year() == b.year()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 31;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next {
        Some(next) => (next - first).num_days() as u32,
        None => 31,
    }
}
