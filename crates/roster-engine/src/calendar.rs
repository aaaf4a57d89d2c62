//! Per-entity availability calendars: day → ordered disjoint free windows.
//!
//! The same structure describes a faculty member's declared weekly
//! availability and a room's bookable hours. Windows are normalized on
//! insertion (sorted, overlapping or adjacent windows merged) so every query
//! sees an ordered, disjoint sequence. The engine only ever reads a
//! calendar — ownership of its contents stays with the availability
//! management screens that produced it.

use crate::error::RosterError;
use crate::interval::{self, TimeInterval};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weekly free-time windows for one entity (faculty member or room).
///
/// Serializes as a map of full day names to window lists, matching the
/// per-day shape the external availability endpoints use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCalendar", into = "RawCalendar")]
pub struct AvailabilityCalendar {
    // BTreeMap keyed by weekday number keeps iteration order deterministic.
    windows: BTreeMap<u8, Vec<TimeInterval>>,
}

/// Serde surrogate keyed by day name; re-normalizes on deserialization.
#[derive(Serialize, Deserialize)]
struct RawCalendar {
    windows: BTreeMap<String, Vec<TimeInterval>>,
}

impl TryFrom<RawCalendar> for AvailabilityCalendar {
    type Error = RosterError;

    fn try_from(raw: RawCalendar) -> Result<Self, RosterError> {
        let mut calendar = AvailabilityCalendar::new();
        for (day, windows) in raw.windows {
            let day = interval::parse_day(&day)?;
            for window in windows {
                calendar.add_window(day, window);
            }
        }
        Ok(calendar)
    }
}

impl From<AvailabilityCalendar> for RawCalendar {
    fn from(calendar: AvailabilityCalendar) -> Self {
        RawCalendar {
            windows: calendar
                .windows
                .iter()
                .map(|(&n, windows)| {
                    (
                        interval::day_name(weekday_from_index(n)).to_string(),
                        windows.clone(),
                    )
                })
                .collect(),
        }
    }
}

impl AvailabilityCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a free window on a day, merging with existing windows.
    ///
    /// Overlapping or back-to-back windows coalesce into one, so
    /// `08:00-10:00` plus `10:00-12:00` is stored as `08:00-12:00`.
    pub fn add_window(&mut self, day: Weekday, window: TimeInterval) {
        let entries = self
            .windows
            .entry(day.num_days_from_monday() as u8)
            .or_default();
        entries.push(window);
        *entries = normalize(std::mem::take(entries));
    }

    /// Ordered disjoint free windows for a day; empty when the entity has
    /// declared nothing for that day.
    pub fn windows_on(&self, day: Weekday) -> &[TimeInterval] {
        self.windows
            .get(&(day.num_days_from_monday() as u8))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True iff some single window on `day` fully contains `interval`.
    ///
    /// This is the only legality test the engine runs against a calendar.
    /// An interval straddling two windows, or hanging past the edge of one,
    /// is not covered even though it overlaps free time.
    pub fn covers(&self, day: Weekday, interval: &TimeInterval) -> bool {
        self.windows_on(day).iter().any(|w| w.contains(interval))
    }

    /// Days that have at least one window, in Monday-first order.
    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.windows.keys().map(|&n| weekday_from_index(n))
    }

    pub fn is_empty(&self) -> bool {
        self.windows.values().all(Vec::is_empty)
    }
}

fn weekday_from_index(n: u8) -> Weekday {
    match n {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

/// Sort windows by start and merge overlapping or adjacent ones.
///
/// Returns a sorted, disjoint list. Idempotent.
fn normalize(mut windows: Vec<TimeInterval>) -> Vec<TimeInterval> {
    if windows.len() < 2 {
        return windows;
    }
    windows.sort_by_key(|w| (w.start_min(), w.end_min()));

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(windows.len());
    for window in windows {
        if let Some(last) = merged.last() {
            if window.start_min() <= last.end_min() {
                // Overlapping or adjacent — extend the current window.
                // Both bounds came from valid intervals, so the union is valid.
                let extended =
                    TimeInterval::new(last.start_min(), last.end_min().max(window.end_min()))
                        .expect("union of valid intervals is valid");
                *merged.last_mut().expect("just checked non-empty") = extended;
                continue;
            }
        }
        merged.push(window);
    }
    merged
}
