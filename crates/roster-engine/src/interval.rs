//! Minute-of-day intervals and the two temporal tests the engine is built on.
//!
//! Everything upstream (availability checks, conflict detection, room
//! matching) reduces to `overlaps` or `contains` on these intervals. The two
//! are deliberately distinct: *overlap* is the conflict test between two
//! scheduled slots, *containment* is the stricter legality test of a proposed
//! slot against a free window. Partial overlap with an availability window is
//! never enough to schedule into it.
//!
//! Days carry no dates — the source system compares days by name only, so
//! `chrono::Weekday` is the whole calendar dimension.

use crate::error::{Result, RosterError};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Last valid minute of a day (23:59).
pub const MAX_MINUTE: u16 = 1439;

/// A half-open time range within a single day, in minutes since midnight.
///
/// Invariant: `start_min < end_min` and `end_min <= 1439`. Enforced by the
/// constructor; the fields are private so a constructed interval is always
/// well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", into = "RawInterval")]
pub struct TimeInterval {
    start_min: u16,
    end_min: u16,
}

/// Serde surrogate so deserialized intervals still pass the constructor.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInterval {
    start_minutes: u16,
    end_minutes: u16,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = RosterError;
    fn try_from(raw: RawInterval) -> Result<Self> {
        TimeInterval::new(raw.start_minutes, raw.end_minutes)
    }
}

impl From<TimeInterval> for RawInterval {
    fn from(iv: TimeInterval) -> Self {
        RawInterval {
            start_minutes: iv.start_min,
            end_minutes: iv.end_min,
        }
    }
}

impl TimeInterval {
    /// Build an interval from minutes since midnight.
    ///
    /// # Errors
    /// Returns `RosterError::InvalidInterval` when the range is empty,
    /// inverted, or extends past 23:59.
    pub fn new(start_min: u16, end_min: u16) -> Result<Self> {
        if start_min >= end_min {
            return Err(RosterError::InvalidInterval(format!(
                "start {start_min} must precede end {end_min}"
            )));
        }
        if end_min > MAX_MINUTE {
            return Err(RosterError::InvalidInterval(format!(
                "end {end_min} exceeds last minute of day ({MAX_MINUTE})"
            )));
        }
        Ok(Self { start_min, end_min })
    }

    /// Parse a `"HH:MM-HH:MM"` range.
    pub fn parse_range(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| RosterError::InvalidInterval(format!("expected HH:MM-HH:MM, got {s:?}")))?;
        Self::new(parse_hhmm(start)?, parse_hhmm(end)?)
    }

    pub fn start_min(&self) -> u16 {
        self.start_min
    }

    pub fn end_min(&self) -> u16 {
        self.end_min
    }

    /// Length of the interval in minutes.
    pub fn duration_min(&self) -> u16 {
        self.end_min - self.start_min
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    ///
    /// Symmetric. Touching boundaries (`a.end == b.start`) do NOT overlap —
    /// a class may start the minute another ends.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }

    /// True iff `inner` lies entirely within `self` (boundaries may touch).
    ///
    /// This is the legality test against an availability window: the whole
    /// proposed slot must fit inside one window.
    pub fn contains(&self, inner: &TimeInterval) -> bool {
        self.start_min <= inner.start_min && inner.end_min <= self.end_min
    }

    /// Minutes shared between two intervals (0 when they do not overlap).
    pub fn overlap_min(&self, other: &TimeInterval) -> u16 {
        let start = self.start_min.max(other.start_min);
        let end = self.end_min.min(other.end_min);
        end.saturating_sub(start)
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            format_hhmm(self.start_min),
            format_hhmm(self.end_min)
        )
    }
}

/// Parse `"HH:MM"` into minutes since midnight.
///
/// # Errors
/// Returns `RosterError::InvalidTime` for anything but a zero-padded or
/// unpadded 24-hour clock time.
pub fn parse_hhmm(s: &str) -> Result<u16> {
    let bad = || RosterError::InvalidTime(s.to_string());
    let (h, m) = s.trim().split_once(':').ok_or_else(bad)?;
    let h: u16 = h.parse().map_err(|_| bad())?;
    let m: u16 = m.parse().map_err(|_| bad())?;
    if h > 23 || m > 59 {
        return Err(bad());
    }
    Ok(h * 60 + m)
}

/// Render minutes since midnight as `"HH:MM"`.
pub fn format_hhmm(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parse a full day name (case-insensitive, e.g. `"Monday"`) into a weekday.
///
/// The external API transmits full English day names; short forms are not
/// part of the wire format and are rejected.
pub fn parse_day(s: &str) -> Result<Weekday> {
    match s.trim().to_ascii_lowercase().as_str() {
        "monday" => Ok(Weekday::Mon),
        "tuesday" => Ok(Weekday::Tue),
        "wednesday" => Ok(Weekday::Wed),
        "thursday" => Ok(Weekday::Thu),
        "friday" => Ok(Weekday::Fri),
        "saturday" => Ok(Weekday::Sat),
        "sunday" => Ok(Weekday::Sun),
        _ => Err(RosterError::InvalidDay(s.to_string())),
    }
}

/// Full English name of a weekday, matching the wire format.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
