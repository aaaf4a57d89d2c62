//! Room inventory filtering for a requested (day, interval, type).
//!
//! The upstream room query may pre-filter by type and day server-side, but
//! that filter is coarse; the matcher always re-verifies locally. Type
//! mismatches are excluded outright, independent of time. Rooms of the right
//! type that do not fit the requested interval are kept in the result with
//! `fits = false` so a caller can still display them as not-selectable.

use crate::calendar::AvailabilityCalendar;
use crate::error::RosterError;
use crate::interval::TimeInterval;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of teaching space. Matched exactly — a `"Lecture Hall"` record does
/// not satisfy a `Lecture` request unless it parses to the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    Lecture,
    Laboratory,
}

impl FromStr for RoomType {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lecture" => Ok(RoomType::Lecture),
            "laboratory" => Ok(RoomType::Laboratory),
            _ => Err(RosterError::InvalidRoomType(s.to_string())),
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomType::Lecture => write!(f, "Lecture"),
            RoomType::Laboratory => write!(f, "Laboratory"),
        }
    }
}

/// One bookable room and its weekly bookable hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub room_type: RoomType,
    pub capacity: u32,
    pub availability: AvailabilityCalendar,
}

/// Per-room outcome of a match: whether the requested interval fits inside
/// one of the room's windows on the requested day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFit {
    pub room_id: String,
    pub fits: bool,
}

/// Filter candidate rooms for a requested slot.
///
/// Rooms whose type differs from `expected_type` are dropped from the result
/// entirely. The remaining rooms each get a `RoomFit`: `fits` is true iff
/// some single window in the room's calendar for `day` contains `interval`.
pub fn match_rooms(
    rooms: &[Room],
    expected_type: RoomType,
    day: Weekday,
    interval: &TimeInterval,
) -> Vec<RoomFit> {
    rooms
        .iter()
        .filter(|room| room.room_type == expected_type)
        .map(|room| RoomFit {
            room_id: room.id.clone(),
            fits: room.availability.covers(day, interval),
        })
        .collect()
}

/// Ids of the rooms that pass the full match (right type, interval contained).
pub fn fitting_rooms(
    rooms: &[Room],
    expected_type: RoomType,
    day: Weekday,
    interval: &TimeInterval,
) -> Vec<String> {
    match_rooms(rooms, expected_type, day, interval)
        .into_iter()
        .filter(|fit| fit.fits)
        .map(|fit| fit.room_id)
        .collect()
}
