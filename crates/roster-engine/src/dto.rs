//! Boundary DTOs for the external administration API.
//!
//! The API speaks loosely-typed JSON: full day names, `"HH:MM"` clock
//! strings, declared hours as numbers. Everything here is a pure
//! normalization step between that wire shape and the engine's types —
//! nothing loosely typed reaches the validator.

use crate::calendar::AvailabilityCalendar;
use crate::conflict::SlotKind;
use crate::error::Result;
use crate::interval::{self, TimeInterval};
use crate::load::LoadAccount;
use crate::validator::{AssignmentRequest, Rejection, SubjectRequirement};
use serde::{Deserialize, Serialize};

/// One availability window as transmitted: `{"start":"08:00","end":"12:00"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDto {
    pub start: String,
    pub end: String,
}

/// Windows for one named day, e.g. `{"day":"Monday","windows":[...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindowsDto {
    pub day: String,
    pub windows: Vec<WindowDto>,
}

/// Parse a full per-day availability mapping into a calendar.
///
/// Windows are normalized on insertion; a read-modify-write of faculty
/// availability replaces the whole mapping, so this is the only ingestion
/// path.
///
/// # Errors
/// `RosterError::InvalidDay` / `InvalidTime` / `InvalidInterval` on any
/// malformed entry; nothing is partially applied.
pub fn parse_availability(days: &[DayWindowsDto]) -> Result<AvailabilityCalendar> {
    let mut calendar = AvailabilityCalendar::new();
    for entry in days {
        let day = interval::parse_day(&entry.day)?;
        for window in &entry.windows {
            let iv = TimeInterval::new(
                interval::parse_hhmm(&window.start)?,
                interval::parse_hhmm(&window.end)?,
            )?;
            calendar.add_window(day, iv);
        }
    }
    Ok(calendar)
}

/// Render a calendar back into the wire shape, days in Monday-first order.
pub fn availability_to_dto(calendar: &AvailabilityCalendar) -> Vec<DayWindowsDto> {
    calendar
        .days()
        .map(|day| DayWindowsDto {
            day: interval::day_name(day).to_string(),
            windows: calendar
                .windows_on(day)
                .iter()
                .map(|w| WindowDto {
                    start: interval::format_hhmm(w.start_min()),
                    end: interval::format_hhmm(w.end_min()),
                })
                .collect(),
        })
        .collect()
}

/// Response of the current-load query for a faculty member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadQueryDto {
    pub current_assigned_units: f64,
    pub assigned_subject_ids: Vec<String>,
}

impl LoadQueryDto {
    /// Combine the fetched commitment with the caps from the faculty record.
    pub fn into_account(self, normal_cap_units: f64, overload_cap_units: f64) -> LoadAccount {
        LoadAccount::new(normal_cap_units, overload_cap_units, self.current_assigned_units)
    }
}

/// Raw subject record fields relevant to assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDto {
    pub id: String,
    pub lec_hours: f64,
    pub lab_hours: f64,
    pub units: f64,
}

impl SubjectDto {
    /// Declared weekly hours → contact minutes per component.
    pub fn requirement(&self) -> SubjectRequirement {
        SubjectRequirement {
            lec_minutes_per_week: (self.lec_hours * 60.0).round() as u16,
            lab_minutes_per_week: (self.lab_hours * 60.0).round() as u16,
        }
    }
}

/// One schedule line of a commit payload: `{"kind":"LEC","day":"Monday",
/// "time":"09:00-10:30","roomId":"R101"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitScheduleDto {
    pub kind: SlotKind,
    pub day: String,
    pub time: String,
    pub room_id: String,
}

/// The assignment commit payload submitted to the backend.
///
/// The backend treats the whole payload atomically: either every schedule
/// line is committed or none is. It also re-validates authoritatively —
/// a locally accepted request may still come back rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRequestDto {
    pub faculty_id: String,
    pub subject_id: String,
    pub schedules: Vec<CommitScheduleDto>,
}

impl CommitRequestDto {
    /// Build the commit payload from a locally accepted request.
    pub fn from_request(request: &AssignmentRequest) -> Self {
        Self {
            faculty_id: request.faculty_id.clone(),
            subject_id: request.subject_id.clone(),
            schedules: request
                .proposed_slots
                .iter()
                .map(|slot| CommitScheduleDto {
                    kind: slot.kind,
                    day: interval::day_name(slot.day).to_string(),
                    time: slot.interval.to_string(),
                    room_id: slot.room_id.clone(),
                })
                .collect(),
        }
    }
}

/// One component-tagged server error, keyed `"LEC"` or `"LAB"` where the
/// server could resolve the component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentErrorDto {
    pub component: SlotKind,
    pub message: String,
}

/// Structured rejection body returned by the backend on commit failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRejectionDto {
    #[serde(default)]
    pub errors: Vec<ComponentErrorDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ServerRejectionDto {
    /// Map server errors into the local rejection taxonomy so both surfaces
    /// present identically.
    ///
    /// Component-tagged messages are classified by keyword; anything
    /// unclassifiable (including the untagged general message) lands in
    /// `Rejection::General`. `request` supplies the slot index each
    /// component maps to.
    pub fn into_rejections(self, request: &AssignmentRequest) -> Vec<Rejection> {
        let mut rejections = Vec::new();

        for error in self.errors {
            let slot_index = request
                .proposed_slots
                .iter()
                .position(|slot| slot.kind == error.component);
            rejections.push(classify_message(&error.message, slot_index, request));
        }

        if let Some(message) = self.message {
            rejections.push(Rejection::General { message });
        }

        rejections
    }
}

fn classify_message(
    message: &str,
    slot_index: Option<usize>,
    request: &AssignmentRequest,
) -> Rejection {
    let lower = message.to_ascii_lowercase();
    let Some(slot_index) = slot_index else {
        return Rejection::General { message: message.to_string() };
    };

    if lower.contains("availab") {
        Rejection::OutsideAvailability { slot_index }
    } else if lower.contains("load") {
        // Server load messages carry no figures; zeros mean "see server".
        Rejection::LoadExceeded { potential_total_units: 0.0, total_cap_units: 0.0 }
    } else if lower.contains("room") && lower.contains("conflict") {
        Rejection::RoomConflict { slot_index, existing_subject_id: String::new() }
    } else if lower.contains("section") && lower.contains("conflict") {
        Rejection::SectionConflict { slot_index, existing_subject_id: String::new() }
    } else if lower.contains("conflict") || lower.contains("schedule") {
        Rejection::FacultyConflict { slot_index, existing_subject_id: String::new() }
    } else if lower.contains("room") {
        let room_id = request
            .proposed_slots
            .get(slot_index)
            .map(|s| s.room_id.clone())
            .unwrap_or_default();
        Rejection::RoomUnavailable { slot_index, room_id }
    } else {
        Rejection::General { message: message.to_string() }
    }
}
