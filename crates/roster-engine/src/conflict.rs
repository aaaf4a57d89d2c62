//! Conflict detection between proposed slots and the committed schedule.
//!
//! A conflict is two slots on the same day with overlapping intervals that
//! share a resource: the room, the faculty member, or the section. Adjacent
//! slots (one ends exactly when the other starts) are not conflicts.
//!
//! Detection is fail-fast per proposed slot: the first conflict found, in
//! room → faculty → section priority, terminates the scan for that slot.
//! Proposed slots within one request are not checked against each other —
//! the caller is responsible for not proposing overlapping LEC/LAB slots.

use crate::interval::TimeInterval;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Lecture or laboratory component of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlotKind {
    Lec,
    Lab,
}

/// Identity of a class section: all three components must match for two
/// slots to belong to the same section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRef {
    pub section: String,
    pub program: String,
    pub year_level: u8,
}

/// A committed assignment, as recorded by the backend. Never mutated here;
/// superseded or deleted only by external operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub owner_faculty_id: String,
    pub day: Weekday,
    pub interval: TimeInterval,
    pub kind: SlotKind,
    pub room_id: String,
    pub subject_id: String,
    pub section: Option<SectionRef>,
}

/// A transient slot being proposed as part of one assignment request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedSlot {
    pub kind: SlotKind,
    pub day: Weekday,
    pub interval: TimeInterval,
    pub room_id: String,
    pub section: Option<SectionRef>,
}

/// The shared dimension that makes an overlap a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictKind {
    Room,
    Faculty,
    Section,
}

/// A detected conflict between one proposed slot and one committed slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub kind: ConflictKind,
    /// Index of the offending slot within the request's proposed slots.
    pub proposed_index: usize,
    pub existing: ScheduleSlot,
    pub overlap_min: u16,
}

/// Find the first conflict for a single proposed slot against the committed
/// schedule.
///
/// Only same-day committed slots are considered. On interval overlap the
/// shared dimension is checked in priority order: same room, then same
/// faculty (the member the request assigns to), then same section — where
/// "same section" requires both sides to carry a section and all of
/// section, program, and year level to match.
pub fn find_conflict_for_slot(
    committed: &[ScheduleSlot],
    proposed: &ProposedSlot,
    proposed_index: usize,
    faculty_id: &str,
) -> Option<Conflict> {
    for existing in committed {
        if existing.day != proposed.day {
            continue;
        }
        if !existing.interval.overlaps(&proposed.interval) {
            continue;
        }

        let kind = if existing.room_id == proposed.room_id {
            ConflictKind::Room
        } else if existing.owner_faculty_id == faculty_id {
            ConflictKind::Faculty
        } else if let (Some(a), Some(b)) = (&existing.section, &proposed.section) {
            if a == b {
                ConflictKind::Section
            } else {
                continue;
            }
        } else {
            continue;
        };

        return Some(Conflict {
            kind,
            proposed_index,
            overlap_min: existing.interval.overlap_min(&proposed.interval),
            existing: existing.clone(),
        });
    }
    None
}

/// Scan every proposed slot of a request, fail-fast per slot.
///
/// Returns one conflict per offending slot (its first), in proposal order.
pub fn find_conflicts(
    committed: &[ScheduleSlot],
    proposed: &[ProposedSlot],
    faculty_id: &str,
) -> Vec<Conflict> {
    proposed
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| find_conflict_for_slot(committed, slot, i, faculty_id))
        .collect()
}
