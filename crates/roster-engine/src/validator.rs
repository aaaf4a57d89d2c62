//! Assignment validation — the single accept/reject verdict.
//!
//! Orchestrates the calendar, load, room, and conflict checks over one
//! `AssignmentRequest`. The validator is a pure function of the request and
//! a caller-assembled context snapshot; it performs no I/O and holds no
//! state, so it is safe to re-run on every input change.
//!
//! Client-side acceptance is advisory only: the context may be stale
//! relative to other actors, and the backend re-validates atomically at
//! commit time. A server rejection after a local accept is an expected
//! outcome, not a bug.

use crate::calendar::AvailabilityCalendar;
use crate::conflict::{self, ConflictKind, ProposedSlot, ScheduleSlot, SlotKind};
use crate::load::{LoadAccount, LoadAssessment, LoadStatus};
use crate::rooms::{self, Room, RoomType};
use serde::{Deserialize, Serialize};

/// Weekly contact-minute requirement of a subject, split by component.
///
/// Produced by normalizing a raw subject record (declared lecture/lab hours
/// × 60); zero means the subject has no such component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRequirement {
    pub lec_minutes_per_week: u16,
    pub lab_minutes_per_week: u16,
}

impl SubjectRequirement {
    pub fn minutes_for(&self, kind: SlotKind) -> u16 {
        match kind {
            SlotKind::Lec => self.lec_minutes_per_week,
            SlotKind::Lab => self.lab_minutes_per_week,
        }
    }
}

/// One subject-to-faculty assignment proposal: one proposed slot per
/// non-zero component of the subject. Transient — built by the caller,
/// discarded after validation and submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub faculty_id: String,
    pub subject_id: String,
    pub proposed_slots: Vec<ProposedSlot>,
}

/// Everything the validator reads, snapshotted by the caller at one point
/// in time. The validator never reaches out for fresher data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationContext {
    /// The assignee's declared weekly availability.
    pub faculty_availability: AvailabilityCalendar,
    /// The assignee's load caps and current commitment.
    pub load: LoadAccount,
    /// Unit cost of the subject being added.
    pub new_units: f64,
    /// The subject's weekly contact-minute requirement per component.
    pub requirement: SubjectRequirement,
    /// Candidate rooms. May be pre-filtered upstream; re-verified locally.
    pub rooms: Vec<Room>,
    /// All committed schedule slots visible to the client.
    pub committed: Vec<ScheduleSlot>,
}

/// Why a request (or one of its slots) cannot be submitted.
///
/// The same taxonomy is used for local pre-checks and for mapped server
/// rejections, so both surfaces look identical to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Rejection {
    /// No single availability window of the faculty member contains the slot.
    OutsideAvailability { slot_index: usize },
    /// The slot is longer than the subject requires for its component.
    DurationExceeded { slot_index: usize, required_min: u16, requested_min: u16 },
    /// The chosen room is the wrong type or not free for the exact slot.
    RoomUnavailable { slot_index: usize, room_id: String },
    /// Overlap with a committed slot of the same faculty member.
    FacultyConflict { slot_index: usize, existing_subject_id: String },
    /// Overlap with a committed slot in the same room.
    RoomConflict { slot_index: usize, existing_subject_id: String },
    /// Overlap with a committed slot of the same section/program/year.
    SectionConflict { slot_index: usize, existing_subject_id: String },
    /// The addition would push the faculty member past normal + overload.
    LoadExceeded { potential_total_units: f64, total_cap_units: f64 },
    /// Server-side rejection that maps to no specific component.
    General { message: String },
}

/// Outcome for one proposed slot: its first failure, or a pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotReport {
    pub slot_index: usize,
    pub kind: SlotKind,
    pub rejection: Option<Rejection>,
}

/// Overall decision plus per-component diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub accepted: bool,
    /// Every rejection found (one per failing slot, plus load if exceeded).
    pub rejections: Vec<Rejection>,
    /// Per-slot diagnostics, one entry per proposed slot, in order.
    pub slots: Vec<SlotReport>,
    /// Load assessment for the whole request.
    pub load: LoadAssessment,
    /// True when the assignment proceeds only by dipping into overload
    /// capacity. Non-blocking.
    pub overload_notice: bool,
}

fn expected_room_type(kind: SlotKind) -> RoomType {
    match kind {
        SlotKind::Lec => RoomType::Lecture,
        SlotKind::Lab => RoomType::Laboratory,
    }
}

/// Check one proposed slot, fail-fast: availability containment, then
/// duration, then room fit, then conflicts.
fn check_slot(
    request: &AssignmentRequest,
    context: &ValidationContext,
    index: usize,
    slot: &ProposedSlot,
) -> Option<Rejection> {
    // 1. The whole slot must sit inside one of the faculty's free windows.
    if !context.faculty_availability.covers(slot.day, &slot.interval) {
        return Some(Rejection::OutsideAvailability { slot_index: index });
    }

    // 2. The slot may be shorter than the component requires (split across
    //    days), never longer.
    let required = context.requirement.minutes_for(slot.kind);
    let requested = slot.interval.duration_min();
    if requested > required {
        return Some(Rejection::DurationExceeded {
            slot_index: index,
            required_min: required,
            requested_min: requested,
        });
    }

    // 3. The chosen room must be in the fitting set for this exact slot.
    let fitting = rooms::fitting_rooms(
        &context.rooms,
        expected_room_type(slot.kind),
        slot.day,
        &slot.interval,
    );
    if !fitting.iter().any(|id| *id == slot.room_id) {
        return Some(Rejection::RoomUnavailable {
            slot_index: index,
            room_id: slot.room_id.clone(),
        });
    }

    // 4. No overlap with any committed slot sharing a resource.
    if let Some(found) =
        conflict::find_conflict_for_slot(&context.committed, slot, index, &request.faculty_id)
    {
        let existing_subject_id = found.existing.subject_id;
        return Some(match found.kind {
            ConflictKind::Room => Rejection::RoomConflict { slot_index: index, existing_subject_id },
            ConflictKind::Faculty => {
                Rejection::FacultyConflict { slot_index: index, existing_subject_id }
            }
            ConflictKind::Section => {
                Rejection::SectionConflict { slot_index: index, existing_subject_id }
            }
        });
    }

    None
}

/// Validate an assignment request against a context snapshot.
///
/// Every proposed slot is checked (each reports its first failure); the
/// load account is assessed once per request. The verdict is an accept only
/// when every slot passes and load is not exceeded. `Overload` status never
/// blocks — it is surfaced as `overload_notice`.
pub fn validate(request: &AssignmentRequest, context: &ValidationContext) -> Verdict {
    let mut rejections = Vec::new();
    let mut slots = Vec::with_capacity(request.proposed_slots.len());

    for (index, slot) in request.proposed_slots.iter().enumerate() {
        let rejection = check_slot(request, context, index, slot);
        if let Some(r) = &rejection {
            rejections.push(r.clone());
        }
        slots.push(SlotReport {
            slot_index: index,
            kind: slot.kind,
            rejection,
        });
    }

    let load = context.load.assess(context.new_units);
    if load.status == LoadStatus::Exceeded {
        rejections.push(Rejection::LoadExceeded {
            potential_total_units: load.potential_total_units,
            total_cap_units: load.total_cap_units,
        });
    }

    Verdict {
        accepted: rejections.is_empty(),
        rejections,
        slots,
        load,
        overload_notice: load.status == LoadStatus::Overload,
    }
}
