//! The interactive assignment workflow, modeled as immutable values.
//!
//! A draft is the caller-level state of one in-progress assignment: chosen
//! subject, per-component schedule and room choices, and any server
//! rejections still pinned to a component. Every edit produces a new draft;
//! the pure validator is re-run on the new value, so local rejections clear
//! automatically the moment the offending input is corrected.
//!
//! The step ladder (`SelectSubject → SetSchedule → SelectRoom → Submit`) is
//! a convenience affordance for the surrounding screens, not a correctness
//! boundary — the engine validates whatever it is handed.
//!
//! Fetch staleness is handled by generation stamping: every relevant input
//! change bumps a counter, every in-flight fetch carries the generation it
//! was issued under, and a result is applied only if its generation is
//! still current. Stale results are discarded silently.

use crate::conflict::{ProposedSlot, SectionRef, SlotKind};
use crate::interval::TimeInterval;
use crate::validator::{AssignmentRequest, Rejection};
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Where the workflow currently stands. Monotone along the happy path;
/// editing an earlier input drops the draft back to the matching step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftStep {
    SelectSubject,
    SetSchedule,
    SelectRoom,
    Submit,
}

/// The day/time/room picked (so far) for one component of the subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotChoice {
    pub day: Option<Weekday>,
    pub interval: Option<TimeInterval>,
    pub room_id: Option<String>,
}

impl SlotChoice {
    fn has_schedule(&self) -> bool {
        self.day.is_some() && self.interval.is_some()
    }

    fn is_complete(&self) -> bool {
        self.has_schedule() && self.room_id.is_some()
    }
}

/// A server rejection pinned to the draft after a failed submission.
///
/// Unlike local rejections (recomputed from scratch on every edit), these
/// persist until the user edits the component they are attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedRejection {
    /// `None` for general, component-unresolvable rejections; those clear
    /// on any edit.
    pub component: Option<SlotKind>,
    pub rejection: Rejection,
}

/// One in-progress assignment, as an immutable value.
///
/// Edits return a fresh draft; a failed submission leaves the draft exactly
/// as it was, resubmittable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDraft {
    pub faculty_id: String,
    pub subject_id: Option<String>,
    pub section: Option<SectionRef>,
    pub lec: Option<SlotChoice>,
    pub lab: Option<SlotChoice>,
    pub server_rejections: Vec<PinnedRejection>,
}

impl AssignmentDraft {
    /// Start a blank draft for one faculty member.
    pub fn new(faculty_id: impl Into<String>) -> Self {
        Self {
            faculty_id: faculty_id.into(),
            ..Self::default()
        }
    }

    /// Choose the subject. `needs_lec`/`needs_lab` come from the subject's
    /// non-zero components and decide which slot choices the draft tracks.
    /// Resets all schedule state and clears every server rejection.
    pub fn with_subject(&self, subject_id: impl Into<String>, needs_lec: bool, needs_lab: bool) -> Self {
        Self {
            faculty_id: self.faculty_id.clone(),
            subject_id: Some(subject_id.into()),
            section: self.section.clone(),
            lec: needs_lec.then(SlotChoice::default),
            lab: needs_lab.then(SlotChoice::default),
            server_rejections: Vec::new(),
        }
    }

    pub fn with_section(&self, section: SectionRef) -> Self {
        let mut next = self.clone();
        next.section = Some(section);
        next
    }

    /// Set day and time for one component. Clears that component's room
    /// choice (a room fit is only meaningful for a fixed slot) and any
    /// server rejections pinned to the component.
    pub fn with_schedule(&self, kind: SlotKind, day: Weekday, interval: TimeInterval) -> Self {
        let mut next = self.clone();
        {
            let choice = next.choice_mut(kind);
            choice.day = Some(day);
            choice.interval = Some(interval);
            choice.room_id = None;
        }
        next.clear_component_rejections(kind);
        next
    }

    /// Set the room for one component; clears server rejections pinned to it.
    pub fn with_room(&self, kind: SlotKind, room_id: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.choice_mut(kind).room_id = Some(room_id.into());
        next.clear_component_rejections(kind);
        next
    }

    /// Pin the mapped rejections of a failed submission onto the draft.
    /// The draft's inputs are untouched — it remains resubmittable as-is.
    pub fn with_server_rejections(&self, pinned: Vec<PinnedRejection>) -> Self {
        let mut next = self.clone();
        next.server_rejections = pinned;
        next
    }

    fn choice_mut(&mut self, kind: SlotKind) -> &mut SlotChoice {
        let slot = match kind {
            SlotKind::Lec => &mut self.lec,
            SlotKind::Lab => &mut self.lab,
        };
        slot.get_or_insert_with(SlotChoice::default)
    }

    /// Editing a component clears its pinned rejections plus all general
    /// ones; rejections pinned to the *other* component survive.
    fn clear_component_rejections(&mut self, kind: SlotKind) {
        self.server_rejections
            .retain(|p| p.component.is_some_and(|c| c != kind));
    }

    fn choices(&self) -> impl Iterator<Item = (SlotKind, &SlotChoice)> {
        [
            (SlotKind::Lec, self.lec.as_ref()),
            (SlotKind::Lab, self.lab.as_ref()),
        ]
        .into_iter()
        .filter_map(|(kind, choice)| choice.map(|c| (kind, c)))
    }

    /// Current step on the ladder. `verdict_accepted` is the outcome of the
    /// latest validation run over this draft; `Submit` is reachable only
    /// once everything is filled in, the validator accepts, and no server
    /// rejection is pinned.
    pub fn step(&self, verdict_accepted: bool) -> DraftStep {
        if self.subject_id.is_none() {
            return DraftStep::SelectSubject;
        }
        let mut choices = self.choices().peekable();
        if choices.peek().is_none() {
            return DraftStep::SelectSubject;
        }
        if !self.choices().all(|(_, c)| c.has_schedule()) {
            return DraftStep::SetSchedule;
        }
        if !self.choices().all(|(_, c)| c.is_complete()) {
            return DraftStep::SelectRoom;
        }
        if verdict_accepted && self.server_rejections.is_empty() {
            DraftStep::Submit
        } else {
            DraftStep::SelectRoom
        }
    }

    /// Assemble the transient request for validation/submission, or `None`
    /// while any component is still incomplete.
    pub fn to_request(&self) -> Option<AssignmentRequest> {
        let subject_id = self.subject_id.clone()?;
        let mut proposed_slots = Vec::new();
        for (kind, choice) in self.choices() {
            proposed_slots.push(ProposedSlot {
                kind,
                day: choice.day?,
                interval: choice.interval?,
                room_id: choice.room_id.clone()?,
                section: self.section.clone(),
            });
        }
        if proposed_slots.is_empty() {
            return None;
        }
        Some(AssignmentRequest {
            faculty_id: self.faculty_id.clone(),
            subject_id,
            proposed_slots,
        })
    }
}

/// Stamp carried by one in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation(u64);

/// Monotonic counter tracking the latest relevant input state.
///
/// Bump it on every change that invalidates in-flight fetches (day, time,
/// room type, subject). Issue a `Generation` when starting a fetch; when the
/// fetch resolves, apply its result only if the stamp is still current.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate everything in flight.
    pub fn bump(&mut self) {
        self.current += 1;
    }

    /// Stamp for a fetch starting now.
    pub fn issue(&self) -> Generation {
        Generation(self.current)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.current
    }

    /// Gate a resolved fetch result: `Some(value)` if the stamp is still
    /// current, `None` (discard, no error) if inputs changed meanwhile.
    pub fn accept_if_current<T>(&self, generation: Generation, value: T) -> Option<T> {
        self.is_current(generation).then_some(value)
    }
}
