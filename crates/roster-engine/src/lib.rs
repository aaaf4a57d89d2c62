//! # roster-engine
//!
//! Assignment validation and conflict detection for academic timetabling.
//!
//! Given a faculty member, a subject's lecture/laboratory requirements, the
//! faculty's declared weekly availability, the committed teaching schedule,
//! and a room inventory, the engine decides whether a proposed
//! (day, time, room) assignment is legal, computes the resulting load
//! exposure, and narrows the room list to those free for the exact slot.
//!
//! The engine is a pure function of its inputs: no I/O, no internal state.
//! Its acceptance is advisory — the backend re-validates atomically at
//! commit time, and a post-accept server rejection is an expected outcome.
//!
//! ## Modules
//!
//! - [`interval`] — minute-of-day intervals; overlap vs. containment
//! - [`calendar`] — day → ordered disjoint free windows
//! - [`load`] — normal/overload/exceeded load accounting
//! - [`rooms`] — room inventory matching by type and containment
//! - [`conflict`] — overlap detection against the committed schedule
//! - [`validator`] — the orchestrated accept/reject verdict
//! - [`dto`] — wire-shape boundary types and normalization
//! - [`draft`] — immutable interactive workflow state, generation stamping
//! - [`error`] — error types

pub mod calendar;
pub mod conflict;
pub mod draft;
pub mod dto;
pub mod error;
pub mod interval;
pub mod load;
pub mod rooms;
pub mod validator;

pub use calendar::AvailabilityCalendar;
pub use conflict::{find_conflicts, Conflict, ConflictKind, ProposedSlot, ScheduleSlot, SlotKind};
pub use error::RosterError;
pub use interval::TimeInterval;
pub use load::{LoadAccount, LoadStatus};
pub use rooms::{match_rooms, Room, RoomFit, RoomType};
pub use validator::{validate, AssignmentRequest, Rejection, ValidationContext, Verdict};
