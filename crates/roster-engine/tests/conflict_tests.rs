//! Tests for conflict detection: shared-dimension tagging, priority order,
//! and fail-fast behavior.

use chrono::Weekday;
use roster_engine::conflict::{
    find_conflict_for_slot, find_conflicts, ConflictKind, ProposedSlot, ScheduleSlot, SectionRef,
    SlotKind,
};
use roster_engine::TimeInterval;

fn iv(sh: u16, sm: u16, eh: u16, em: u16) -> TimeInterval {
    TimeInterval::new(sh * 60 + sm, eh * 60 + em).unwrap()
}

fn committed(
    faculty: &str,
    day: Weekday,
    interval: TimeInterval,
    room: &str,
    subject: &str,
) -> ScheduleSlot {
    ScheduleSlot {
        owner_faculty_id: faculty.to_string(),
        day,
        interval,
        kind: SlotKind::Lec,
        room_id: room.to_string(),
        subject_id: subject.to_string(),
        section: None,
    }
}

fn proposed(day: Weekday, interval: TimeInterval, room: &str) -> ProposedSlot {
    ProposedSlot {
        kind: SlotKind::Lec,
        day,
        interval,
        room_id: room.to_string(),
        section: None,
    }
}

fn section(s: &str, p: &str, y: u8) -> SectionRef {
    SectionRef {
        section: s.to_string(),
        program: p.to_string(),
        year_level: y,
    }
}

// ── Shared dimensions ───────────────────────────────────────────────────────

#[test]
fn same_faculty_overlap_is_a_faculty_conflict() {
    // Committed: faculty X, Wed 10:00-11:30, Room 101.
    // Proposed:  faculty X, Wed 11:00-12:00, Room 202 — different room,
    // still a conflict through the shared faculty member.
    let existing = vec![committed("X", Weekday::Wed, iv(10, 0, 11, 30), "101", "MATH101")];
    let slot = proposed(Weekday::Wed, iv(11, 0, 12, 0), "202");

    let conflict = find_conflict_for_slot(&existing, &slot, 0, "X").expect("must conflict");
    assert_eq!(conflict.kind, ConflictKind::Faculty);
    assert_eq!(conflict.overlap_min, 30);
    assert_eq!(conflict.existing.subject_id, "MATH101");
}

#[test]
fn same_room_overlap_is_a_room_conflict() {
    let existing = vec![committed("Y", Weekday::Mon, iv(9, 0, 10, 0), "101", "PHYS1")];
    let slot = proposed(Weekday::Mon, iv(9, 30, 10, 30), "101");

    let conflict = find_conflict_for_slot(&existing, &slot, 0, "X").expect("must conflict");
    assert_eq!(conflict.kind, ConflictKind::Room);
}

#[test]
fn same_section_overlap_is_a_section_conflict() {
    let mut existing = committed("Y", Weekday::Mon, iv(9, 0, 10, 0), "101", "PHYS1");
    existing.section = Some(section("A", "BSCS", 2));

    let mut slot = proposed(Weekday::Mon, iv(9, 30, 10, 30), "202");
    slot.section = Some(section("A", "BSCS", 2));

    let conflict = find_conflict_for_slot(&[existing], &slot, 0, "X").expect("must conflict");
    assert_eq!(conflict.kind, ConflictKind::Section);
}

#[test]
fn section_requires_all_three_components_to_match() {
    let mut existing = committed("Y", Weekday::Mon, iv(9, 0, 10, 0), "101", "PHYS1");
    existing.section = Some(section("A", "BSCS", 2));

    // Same section letter and program, different year level.
    let mut slot = proposed(Weekday::Mon, iv(9, 30, 10, 30), "202");
    slot.section = Some(section("A", "BSCS", 3));

    assert!(find_conflict_for_slot(&[existing], &slot, 0, "X").is_none());
}

#[test]
fn missing_section_on_either_side_is_no_section_conflict() {
    let mut existing = committed("Y", Weekday::Mon, iv(9, 0, 10, 0), "101", "PHYS1");
    existing.section = Some(section("A", "BSCS", 2));

    // Proposed slot carries no section identity.
    let slot = proposed(Weekday::Mon, iv(9, 30, 10, 30), "202");
    assert!(find_conflict_for_slot(&[existing], &slot, 0, "X").is_none());
}

// ── Priority and fail-fast ──────────────────────────────────────────────────

#[test]
fn room_takes_priority_over_faculty() {
    // Same faculty AND same room: tagged as a room conflict.
    let existing = vec![committed("X", Weekday::Mon, iv(9, 0, 10, 0), "101", "PHYS1")];
    let slot = proposed(Weekday::Mon, iv(9, 30, 10, 30), "101");

    let conflict = find_conflict_for_slot(&existing, &slot, 0, "X").expect("must conflict");
    assert_eq!(conflict.kind, ConflictKind::Room);
}

#[test]
fn faculty_takes_priority_over_section() {
    let mut existing = committed("X", Weekday::Mon, iv(9, 0, 10, 0), "101", "PHYS1");
    existing.section = Some(section("A", "BSCS", 2));

    let mut slot = proposed(Weekday::Mon, iv(9, 30, 10, 30), "202");
    slot.section = Some(section("A", "BSCS", 2));

    let conflict = find_conflict_for_slot(&[existing], &slot, 0, "X").expect("must conflict");
    assert_eq!(conflict.kind, ConflictKind::Faculty);
}

#[test]
fn scan_stops_at_first_conflict_per_slot() {
    // Two committed slots both overlap the proposal; only the first is
    // reported.
    let existing = vec![
        committed("X", Weekday::Mon, iv(9, 0, 10, 0), "101", "FIRST"),
        committed("X", Weekday::Mon, iv(9, 0, 10, 0), "202", "SECOND"),
    ];
    let slot = proposed(Weekday::Mon, iv(9, 30, 10, 30), "303");

    let conflict = find_conflict_for_slot(&existing, &slot, 0, "X").expect("must conflict");
    assert_eq!(conflict.existing.subject_id, "FIRST");
}

// ── Non-conflicts ───────────────────────────────────────────────────────────

#[test]
fn different_day_never_conflicts() {
    let existing = vec![committed("X", Weekday::Tue, iv(9, 0, 10, 0), "101", "PHYS1")];
    let slot = proposed(Weekday::Wed, iv(9, 0, 10, 0), "101");

    assert!(find_conflict_for_slot(&existing, &slot, 0, "X").is_none());
}

#[test]
fn same_day_non_overlapping_never_conflicts() {
    let existing = vec![committed("X", Weekday::Mon, iv(8, 0, 9, 0), "101", "PHYS1")];
    let slot = proposed(Weekday::Mon, iv(9, 0, 10, 0), "101");

    assert!(
        find_conflict_for_slot(&existing, &slot, 0, "X").is_none(),
        "back-to-back slots in the same room are legal"
    );
}

#[test]
fn overlap_with_no_shared_dimension_is_not_a_conflict() {
    // Different faculty, different room, no sections: overlap is fine.
    let existing = vec![committed("Y", Weekday::Mon, iv(9, 0, 10, 0), "101", "PHYS1")];
    let slot = proposed(Weekday::Mon, iv(9, 30, 10, 30), "202");

    assert!(find_conflict_for_slot(&existing, &slot, 0, "X").is_none());
}

// ── Multi-slot requests ─────────────────────────────────────────────────────

#[test]
fn each_proposed_slot_is_checked_independently() {
    let existing = vec![committed("X", Weekday::Mon, iv(9, 0, 10, 0), "101", "PHYS1")];
    let slots = vec![
        proposed(Weekday::Mon, iv(9, 30, 10, 30), "202"), // faculty conflict
        proposed(Weekday::Tue, iv(9, 0, 10, 0), "101"),   // clean
    ];

    let conflicts = find_conflicts(&existing, &slots, "X");
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].proposed_index, 0);
    assert_eq!(conflicts[0].kind, ConflictKind::Faculty);
}

#[test]
fn proposed_slots_are_not_checked_against_each_other() {
    // Caller proposes overlapping LEC and LAB — the detector does not flag
    // intra-request overlap; that responsibility sits with the caller.
    let slots = vec![
        proposed(Weekday::Mon, iv(9, 0, 10, 0), "101"),
        proposed(Weekday::Mon, iv(9, 30, 10, 30), "101"),
    ];

    assert!(find_conflicts(&[], &slots, "X").is_empty());
}

#[test]
fn empty_inputs_produce_no_conflicts() {
    assert!(find_conflicts(&[], &[], "X").is_empty());
}
