//! Faculty teaching-load accounting.
//!
//! A load account is derived, never stored: it is recomputed from the
//! faculty member's current assignment set every time that set is fetched.
//! Exceeding the combined normal + overload cap is a hard block; dipping
//! into overload capacity is a warning the caller surfaces but may proceed
//! through.

use serde::{Deserialize, Serialize};

/// Snapshot of one faculty member's load caps and current commitment, in
/// teaching load units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadAccount {
    pub normal_cap_units: f64,
    pub overload_cap_units: f64,
    /// Units already committed. Invariant: non-negative.
    pub current_assigned_units: f64,
}

/// Where a potential assignment lands relative to the caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    /// Within the normal cap.
    Normal,
    /// Past the normal cap but within normal + overload. Warning only.
    Overload,
    /// Past normal + overload. Hard block — must not be submitted.
    Exceeded,
}

/// Result of assessing a prospective addition against a load account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadAssessment {
    pub potential_total_units: f64,
    pub total_cap_units: f64,
    pub status: LoadStatus,
}

impl LoadAccount {
    pub fn new(normal_cap_units: f64, overload_cap_units: f64, current_assigned_units: f64) -> Self {
        Self {
            normal_cap_units,
            overload_cap_units,
            current_assigned_units: current_assigned_units.max(0.0),
        }
    }

    /// Assess adding `new_units` (typically the subject's total weekly
    /// contact hours) on top of the current commitment.
    ///
    /// A zero total cap means caps are unconfigured for this faculty member;
    /// nothing can then be marked `Exceeded`, matching the caps-are-optional
    /// behavior of the upstream records.
    pub fn assess(&self, new_units: f64) -> LoadAssessment {
        let total_cap = self.normal_cap_units + self.overload_cap_units;
        let potential = self.current_assigned_units + new_units;

        let status = if total_cap > 0.0 && potential > total_cap {
            LoadStatus::Exceeded
        } else if self.normal_cap_units > 0.0 && potential > self.normal_cap_units {
            LoadStatus::Overload
        } else {
            LoadStatus::Normal
        };

        LoadAssessment {
            potential_total_units: potential,
            total_cap_units: total_cap,
            status,
        }
    }
}
