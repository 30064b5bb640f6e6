//! Input vocabulary for the scheduling core: nurses, their permanent
//! profile constraints, monthly soft requests, and the prior-month
//! snapshot. These are the normalized, in-memory counterparts of the wire
//! DTOs in `api::requests` — the normalizer (`domain::normalizer`) is the
//! only place that converts between the two.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{RequestShiftCode, ShiftKind};
use std::collections::HashMap;
use utoipa::ToSchema;

/// The permanent-constraint / monthly-request type vocabulary. Permanent
/// constraints never carry `RequestSpecificShiftsOnDays`; the normalizer
/// logs and skips one if it appears there (see `domain::normalizer`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    NoMondays,
    NoTuesdays,
    NoWednesdays,
    NoThursdays,
    NoFridays,
    NoSaturdays,
    NoSundays,
    NoMorningShifts,
    NoAfternoonShifts,
    NoNightShifts,
    NoNightAfternoonDouble,
    NoSpecificDays,
    RequestSpecificShiftsOnDays,
}

impl ConstraintKind {
    /// `Some(weekday)` (Mon=0..Sun=6) for the seven `no_<weekday>` kinds.
    pub fn weekday(self) -> Option<u32> {
        match self {
            ConstraintKind::NoMondays => Some(0),
            ConstraintKind::NoTuesdays => Some(1),
            ConstraintKind::NoWednesdays => Some(2),
            ConstraintKind::NoThursdays => Some(3),
            ConstraintKind::NoFridays => Some(4),
            ConstraintKind::NoSaturdays => Some(5),
            ConstraintKind::NoSundays => Some(6),
            _ => None,
        }
    }

    /// `Some(shift)` for the three `no_<shift>_shifts` kinds.
    pub fn disliked_shift(self) -> Option<ShiftKind> {
        match self {
            ConstraintKind::NoMorningShifts => Some(ShiftKind::Morning),
            ConstraintKind::NoAfternoonShifts => Some(ShiftKind::Afternoon),
            ConstraintKind::NoNightShifts => Some(ShiftKind::Night),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintStrength {
    Hard,
    Soft,
}

/// One requested shift configuration on a specific day-of-month, the value
/// carried by `request_specific_shifts_on_days`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct ShiftDayRequest {
    pub day: u32,
    pub shift_type: RequestShiftCode,
}

/// The polymorphic `value` payload on a constraint/request. Untagged: which
/// variant is expected is determined by `kind`, not by shape alone.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ConstraintValue {
    Days(Vec<u32>),
    ShiftDays(Vec<ShiftDayRequest>),
}

impl ConstraintValue {
    pub fn as_days(&self) -> Option<&[u32]> {
        match self {
            ConstraintValue::Days(d) => Some(d),
            ConstraintValue::ShiftDays(_) => None,
        }
    }

    pub fn as_shift_days(&self) -> Option<&[ShiftDayRequest]> {
        match self {
            ConstraintValue::ShiftDays(d) => Some(d),
            ConstraintValue::Days(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PermanentConstraint {
    #[serde(rename = "type")]
    pub kind: ConstraintKind,
    #[serde(default)]
    pub value: Option<ConstraintValue>,
    pub strength: ConstraintStrength,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlySoftRequest {
    #[serde(rename = "type")]
    pub kind: ConstraintKind,
    #[serde(default)]
    pub value: Option<ConstraintValue>,
    pub is_high_priority: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Nurse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "isGovernmentOfficial")]
    pub is_government_official: bool,
    #[serde(rename = "permanentConstraints", default)]
    pub permanent_constraints: Vec<PermanentConstraint>,
}

/// Prior-month shift snapshot as received on the wire: a day sequence plus,
/// per nurse, the shift codes worked on each of those days.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PreviousMonthSchedule {
    pub days: Vec<NaiveDate>,
    #[serde(rename = "nurseSchedules")]
    pub nurse_schedules: HashMap<String, NurseShiftHistory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NurseShiftHistory {
    pub shifts: HashMap<NaiveDate, Vec<ShiftKind>>,
}
