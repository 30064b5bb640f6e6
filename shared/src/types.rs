use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One of the three shifts a nurse can be assigned to on a given day.
/// Absence of any `ShiftKind` for a (nurse, day) pair means the nurse is off.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftKind {
    Morning = 1,
    Afternoon = 2,
    Night = 3,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 3] = [ShiftKind::Morning, ShiftKind::Afternoon, ShiftKind::Night];

    pub fn index(self) -> usize {
        match self {
            ShiftKind::Morning => 0,
            ShiftKind::Afternoon => 1,
            ShiftKind::Night => 2,
        }
    }
}

/// The soft-request shift vocabulary, which additionally allows expressing
/// the Night+Afternoon double as a single requested configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestShiftCode {
    #[serde(rename = "M")]
    Morning = 1,
    #[serde(rename = "A")]
    Afternoon = 2,
    #[serde(rename = "N")]
    Night = 3,
    #[serde(rename = "NA")]
    NightAfternoon = 4,
}

/// Outcome classification of a solve attempt, reported verbatim in the
/// response's `solverStatus` field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unknown,
    ModelInvalid,
}

impl SolverStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "OPTIMAL",
            SolverStatus::Feasible => "FEASIBLE",
            SolverStatus::Infeasible => "INFEASIBLE",
            SolverStatus::Unknown => "UNKNOWN",
            SolverStatus::ModelInvalid => "MODEL_INVALID",
        }
    }
}
