//! Wire shape of the `POST /generate-schedule` request body (SPEC_FULL.md
//! §6). `Nurse`, `MonthlySoftRequest`, and `PreviousMonthSchedule` are
//! reused directly from `domain::model_types` — they already carry the
//! `serde`/`utoipa` annotations the wire format needs, so there is no
//! separate transport-only copy to keep in sync.
//!
//! The staffing/solver fields are left `Option` rather than defaulted here:
//! a field omitted on the wire should fall back to the deployment's
//! configured `scheduling_defaults` (`infrastructure::config`), not to a
//! value baked into the binary, so the merge happens in the handler where
//! `AppState`'s `Settings` is in scope.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::domain::model_types::{MonthlySoftRequest, Nurse, PreviousMonthSchedule};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScheduleWindow {
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateScheduleRequest {
    pub nurses: Vec<Nurse>,
    pub schedule: ScheduleWindow,
    #[serde(rename = "previousMonthSchedule", default)]
    pub previous_month_schedule: Option<PreviousMonthSchedule>,
    #[serde(default)]
    pub monthly_soft_requests: HashMap<String, Vec<MonthlySoftRequest>>,
    #[serde(default)]
    pub carry_over_flags: HashMap<String, bool>,
    #[serde(default)]
    pub holidays: Vec<u32>,
    #[serde(rename = "requiredNursesMorning", default)]
    pub required_nurses_morning: Option<i32>,
    #[serde(rename = "requiredNursesAfternoon", default)]
    pub required_nurses_afternoon: Option<i32>,
    #[serde(rename = "requiredNursesNight", default)]
    pub required_nurses_night: Option<i32>,
    #[serde(rename = "maxConsecutiveShiftsWorked", default)]
    pub max_consecutive_shifts_worked: Option<i32>,
    #[serde(rename = "targetOffDays", default)]
    pub target_off_days: Option<i32>,
    #[serde(rename = "solverTimeLimit", default)]
    pub solver_time_limit: Option<f64>,
}
