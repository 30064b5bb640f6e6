//! C9 — Response Assembler: packs the solved schedule, counts, fairness
//! report, solver status, objective value, and next carry-over flags into
//! the wire shape of SPEC_FULL.md §6.

use chrono::NaiveDate;
use serde::Serialize;
use shared::ShiftKind;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::domain::extractor::{ExtractedSchedule, FairnessReport, NurseCounts};
use crate::domain::normalizer::NormalizedInput;
use crate::domain::pipeline::GenerateScheduleOutput;

#[derive(Debug, Serialize, ToSchema)]
pub struct NurseCountsOut {
    pub morning: u32,
    pub afternoon: u32,
    pub night: u32,
    pub total: u32,
    #[serde(rename = "nightAfternoonDouble")]
    pub night_afternoon_double: u32,
    #[serde(rename = "daysOff")]
    pub days_off: u32,
}

impl From<&NurseCounts> for NurseCountsOut {
    fn from(c: &NurseCounts) -> Self {
        Self {
            morning: c.morning,
            afternoon: c.afternoon,
            night: c.night,
            total: c.total,
            night_afternoon_double: c.night_afternoon_double,
            days_off: c.days_off,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FairnessReportOut {
    #[serde(rename = "minDaysOff")]
    pub min_days_off: u32,
    #[serde(rename = "maxDaysOff")]
    pub max_days_off: u32,
    #[serde(rename = "minTotal")]
    pub min_total: u32,
    #[serde(rename = "maxTotal")]
    pub max_total: u32,
    #[serde(rename = "minMorning")]
    pub min_morning: u32,
    #[serde(rename = "maxMorning")]
    pub max_morning: u32,
    #[serde(rename = "minAfternoon")]
    pub min_afternoon: u32,
    #[serde(rename = "maxAfternoon")]
    pub max_afternoon: u32,
    #[serde(rename = "minNight")]
    pub min_night: u32,
    #[serde(rename = "maxNight")]
    pub max_night: u32,
    #[serde(rename = "totalNightAfternoonDoubles")]
    pub total_night_afternoon_doubles: u32,
}

impl From<&FairnessReport> for FairnessReportOut {
    fn from(r: &FairnessReport) -> Self {
        Self {
            min_days_off: r.min_days_off,
            max_days_off: r.max_days_off,
            min_total: r.min_total,
            max_total: r.max_total,
            min_morning: r.min_morning,
            max_morning: r.max_morning,
            min_afternoon: r.min_afternoon,
            max_afternoon: r.max_afternoon,
            min_night: r.min_night,
            max_night: r.max_night,
            total_night_afternoon_doubles: r.total_night_afternoon_doubles,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateScheduleResponse {
    #[serde(rename = "nurseSchedules")]
    pub nurse_schedules: HashMap<String, HashMap<String, Vec<ShiftKind>>>,
    #[serde(rename = "shiftsCount")]
    pub shifts_count: HashMap<String, NurseCountsOut>,
    pub days: Vec<NaiveDate>,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    #[serde(rename = "solverStatus")]
    pub solver_status: String,
    #[serde(rename = "penaltyValue")]
    pub penalty_value: Option<i32>,
    #[serde(rename = "fairnessReport")]
    pub fairness_report: FairnessReportOut,
    #[serde(rename = "nextCarryOverFlags")]
    pub next_carry_over_flags: HashMap<String, bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn assemble(output: &GenerateScheduleOutput) -> GenerateScheduleResponse {
    let nurse_schedules = build_nurse_schedules(&output.normalized, &output.extracted);
    let shifts_count = output
        .extracted
        .counts
        .iter()
        .map(|(id, counts)| (id.clone(), NurseCountsOut::from(counts)))
        .collect();

    let start_date = output
        .normalized
        .days
        .first()
        .map(|d| d.date)
        .unwrap_or_default();
    let end_date = output
        .normalized
        .days
        .last()
        .map(|d| d.date)
        .unwrap_or_default();

    GenerateScheduleResponse {
        nurse_schedules,
        shifts_count,
        days: output.normalized.days.iter().map(|d| d.date).collect(),
        start_date,
        end_date,
        solver_status: output.status.as_str().to_string(),
        penalty_value: output.objective_value,
        fairness_report: FairnessReportOut::from(&output.extracted.fairness),
        next_carry_over_flags: output.next_carry_over_flags.clone(),
    }
}

fn build_nurse_schedules(
    input: &NormalizedInput,
    extracted: &ExtractedSchedule,
) -> HashMap<String, HashMap<String, Vec<ShiftKind>>> {
    let mut schedules = HashMap::new();
    for (n, nurse) in input.nurses.iter().enumerate() {
        let mut by_day = HashMap::new();
        for day in &input.days {
            by_day.insert(
                day.date.to_string(),
                extracted.assignments[n][day.index].clone(),
            );
        }
        schedules.insert(nurse.id.clone(), by_day);
    }
    schedules
}
