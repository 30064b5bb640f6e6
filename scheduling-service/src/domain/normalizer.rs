//! C1 — Input Normalizer: validates the incoming request and turns it into
//! the plain, solver-agnostic shape the rest of the pipeline consumes.

use chrono::{Datelike, Duration, NaiveDate};
use shared::{DomainError, DomainResult};
use std::collections::HashSet;

use crate::domain::model_types::Nurse;

/// One calendar day in the scheduling window.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub index: usize,
    /// Mon=0 .. Sun=6
    pub weekday: u32,
    pub day_of_month: u32,
}

impl ScheduleDay {
    pub fn is_weekend(&self) -> bool {
        self.weekday == 5 || self.weekday == 6
    }
}

pub struct NormalizedInput {
    pub nurses: Vec<Nurse>,
    pub days: Vec<ScheduleDay>,
    pub government_idx: Vec<usize>,
    pub non_government_idx: Vec<usize>,
    pub holiday_days: HashSet<u32>,
    pub required_morning: i32,
    pub required_afternoon: i32,
    pub required_night: i32,
    pub max_consecutive_shifts_worked: i32,
    pub target_off_days: i32,
    pub solver_time_limit: f64,
}

impl NormalizedInput {
    pub fn nurse_index(&self, id: &str) -> Option<usize> {
        self.nurses.iter().position(|n| n.id == id)
    }
}

#[allow(clippy::too_many_arguments)]
pub fn normalize(
    nurses: Vec<Nurse>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    holidays: Vec<u32>,
    required_morning: i32,
    required_afternoon: i32,
    required_night: i32,
    max_consecutive_shifts_worked: i32,
    target_off_days: i32,
    solver_time_limit: f64,
) -> DomainResult<NormalizedInput> {
    if end_date < start_date {
        return Err(DomainError::InvalidInput(
            "schedule.endDate is before schedule.startDate".to_string(),
        ));
    }

    if nurses.is_empty() {
        return Err(DomainError::InvalidInput(
            "at least one nurse is required".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();
    for nurse in &nurses {
        if nurse.id.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "every nurse must have a non-empty id".to_string(),
            ));
        }
        if !seen_ids.insert(nurse.id.clone()) {
            return Err(DomainError::InvalidInput(format!(
                "duplicate nurse id: {}",
                nurse.id
            )));
        }
    }

    if required_morning < 0 || required_afternoon < 0 || required_night < 0 {
        return Err(DomainError::InvalidInput(
            "staffing requirements must not be negative".to_string(),
        ));
    }

    if max_consecutive_shifts_worked < 1 {
        return Err(DomainError::InvalidInput(
            "maxConsecutiveShiftsWorked must be at least 1".to_string(),
        ));
    }

    if target_off_days < 0 {
        return Err(DomainError::InvalidInput(
            "targetOffDays must not be negative".to_string(),
        ));
    }

    let max_required = required_morning.max(required_afternoon).max(required_night);
    if (nurses.len() as i32) < max_required {
        return Err(DomainError::InvalidInput(format!(
            "only {} nurses available but up to {} are required on a single shift",
            nurses.len(),
            max_required
        )));
    }

    let mut days = Vec::new();
    let mut cursor = start_date;
    let mut index = 0usize;
    while cursor <= end_date {
        days.push(ScheduleDay {
            date: cursor,
            index,
            weekday: cursor.weekday().num_days_from_monday(),
            day_of_month: cursor.day(),
        });
        index += 1;
        cursor += Duration::days(1);
    }

    let government_idx: Vec<usize> = nurses
        .iter()
        .enumerate()
        .filter(|(_, n)| n.is_government_official)
        .map(|(i, _)| i)
        .collect();
    let non_government_idx: Vec<usize> = nurses
        .iter()
        .enumerate()
        .filter(|(_, n)| !n.is_government_official)
        .map(|(i, _)| i)
        .collect();

    Ok(NormalizedInput {
        nurses,
        days,
        government_idx,
        non_government_idx,
        holiday_days: holidays.into_iter().collect(),
        required_morning,
        required_afternoon,
        required_night,
        max_consecutive_shifts_worked,
        target_off_days,
        solver_time_limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model_types::Nurse;

    fn nurse(id: &str, gov: bool) -> Nurse {
        Nurse {
            id: id.to_string(),
            name: None,
            is_government_official: gov,
            permanent_constraints: Vec::new(),
        }
    }

    #[test]
    fn builds_day_sequence_inclusive() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
        let result = normalize(
            vec![nurse("n1", false)],
            start,
            end,
            vec![],
            0,
            0,
            0,
            6,
            8,
            60.0,
        )
        .unwrap();
        assert_eq!(result.days.len(), 7);
        assert_eq!(result.days[0].weekday, 5); // Saturday
    }

    #[test]
    fn rejects_inverted_window() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let result = normalize(
            vec![nurse("n1", false)],
            start,
            end,
            vec![],
            0,
            0,
            0,
            6,
            8,
            60.0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_insufficient_nurses_for_requirement() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let result = normalize(
            vec![nurse("n1", false), nurse("n2", false)],
            start,
            end,
            vec![],
            5,
            0,
            0,
            6,
            8,
            60.0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn partitions_government_and_non_government() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let result = normalize(
            vec![nurse("gov", true), nurse("staff", false)],
            start,
            end,
            vec![],
            0,
            0,
            0,
            6,
            8,
            60.0,
        )
        .unwrap();
        assert_eq!(result.government_idx, vec![0]);
        assert_eq!(result.non_government_idx, vec![1]);
    }
}
