//! C8 — Carry-Over Evaluator: reads the solved schedule back against each
//! nurse's high-priority monthly requests to decide next cycle's carry-over
//! flag (SPEC_FULL.md §4.8).

use shared::ShiftKind;
use std::collections::HashMap;

use crate::domain::constants::weekday_fulfillment_threshold;
use crate::domain::extractor::{ExtractedSchedule, NurseCounts};
use crate::domain::model_types::{ConstraintKind, ConstraintValue, MonthlySoftRequest};
use crate::domain::normalizer::NormalizedInput;

pub fn evaluate(
    input: &NormalizedInput,
    extracted: &ExtractedSchedule,
    monthly_requests: &HashMap<String, Vec<MonthlySoftRequest>>,
) -> HashMap<String, bool> {
    let mut flags = HashMap::new();

    for nurse in &input.nurses {
        flags.insert(nurse.id.clone(), false);
    }

    for &n in &input.non_government_idx {
        let nurse_id = &input.nurses[n].id;
        let Some(requests) = monthly_requests.get(nurse_id) else {
            continue;
        };
        let high_priority: Vec<&MonthlySoftRequest> =
            requests.iter().filter(|r| r.is_high_priority).collect();
        if high_priority.is_empty() {
            continue;
        }

        let unmet_any = high_priority
            .iter()
            .any(|request| is_unmet(input, extracted, nurse_id, n, request));

        flags.insert(nurse_id.clone(), unmet_any);
    }

    flags
}

fn is_unmet(
    input: &NormalizedInput,
    extracted: &ExtractedSchedule,
    nurse_id: &str,
    n: usize,
    request: &MonthlySoftRequest,
) -> bool {
    if request.kind == ConstraintKind::RequestSpecificShiftsOnDays {
        let Some(shift_days) = request.value.as_ref().and_then(|v| v.as_shift_days()) else {
            return false;
        };
        return shift_days.iter().any(|item| {
            let Some(day) = input.days.iter().find(|d| d.day_of_month == item.day) else {
                return true;
            };
            let worked = &extracted.assignments[n][day.index];
            let satisfied = match item.shift_type {
                shared::RequestShiftCode::Morning => worked.contains(&ShiftKind::Morning),
                shared::RequestShiftCode::Afternoon => worked.contains(&ShiftKind::Afternoon),
                shared::RequestShiftCode::Night => worked.contains(&ShiftKind::Night),
                shared::RequestShiftCode::NightAfternoon => {
                    worked.contains(&ShiftKind::Night) && worked.contains(&ShiftKind::Afternoon)
                }
            };
            !satisfied
        });
    }

    if let Some(weekday) = request.kind.weekday() {
        let k = input.days.iter().filter(|d| d.weekday == weekday).count() as u32;
        let off_on_weekday = input
            .days
            .iter()
            .filter(|d| d.weekday == weekday)
            .filter(|d| extracted.assignments[n][d.index].is_empty())
            .count() as u32;
        return off_on_weekday < weekday_fulfillment_threshold(k);
    }

    if request.kind == ConstraintKind::NoSpecificDays {
        let Some(days) = request.value.as_ref().and_then(|v| v.as_days()) else {
            return false;
        };
        return match days.len() {
            1 => worked_on_day_of_month(input, extracted, n, days[0]),
            2 => {
                worked_on_day_of_month(input, extracted, n, days[0])
                    || worked_on_day_of_month(input, extracted, n, days[1])
            }
            _ => false,
        };
    }

    if let Some(shift) = request.kind.disliked_shift() {
        return disliked_shift_unmet(input, extracted, nurse_id, n, |c| match shift {
            ShiftKind::Morning => c.morning,
            ShiftKind::Afternoon => c.afternoon,
            ShiftKind::Night => c.night,
        });
    }

    if request.kind == ConstraintKind::NoNightAfternoonDouble {
        return disliked_shift_unmet(input, extracted, nurse_id, n, |c| c.night_afternoon_double);
    }

    false
}

fn worked_on_day_of_month(
    input: &NormalizedInput,
    extracted: &ExtractedSchedule,
    n: usize,
    day_of_month: u32,
) -> bool {
    input
        .days
        .iter()
        .filter(|d| d.day_of_month == day_of_month)
        .any(|d| !extracted.assignments[n][d.index].is_empty())
}

fn disliked_shift_unmet(
    input: &NormalizedInput,
    extracted: &ExtractedSchedule,
    nurse_id: &str,
    n: usize,
    count_of: impl Fn(&NurseCounts) -> u32,
) -> bool {
    let this_count = extracted
        .counts
        .get(nurse_id)
        .map(&count_of)
        .unwrap_or(0) as f64;

    let others: Vec<u32> = input
        .non_government_idx
        .iter()
        .filter(|&&other| other != n)
        .filter_map(|&other| extracted.counts.get(&input.nurses[other].id))
        .map(&count_of)
        .collect();

    if others.is_empty() {
        return this_count > 0.0;
    }

    let mean = others.iter().map(|&c| c as f64).sum::<f64>() / others.len() as f64;
    if mean == 0.0 {
        this_count > 0.0
    } else {
        (this_count / mean) * 100.0 > 50.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model_types::Nurse;

    #[test]
    fn government_nurses_never_carry_over() {
        let input = crate::domain::normalizer::normalize(
            vec![Nurse {
                id: "gov".to_string(),
                name: None,
                is_government_official: true,
                permanent_constraints: Vec::new(),
            }],
            chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            vec![],
            0,
            0,
            0,
            6,
            8,
            60.0,
        )
        .unwrap();

        let extracted = ExtractedSchedule {
            assignments: vec![vec![Vec::new()]],
            counts: HashMap::new(),
            fairness: Default::default(),
        };
        let flags = evaluate(&input, &extracted, &HashMap::new());
        assert_eq!(flags.get("gov"), Some(&false));
    }
}
