//! C7 — Result Extractor: reads the solved assignment off `shift[n,d,s]`
//! and aggregates the per-nurse and fairness figures the response needs.

use selen::prelude::*;
use shared::ShiftKind;
use std::collections::HashMap;

use crate::domain::cpmodel::DecisionVariables;
use crate::domain::normalizer::NormalizedInput;

#[derive(Debug, Clone, Default)]
pub struct NurseCounts {
    pub morning: u32,
    pub afternoon: u32,
    pub night: u32,
    pub total: u32,
    pub night_afternoon_double: u32,
    pub days_off: u32,
}

#[derive(Debug, Clone, Default)]
pub struct FairnessReport {
    pub min_days_off: u32,
    pub max_days_off: u32,
    pub min_total: u32,
    pub max_total: u32,
    pub min_morning: u32,
    pub max_morning: u32,
    pub min_afternoon: u32,
    pub max_afternoon: u32,
    pub min_night: u32,
    pub max_night: u32,
    pub total_night_afternoon_doubles: u32,
}

pub struct ExtractedSchedule {
    /// `assignments[n][d]` is the sorted list of shifts nurse `n` works on
    /// day `d`.
    pub assignments: Vec<Vec<Vec<ShiftKind>>>,
    pub counts: HashMap<String, NurseCounts>,
    pub fairness: FairnessReport,
}

pub fn extract(
    input: &NormalizedInput,
    vars: &DecisionVariables,
    solution: &Solution,
) -> ExtractedSchedule {
    let n_nurses = input.nurses.len();
    let n_days = input.days.len();

    let mut assignments = vec![vec![Vec::new(); n_days]; n_nurses];
    let mut counts: HashMap<String, NurseCounts> = HashMap::new();

    for (n, nurse) in input.nurses.iter().enumerate() {
        let mut c = NurseCounts::default();
        for d in 0..n_days {
            let mut worked = Vec::new();
            for &shift in &ShiftKind::ALL {
                if solution.get::<i32>(vars.shift(n, d, shift)) == 1 {
                    worked.push(shift);
                    match shift {
                        ShiftKind::Morning => c.morning += 1,
                        ShiftKind::Afternoon => c.afternoon += 1,
                        ShiftKind::Night => c.night += 1,
                    }
                }
            }
            if worked.is_empty() {
                c.days_off += 1;
            } else {
                c.total += worked.len() as u32;
            }
            if worked.contains(&ShiftKind::Night) && worked.contains(&ShiftKind::Afternoon) {
                c.night_afternoon_double += 1;
            }
            assignments[n][d] = worked;
        }
        counts.insert(nurse.id.clone(), c);
    }

    let fairness = build_fairness_report(input, &counts);

    ExtractedSchedule {
        assignments,
        counts,
        fairness,
    }
}

fn build_fairness_report(
    input: &NormalizedInput,
    counts: &HashMap<String, NurseCounts>,
) -> FairnessReport {
    let non_gov: Vec<&NurseCounts> = input
        .non_government_idx
        .iter()
        .filter_map(|&n| counts.get(&input.nurses[n].id))
        .collect();

    if non_gov.is_empty() {
        return FairnessReport::default();
    }

    let min_max = |f: fn(&NurseCounts) -> u32| {
        let values: Vec<u32> = non_gov.iter().map(|c| f(c)).collect();
        (
            values.iter().copied().min().unwrap_or(0),
            values.iter().copied().max().unwrap_or(0),
        )
    };

    let (min_days_off, max_days_off) = min_max(|c| c.days_off);
    let (min_total, max_total) = min_max(|c| c.total);
    let (min_morning, max_morning) = min_max(|c| c.morning);
    let (min_afternoon, max_afternoon) = min_max(|c| c.afternoon);
    let (min_night, max_night) = min_max(|c| c.night);
    let total_night_afternoon_doubles = non_gov.iter().map(|c| c.night_afternoon_double).sum();

    FairnessReport {
        min_days_off,
        max_days_off,
        min_total,
        max_total,
        min_morning,
        max_morning,
        min_afternoon,
        max_afternoon,
        min_night,
        max_night,
        total_night_afternoon_doubles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_non_gov_set_yields_zeroed_fairness() {
        let input = crate::domain::normalizer::normalize(
            vec![crate::domain::model_types::Nurse {
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
        let counts = HashMap::new();
        let report = build_fairness_report(&input, &counts);
        assert_eq!(report.max_total, 0);
        assert_eq!(report.total_night_afternoon_doubles, 0);
    }
}
