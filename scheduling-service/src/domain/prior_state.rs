//! C2 — Prior-State Deriver: turns the optional previous-month snapshot
//! into the per-nurse day-0 seed values the hard-constraint builder needs
//! (consecutive-worked count, last shift kind, last-day-off run length).

use shared::ShiftKind;

use crate::domain::model_types::PreviousMonthSchedule;
use crate::domain::normalizer::NormalizedInput;
use crate::domain::shift_set::ShiftSet;

/// Derived seed state for one nurse, read off the tail of the prior window.
#[derive(Debug, Clone, Copy, Default)]
pub struct NursePriorState {
    /// Sum of per-day shift counts for the trailing worked run ending on the
    /// last day of the prior window (0 if that day was off, or if there is
    /// no snapshot). A double-shift day contributes 2, per SPEC_FULL.md §4.2.
    pub consecutive_worked_at_seam: i32,
    /// Number of consecutive off days ending on the last day of the prior
    /// window.
    pub consecutive_off_at_seam: i32,
    /// Shift(s) worked on the prior window's last day, if any.
    pub last_day_shifts: ShiftSet,
    /// For each shift kind, the number of consecutive trailing days (ending
    /// on the prior window's last day) whose shift set contains that kind.
    /// Indexed by `ShiftKind::index()`.
    pub last_shift_types_count: [u32; 3],
}

pub fn derive_prior_state(
    input: &NormalizedInput,
    previous: Option<&PreviousMonthSchedule>,
) -> Vec<NursePriorState> {
    let Some(previous) = previous else {
        return vec![NursePriorState::default(); input.nurses.len()];
    };

    let mut sorted_days = previous.days.clone();
    sorted_days.sort();

    input
        .nurses
        .iter()
        .map(|nurse| derive_for_nurse(previous, &sorted_days, &nurse.id))
        .collect()
}

fn derive_for_nurse(
    previous: &PreviousMonthSchedule,
    sorted_days: &[chrono::NaiveDate],
    nurse_id: &str,
) -> NursePriorState {
    let Some(history) = previous.nurse_schedules.get(nurse_id) else {
        return NursePriorState::default();
    };

    let day_sets: Vec<ShiftSet> = sorted_days
        .iter()
        .map(|day| {
            let shifts = history.shifts.get(day).cloned().unwrap_or_default();
            ShiftSet::from_iter(shifts.iter().copied())
        })
        .collect();

    let last_day_shifts = day_sets.last().copied().unwrap_or_default();

    // Forward pass to get both seam counters in one walk, then the reverse
    // semantics fall out of the running values at the end of the loop.
    let mut consecutive_worked = 0i32;
    let mut consecutive_off = 0i32;
    for set in &day_sets {
        if set.is_empty() {
            consecutive_off += 1;
            consecutive_worked = 0;
        } else {
            consecutive_worked += set.len() as i32;
            consecutive_off = 0;
        }
    }

    let mut last_shift_types_count = [0u32; 3];
    for &shift in &ShiftKind::ALL {
        let mut count = 0u32;
        for set in day_sets.iter().rev() {
            if set.contains(shift) {
                count += 1;
            } else {
                break;
            }
        }
        last_shift_types_count[shift.index()] = count;
    }

    NursePriorState {
        consecutive_worked_at_seam: consecutive_worked,
        consecutive_off_at_seam: consecutive_off,
        last_day_shifts,
        last_shift_types_count,
    }
}

impl NursePriorState {
    pub fn worked_night(&self) -> bool {
        self.last_day_shifts.contains(ShiftKind::Night)
    }

    /// `k` in SPEC_FULL.md §4.4's month-boundary seeding: the number of
    /// consecutive trailing days in the prior window on which `shift` was
    /// worked.
    pub fn trailing_count(&self, shift: ShiftKind) -> u32 {
        self.last_shift_types_count[shift.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model_types::NurseShiftHistory;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn missing_snapshot_yields_zeroed_state() {
        let input = crate::domain::normalizer::normalize(
            vec![crate::domain::model_types::Nurse {
                id: "n1".to_string(),
                name: None,
                is_government_official: false,
                permanent_constraints: Vec::new(),
            }],
            date(1),
            date(1),
            vec![],
            0,
            0,
            0,
            6,
            8,
            60.0,
        )
        .unwrap();
        let state = derive_prior_state(&input, None);
        assert_eq!(state.len(), 1);
        assert_eq!(state[0].consecutive_worked_at_seam, 0);
    }

    #[test]
    fn counts_trailing_worked_run() {
        let mut shifts = HashMap::new();
        shifts.insert(date(29), vec![ShiftKind::Morning]);
        shifts.insert(date(30), vec![ShiftKind::Morning]);
        shifts.insert(date(31), vec![ShiftKind::Night, ShiftKind::Afternoon]);

        let mut nurse_schedules = HashMap::new();
        nurse_schedules.insert(
            "n1".to_string(),
            NurseShiftHistory { shifts },
        );

        let previous = PreviousMonthSchedule {
            days: vec![date(29), date(30), date(31)],
            nurse_schedules,
        };

        let input = crate::domain::normalizer::normalize(
            vec![crate::domain::model_types::Nurse {
                id: "n1".to_string(),
                name: None,
                is_government_official: false,
                permanent_constraints: Vec::new(),
            }],
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            vec![],
            0,
            0,
            0,
            6,
            8,
            60.0,
        )
        .unwrap();

        let state = derive_prior_state(&input, Some(&previous));
        // Two single-shift days (1 each) plus a trailing N+A double (2).
        assert_eq!(state[0].consecutive_worked_at_seam, 4);
        assert_eq!(state[0].consecutive_off_at_seam, 0);
        assert!(state[0].worked_night());
        assert_eq!(state[0].trailing_count(ShiftKind::Night), 1);
        assert_eq!(state[0].trailing_count(ShiftKind::Afternoon), 1);
        assert_eq!(state[0].trailing_count(ShiftKind::Morning), 0);
    }

    #[test]
    fn trailing_shift_type_count_stops_at_first_gap() {
        let mut shifts = HashMap::new();
        shifts.insert(date(28), vec![ShiftKind::Morning]);
        shifts.insert(date(29), vec![ShiftKind::Night]);
        shifts.insert(date(30), vec![ShiftKind::Morning]);
        shifts.insert(date(31), vec![ShiftKind::Morning]);

        let mut nurse_schedules = HashMap::new();
        nurse_schedules.insert("n1".to_string(), NurseShiftHistory { shifts });

        let previous = PreviousMonthSchedule {
            days: vec![date(28), date(29), date(30), date(31)],
            nurse_schedules,
        };

        let input = crate::domain::normalizer::normalize(
            vec![crate::domain::model_types::Nurse {
                id: "n1".to_string(),
                name: None,
                is_government_official: false,
                permanent_constraints: Vec::new(),
            }],
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            vec![],
            0,
            0,
            0,
            6,
            8,
            60.0,
        )
        .unwrap();

        let state = derive_prior_state(&input, Some(&previous));
        // Morning on the last two days; the Morning on day 28 doesn't extend
        // the trailing run because day 29 (Night only) breaks it.
        assert_eq!(state[0].trailing_count(ShiftKind::Morning), 2);
        assert_eq!(state[0].trailing_count(ShiftKind::Night), 0);
    }
}
