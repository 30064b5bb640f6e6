//! C5 — Soft Penalty Builder (SPEC_FULL.md §4.5). Produces the list of
//! weighted indicator terms the solver driver sums into the objective.

use selen::prelude::*;
use shared::ShiftKind;
use std::collections::HashMap;

use crate::domain::constants::*;
use crate::domain::constraints::NightToMorningEvent;
use crate::domain::cpmodel::linear::{bool_and, bool_not, bool_or, ge_indicator, range_imbalance, shortfall};
use crate::domain::cpmodel::DecisionVariables;
use crate::domain::model_types::{ConstraintKind, ConstraintValue, MonthlySoftRequest};
use crate::domain::normalizer::NormalizedInput;

/// One `weight * indicator` term in the objective. `domain_max` is the
/// term's own known upper bound (1 for every reified boolean, `target` for a
/// `shortfall`, the `domain_max` passed to `range_imbalance`) — the solver
/// driver needs this to size `objective_var`'s domain correctly, since
/// `selen` exposes no way to read a `VarId`'s bounds back out of the model.
#[derive(Debug, Clone, Copy)]
pub struct WeightedTerm {
    pub var: VarId,
    pub weight: i32,
    pub domain_max: i32,
}

fn term(var: VarId, weight: i32, domain_max: i32) -> WeightedTerm {
    WeightedTerm { var, weight, domain_max }
}

/// Every term built in this module other than `shortfall`/`range_imbalance`
/// is a reified boolean in `{0, 1}`.
const BOOL_DOMAIN_MAX: i32 = 1;

#[allow(clippy::too_many_arguments)]
pub fn build(
    m: &mut Model,
    input: &NormalizedInput,
    vars: &DecisionVariables,
    night_to_morning_events: &[NightToMorningEvent],
    monthly_requests: &HashMap<String, Vec<MonthlySoftRequest>>,
    carry_over_flags: &HashMap<String, bool>,
) -> Vec<WeightedTerm> {
    let mut terms = Vec::new();
    let n_days = input.days.len();

    // Per-nurse aggregates, computed once and reused below.
    let mut total_shifts = HashMap::new();
    let mut total_off = HashMap::new();
    let mut per_type_total: HashMap<ShiftKind, HashMap<usize, VarId>> = HashMap::new();
    for &shift in &ShiftKind::ALL {
        per_type_total.insert(shift, HashMap::new());
    }

    for &n in &input.non_government_idx {
        let shifts_sum = m.sum(&vars.num_shifts[n]);
        total_shifts.insert(n, shifts_sum);

        let off_sum = m.sum(&vars.is_off[n]);
        total_off.insert(n, off_sum);

        for &shift in &ShiftKind::ALL {
            let column: Vec<VarId> = (0..n_days).map(|d| vars.shift(n, d, shift)).collect();
            let type_sum = m.sum(&column);
            per_type_total.get_mut(&shift).unwrap().insert(n, type_sum);
        }

        // Ending month at max consecutive.
        if let Some(Some(last_day_c)) = vars.consecutive_worked.get(n).map(|v| v.last().copied()) {
            let ind = ge_indicator(
                m,
                last_day_c,
                input.max_consecutive_shifts_worked,
                input.max_consecutive_shifts_worked.max(2),
            );
            terms.push(term(ind, WEIGHT_END_OF_MONTH_AT_MAX_CONSECUTIVE, BOOL_DOMAIN_MAX));
        }

        // Off-day shortfall: domain is [0, target_off_days].
        let gap = shortfall(m, total_off[&n], input.target_off_days);
        terms.push(term(gap, WEIGHT_OFF_DAY_SHORTFALL, input.target_off_days.max(0)));
    }

    if !input.non_government_idx.is_empty() {
        let shift_values: Vec<VarId> = input
            .non_government_idx
            .iter()
            .map(|n| total_shifts[n])
            .collect();
        let shift_domain_max = (n_days * 2) as i32;
        let imbalance = range_imbalance(m, &shift_values, shift_domain_max);
        terms.push(term(imbalance, WEIGHT_TOTAL_SHIFT_IMBALANCE, shift_domain_max));

        let off_values: Vec<VarId> = input
            .non_government_idx
            .iter()
            .map(|n| total_off[n])
            .collect();
        let off_domain_max = n_days as i32;
        let off_imbalance = range_imbalance(m, &off_values, off_domain_max);
        terms.push(term(off_imbalance, WEIGHT_OFF_DAY_IMBALANCE, off_domain_max));

        for &shift in &ShiftKind::ALL {
            let values: Vec<VarId> = input
                .non_government_idx
                .iter()
                .map(|n| per_type_total[&shift][n])
                .collect();
            let type_domain_max = n_days as i32;
            let imbalance = range_imbalance(m, &values, type_domain_max);
            terms.push(term(imbalance, WEIGHT_SHIFT_TYPE_IMBALANCE, type_domain_max));
        }
    }

    // N/A double count, across all non-gov (nurse, day) pairs.
    for &n in &input.non_government_idx {
        for d in 0..n_days {
            let afternoon = vars.shift(n, d, ShiftKind::Afternoon);
            let night = vars.shift(n, d, ShiftKind::Night);
            let double_ind = bool_and(m, &[afternoon, night]);
            terms.push(term(double_ind, WEIGHT_NIGHT_AFTERNOON_DOUBLE_COUNT, BOOL_DOMAIN_MAX));
        }
    }

    // Night -> Morning transition events collected by the hard constraint builder.
    for event in night_to_morning_events {
        let transitioned = if event.seam {
            // The double is a prior-month fact, not a variable: the
            // indicator is just whether Morning was worked on this seam day.
            vars.shift(event.nurse, event.day, ShiftKind::Morning)
        } else {
            let afternoon = vars.shift(event.nurse, event.day, ShiftKind::Afternoon);
            let night = vars.shift(event.nurse, event.day, ShiftKind::Night);
            let double_today = bool_and(m, &[afternoon, night]);
            let morning_tomorrow = vars.shift(event.nurse, event.day + 1, ShiftKind::Morning);
            bool_and(m, &[double_today, morning_tomorrow])
        };
        terms.push(term(transitioned, WEIGHT_NIGHT_TO_MORNING_TRANSITION, BOOL_DOMAIN_MAX));
    }

    // Permanent soft violations.
    for &n in &input.non_government_idx {
        for constraint in &input.nurses[n].permanent_constraints {
            if constraint.strength != crate::domain::model_types::ConstraintStrength::Soft {
                continue;
            }
            for ind in violation_indicators(m, input, vars, n, constraint.kind, constraint.value.as_ref()) {
                terms.push(term(ind, WEIGHT_PERMANENT_SOFT_VIOLATION, BOOL_DOMAIN_MAX));
            }
        }
    }

    // Monthly soft requests.
    for &n in &input.non_government_idx {
        let nurse_id = &input.nurses[n].id;
        let Some(requests) = monthly_requests.get(nurse_id) else {
            continue;
        };
        let carry_over = carry_over_flags.get(nurse_id).copied().unwrap_or(false);
        for request in requests {
            let mut weight = WEIGHT_MONTHLY_SOFT_BASE;
            if request.is_high_priority {
                weight += WEIGHT_MONTHLY_SOFT_HIGH_PRIORITY_BONUS;
                if carry_over {
                    weight += WEIGHT_MONTHLY_SOFT_CARRY_OVER_BONUS;
                }
            }

            if request.kind == ConstraintKind::RequestSpecificShiftsOnDays {
                if let Some(ind) = specific_shift_request_unmet(m, input, vars, n, request.value.as_ref()) {
                    terms.push(term(ind, weight, BOOL_DOMAIN_MAX));
                }
                continue;
            }

            for ind in violation_indicators(m, input, vars, n, request.kind, request.value.as_ref()) {
                terms.push(term(ind, weight, BOOL_DOMAIN_MAX));
            }
        }
    }

    terms
}

/// One unmet indicator per day the constraint's type matches, true when the
/// nurse's assignment contradicts the constraint's intent.
fn violation_indicators(
    m: &mut Model,
    input: &NormalizedInput,
    vars: &DecisionVariables,
    n: usize,
    kind: ConstraintKind,
    value: Option<&ConstraintValue>,
) -> Vec<VarId> {
    let mut indicators = Vec::new();

    if let Some(weekday) = kind.weekday() {
        for day in &input.days {
            if day.weekday == weekday {
                indicators.push(bool_not(m, vars.is_off[n][day.index]));
            }
        }
        return indicators;
    }

    if let Some(shift) = kind.disliked_shift() {
        for day in &input.days {
            indicators.push(vars.shift(n, day.index, shift));
        }
        return indicators;
    }

    match kind {
        ConstraintKind::NoNightAfternoonDouble => {
            for day in &input.days {
                let afternoon = vars.shift(n, day.index, ShiftKind::Afternoon);
                let night = vars.shift(n, day.index, ShiftKind::Night);
                indicators.push(bool_and(m, &[afternoon, night]));
            }
        }
        ConstraintKind::NoSpecificDays => {
            if let Some(days) = value.and_then(|v| v.as_days()) {
                for &day_of_month in days {
                    for day in &input.days {
                        if day.day_of_month == day_of_month {
                            indicators.push(bool_not(m, vars.is_off[n][day.index]));
                        }
                    }
                }
            }
        }
        ConstraintKind::RequestSpecificShiftsOnDays => {
            tracing::warn!(
                nurse = %input.nurses[n].id,
                "request_specific_shifts_on_days reached the generic per-occurrence penalty path, skipping"
            );
        }
        _ => {}
    }

    indicators
}

/// `request_specific_shifts_on_days` contributes a single OR'd indicator:
/// unmet iff any requested sub-item's shift configuration is absent.
fn specific_shift_request_unmet(
    m: &mut Model,
    input: &NormalizedInput,
    vars: &DecisionVariables,
    n: usize,
    value: Option<&ConstraintValue>,
) -> Option<VarId> {
    let shift_days = value.and_then(|v| v.as_shift_days())?;
    if shift_days.is_empty() {
        return None;
    }

    let mut part_not_met = Vec::new();
    for item in shift_days {
        let Some(day) = input.days.iter().find(|d| d.day_of_month == item.day) else {
            continue;
        };
        let present = match item.shift_type {
            shared::RequestShiftCode::Morning => vars.shift(n, day.index, ShiftKind::Morning),
            shared::RequestShiftCode::Afternoon => vars.shift(n, day.index, ShiftKind::Afternoon),
            shared::RequestShiftCode::Night => vars.shift(n, day.index, ShiftKind::Night),
            shared::RequestShiftCode::NightAfternoon => {
                let afternoon = vars.shift(n, day.index, ShiftKind::Afternoon);
                let night = vars.shift(n, day.index, ShiftKind::Night);
                bool_and(m, &[afternoon, night])
            }
        };
        part_not_met.push(bool_not(m, present));
    }

    if part_not_met.is_empty() {
        return None;
    }
    Some(bool_or(m, &part_not_met))
}
