//! Approved hard day-off requests and hard permanent constraints
//! (SPEC_FULL.md §4.4), both of which only apply to non-government nurses.

use selen::prelude::*;

use crate::domain::cpmodel::DecisionVariables;
use crate::domain::hard_request_store::HardRequestInput;
use crate::domain::model_types::{ConstraintKind, ConstraintStrength};
use crate::domain::normalizer::NormalizedInput;

pub fn build_hard_requests(
    m: &mut Model,
    input: &NormalizedInput,
    vars: &DecisionVariables,
    hard_requests: &HardRequestInput,
) {
    for &n in &input.non_government_idx {
        let nurse_id = &input.nurses[n].id;
        for day in &input.days {
            if hard_requests.is_approved_off(nurse_id, day.date) {
                m.c(vars.is_off[n][day.index]).eq(int(1));
            }
        }
    }
}

pub fn build_hard_permanent_constraints(
    m: &mut Model,
    input: &NormalizedInput,
    vars: &DecisionVariables,
) {
    for &n in &input.non_government_idx {
        for constraint in &input.nurses[n].permanent_constraints {
            if constraint.strength != ConstraintStrength::Hard {
                continue;
            }
            apply_hard_constraint(m, input, vars, n, constraint.kind, constraint.value.as_ref());
        }
    }
}

fn apply_hard_constraint(
    m: &mut Model,
    input: &NormalizedInput,
    vars: &DecisionVariables,
    n: usize,
    kind: ConstraintKind,
    value: Option<&crate::domain::model_types::ConstraintValue>,
) {
    if let Some(weekday) = kind.weekday() {
        for day in &input.days {
            if day.weekday == weekday {
                m.c(vars.is_off[n][day.index]).eq(int(1));
            }
        }
        return;
    }

    if let Some(shift) = kind.disliked_shift() {
        for day in &input.days {
            m.c(vars.shift(n, day.index, shift)).eq(int(0));
        }
        return;
    }

    match kind {
        ConstraintKind::NoNightAfternoonDouble => {
            for day in &input.days {
                let afternoon = vars.shift(n, day.index, shared::ShiftKind::Afternoon);
                let night = vars.shift(n, day.index, shared::ShiftKind::Night);
                let pair = m.sum(&[afternoon, night]);
                m.c(pair).le(int(1));
            }
        }
        ConstraintKind::NoSpecificDays => {
            let Some(days) = value.and_then(|v| v.as_days()) else {
                return;
            };
            for &day_of_month in days {
                for day in &input.days {
                    if day.day_of_month == day_of_month {
                        m.c(vars.is_off[n][day.index]).eq(int(1));
                    }
                }
            }
        }
        ConstraintKind::RequestSpecificShiftsOnDays => {
            tracing::warn!(
                nurse = %input.nurses[n].id,
                "request_specific_shifts_on_days is not a valid permanent constraint type, skipping"
            );
        }
        _ => {}
    }
}
