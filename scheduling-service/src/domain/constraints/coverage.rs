//! Coverage and single-shift-per-day rules (SPEC_FULL.md §4.4).

use selen::prelude::*;
use shared::ShiftKind;

use crate::domain::cpmodel::DecisionVariables;
use crate::domain::normalizer::NormalizedInput;

pub fn build(m: &mut Model, input: &NormalizedInput, vars: &DecisionVariables) {
    let required = [
        input.required_morning,
        input.required_afternoon,
        input.required_night,
    ];

    for (d, _) in input.days.iter().enumerate() {
        for (s, &shift) in ShiftKind::ALL.iter().enumerate() {
            let column: Vec<VarId> = (0..input.nurses.len())
                .map(|n| vars.shift(n, d, shift))
                .collect();
            let total = m.sum(&column);
            m.c(total).eq(int(required[s]));
        }
    }

    for n in 0..input.nurses.len() {
        for d in 0..input.days.len() {
            let morning = vars.shift(n, d, ShiftKind::Morning);
            let afternoon = vars.shift(n, d, ShiftKind::Afternoon);
            let night = vars.shift(n, d, ShiftKind::Night);

            let ma = m.sum(&[morning, afternoon]);
            m.c(ma).le(int(1));
            let mn = m.sum(&[morning, night]);
            m.c(mn).le(int(1));
        }
    }
}
