//! Government nurses' rigid schedule (SPEC_FULL.md §4.4): off on
//! weekends/holidays, Morning-only otherwise, never subject to the
//! consecutive-shift or off-day rules.

use selen::prelude::*;
use shared::ShiftKind;

use crate::domain::cpmodel::DecisionVariables;
use crate::domain::normalizer::NormalizedInput;

pub fn build(m: &mut Model, input: &NormalizedInput, vars: &DecisionVariables) {
    for &n in &input.government_idx {
        for day in &input.days {
            let d = day.index;
            let off_day = day.is_weekend() || input.holiday_days.contains(&day.day_of_month);

            let morning = vars.shift(n, d, ShiftKind::Morning);
            let afternoon = vars.shift(n, d, ShiftKind::Afternoon);
            let night = vars.shift(n, d, ShiftKind::Night);

            if off_day {
                m.c(morning).eq(int(0));
                m.c(afternoon).eq(int(0));
                m.c(night).eq(int(0));
                m.c(vars.is_off[n][d]).eq(int(1));
            } else {
                m.c(afternoon).eq(int(0));
                m.c(night).eq(int(0));
                m.c(vars.is_off[n][d]).eq(int(0));
            }
        }
    }
}
