//! C3 — Decision variable lattice: the `shift[n,d,s]` booleans and the
//! derived per-(nurse, day) helper variables the constraint and penalty
//! builders read from. Built once per solve and threaded through C4/C5.

use selen::prelude::*;
use shared::ShiftKind;

use crate::domain::cpmodel::linear::{bool_var, const_var, scaled};
use crate::domain::normalizer::NormalizedInput;
use crate::domain::prior_state::NursePriorState;

/// `shift_vars[n][d][s]` is 1 iff nurse `n` works `ShiftKind::ALL[s]` on day `d`.
pub struct DecisionVariables {
    pub shift_vars: Vec<Vec<[VarId; 3]>>,
    /// 1 iff nurse `n` works no shift at all on day `d`.
    pub is_off: Vec<Vec<VarId>>,
    /// 1 iff nurse `n` works at least one shift on day `d` (`1 - is_off`).
    pub is_working: Vec<Vec<VarId>>,
    /// Number of shifts (0, 1, or 2) nurse `n` works on day `d`.
    pub num_shifts: Vec<Vec<VarId>>,
    /// Running count of consecutive worked days for nurse `n` ending at day
    /// `d`, reset to 0 whenever `is_off[n][d] == 1`. Defined only for
    /// non-government nurses; government nurses' schedules are fixed and do
    /// not need this bookkeeping (see SPEC_FULL.md §4.4).
    pub consecutive_worked: Vec<Vec<Option<VarId>>>,
}

pub fn build_variables(
    m: &mut Model,
    input: &NormalizedInput,
    prior: &[NursePriorState],
) -> DecisionVariables {
    let n_nurses = input.nurses.len();
    let n_days = input.days.len();

    let mut shift_vars = Vec::with_capacity(n_nurses);
    let mut is_off = Vec::with_capacity(n_nurses);
    let mut is_working = Vec::with_capacity(n_nurses);
    let mut num_shifts = Vec::with_capacity(n_nurses);

    for _ in 0..n_nurses {
        let mut nurse_shifts = Vec::with_capacity(n_days);
        let mut nurse_is_off = Vec::with_capacity(n_days);
        let mut nurse_is_working = Vec::with_capacity(n_days);
        let mut nurse_num_shifts = Vec::with_capacity(n_days);

        for _ in 0..n_days {
            let day_vars: [VarId; 3] = [bool_var(m), bool_var(m), bool_var(m)];

            let off_var = bool_var(m);
            let working_var = bool_var(m);
            let total = m.sum(&[off_var, working_var]);
            m.c(total).eq(int(1));

            let num_shifts_var = m.sum(&day_vars);
            // num_shifts == 0 when off, in {1, 2} when working: encoded via
            // num_shifts <= 2 * working_var and num_shifts >= working_var.
            let upper = scaled(m, working_var, 2);
            m.c(num_shifts_var).le(upper);
            m.c(num_shifts_var).ge(working_var);

            nurse_shifts.push(day_vars);
            nurse_is_off.push(off_var);
            nurse_is_working.push(working_var);
            nurse_num_shifts.push(num_shifts_var);
        }

        shift_vars.push(nurse_shifts);
        is_off.push(nurse_is_off);
        is_working.push(nurse_is_working);
        num_shifts.push(nurse_num_shifts);
    }

    let max_run = input.max_consecutive_shifts_worked;
    let mut consecutive_worked = Vec::with_capacity(n_nurses);
    for n in 0..n_nurses {
        let mut nurse_consecutive = Vec::with_capacity(n_days);
        let is_gov = input.government_idx.contains(&n);
        for d in 0..n_days {
            if is_gov {
                nurse_consecutive.push(None);
                continue;
            }
            let c_var = m.int(0, max_run.max(2));
            // c[n,d] == 0 when off (the cap below enforces this); otherwise
            // c[n,d] == prev + num_shifts[n,d], where `prev` is c[n,d-1] for
            // d>=1 and the prior month's seeded run for d==0 (0 if the prior
            // window's last day was off). Day 0 must use the same is_off-relaxed
            // encoding as every other day: binding it unconditionally to
            // `seed + num_shifts[n,0]` would force the nurse to work day 0
            // whenever seed > 0, which is both wrong per SPEC_FULL.md §4.4 (the
            // Python original resets to 0 `OnlyEnforceIf is_off[n,0]`) and
            // globally infeasible whenever the seeded run already sits at
            // max_run.
            let (prev_var, big): (VarId, i32) = if d == 0 {
                let seed = prior[n].consecutive_worked_at_seam.max(0);
                (const_var(m, seed), seed.max(max_run.max(2)) + 2)
            } else {
                let prev = nurse_consecutive[d - 1]
                    .expect("non-government nurse must have a consecutive-run variable");
                (prev, max_run.max(2) + 2)
            };
            // Upper bound: c[n,d] <= prev + num_shifts[n,d].
            let sum_prev_and_today = m.sum(&[prev_var, num_shifts[n][d]]);
            m.c(c_var).le(sum_prev_and_today);
            // Lower bound, rearranged to avoid subtraction and relaxed on off
            // days: c[n,d] + BIG * is_off[n,d] >= prev + num_shifts[n,d]. BIG is
            // scaled past the largest value `prev + num_shifts[n,d]` can reach so
            // the bound is vacuous once is_off[n,d] == 1.
            let big_off = scaled(m, is_off[n][d], big);
            let lhs = m.sum(&[c_var, big_off]);
            m.c(lhs).ge(sum_prev_and_today);
            // Cap at max_run whenever the nurse works; unconstrained (0) when off.
            let cap = scaled(m, is_working[n][d], max_run);
            m.c(c_var).le(cap);
            nurse_consecutive.push(Some(c_var));
        }
        consecutive_worked.push(nurse_consecutive);
    }

    DecisionVariables {
        shift_vars,
        is_off,
        is_working,
        num_shifts,
        consecutive_worked,
    }
}

impl DecisionVariables {
    pub fn shift(&self, nurse: usize, day: usize, shift: ShiftKind) -> VarId {
        self.shift_vars[nurse][day][shift.index()]
    }
}
