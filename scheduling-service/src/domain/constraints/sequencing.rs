//! Month-boundary seeding, consecutive same-shift-type windows, consecutive
//! off-day windows, and adjacent-day transition rules for non-government
//! nurses (SPEC_FULL.md §4.4). The consecutive-worked-shift counter `c[n,d]`
//! itself is built in `cpmodel::variables`, seeded from the prior state
//! there; this module only adds the remaining sequential rules and collects
//! the Night→Morning transition events the soft penalty builder needs.

use selen::prelude::*;
use shared::ShiftKind;

use crate::domain::cpmodel::DecisionVariables;
use crate::domain::constants::{MAX_CONSECUTIVE_OFF_DAYS, MAX_CONSECUTIVE_SAME_SHIFT};
use crate::domain::constraints::NightToMorningEvent;
use crate::domain::normalizer::NormalizedInput;
use crate::domain::prior_state::NursePriorState;

pub fn build(
    m: &mut Model,
    input: &NormalizedInput,
    vars: &DecisionVariables,
    prior: &[NursePriorState],
) -> Vec<NightToMorningEvent> {
    let n_days = input.days.len();
    let mut events = Vec::new();

    for &n in &input.non_government_idx {
        if let Some(event) = seed_month_boundary(m, vars, n, prior[n]) {
            events.push(event);
        }

        for &shift in &ShiftKind::ALL {
            let window = MAX_CONSECUTIVE_SAME_SHIFT as usize + 1;
            if n_days < window {
                continue;
            }
            for start in 0..=(n_days - window) {
                let terms: Vec<VarId> = (start..start + window)
                    .map(|d| vars.shift(n, d, shift))
                    .collect();
                let total = m.sum(&terms);
                m.c(total).le(int(MAX_CONSECUTIVE_SAME_SHIFT));
            }
        }

        let off_window = MAX_CONSECUTIVE_OFF_DAYS as usize + 1;
        if n_days >= off_window {
            for start in 0..=(n_days - off_window) {
                let terms: Vec<VarId> = (start..start + off_window)
                    .map(|d| vars.is_off[n][d])
                    .collect();
                let total = m.sum(&terms);
                m.c(total).le(int(MAX_CONSECUTIVE_OFF_DAYS));
            }
        }

        for d in 0..n_days.saturating_sub(1) {
            let afternoon_today = vars.shift(n, d, ShiftKind::Afternoon);
            let night_tomorrow = vars.shift(n, d + 1, ShiftKind::Night);
            let pair = m.sum(&[afternoon_today, night_tomorrow]);
            m.c(pair).le(int(1));

            let night_today = vars.shift(n, d, ShiftKind::Night);
            let double_today =
                crate::domain::cpmodel::linear::bool_and(m, &[afternoon_today, night_today]);
            let not_double_today = crate::domain::cpmodel::linear::bool_not(m, double_today);
            // Forbid Night the day after an N∧A double.
            m.c(night_tomorrow).le(not_double_today);

            // The transition event feeding the Night→Morning penalty is
            // "double happened today AND Morning worked tomorrow"; the
            // penalty builder only needs to know which (nurse, day) pairs to
            // examine, so the indicator itself is reconstructed there.
            events.push(NightToMorningEvent {
                nurse: n,
                day: d,
                seam: false,
            });
        }
    }

    events
}

fn seed_month_boundary(
    m: &mut Model,
    vars: &DecisionVariables,
    n: usize,
    prior: NursePriorState,
) -> Option<NightToMorningEvent> {
    if prior.last_day_shifts.contains(ShiftKind::Afternoon) {
        let night0 = vars.shift(n, 0, ShiftKind::Night);
        m.c(night0).eq(int(0));
    }

    let prior_was_double = prior.last_day_shifts.contains(ShiftKind::Night)
        && prior.last_day_shifts.contains(ShiftKind::Afternoon);
    let seam_event = if prior_was_double && !vars.shift_vars[n].is_empty() {
        // Reinforces the Night=0 constraint above and feeds the N→M
        // transition penalty with the prior month's double already a known
        // fact: the indicator is just Morning on day 0, not ANDed with
        // anything.
        Some(NightToMorningEvent {
            nurse: n,
            day: 0,
            seam: true,
        })
    } else {
        None
    };

    let n_days = vars.shift_vars[n].len();
    for &shift in &ShiftKind::ALL {
        let k = prior.trailing_count(shift) as i32;
        if k <= 0 || n_days == 0 {
            continue;
        }

        if k >= MAX_CONSECUTIVE_SAME_SHIFT {
            let day0 = vars.shift(n, 0, shift);
            m.c(day0).eq(int(0));
            continue;
        }

        // 1 <= k < MAX_CONSECUTIVE_SAME_SHIFT: the trailing run already
        // occupies `k` of the MAX_CONSECUTIVE_SAME_SHIFT+1-day window that
        // straddles the boundary, so the remaining
        // (MAX_CONSECUTIVE_SAME_SHIFT + 1 - k) days of this month may carry
        // at most (MAX_CONSECUTIVE_SAME_SHIFT - k) further occurrences.
        let window_len = ((MAX_CONSECUTIVE_SAME_SHIFT + 1 - k) as usize).min(n_days);
        let bound = MAX_CONSECUTIVE_SAME_SHIFT - k;
        if window_len == 0 {
            continue;
        }
        let terms: Vec<VarId> = (0..window_len).map(|d| vars.shift(n, d, shift)).collect();
        let total = m.sum(&terms);
        m.c(total).le(int(bound));
    }

    seam_event
}
