//! C6 — Solver Driver. The underlying engine is a feasibility (CSP) oracle,
//! not a native optimizer (see SPEC_FULL.md §9), so minimization is driven
//! by this loop: solve once for feasibility, then repeatedly re-solve with a
//! strictly tighter upper bound on the objective until the bound can no
//! longer be tightened or the wall-clock budget runs out.

use selen::prelude::*;
use std::time::{Duration, Instant};

use shared::SolverStatus;

pub struct SolveOutcome {
    pub status: SolverStatus,
    pub solution: Option<Solution>,
    pub objective_value: Option<i32>,
}

pub fn solve_with_tightening(
    m: &mut Model,
    objective_var: VarId,
    objective_upper_bound: i32,
    time_limit_seconds: f64,
) -> SolveOutcome {
    let deadline = Instant::now() + Duration::from_secs_f64(time_limit_seconds.max(0.0));

    let first = m.solve();
    let Ok(mut best_solution) = first else {
        return SolveOutcome {
            status: SolverStatus::Infeasible,
            solution: None,
            objective_value: None,
        };
    };

    let mut best_value = best_solution.get::<i32>(objective_var);
    let mut proved_optimal = false;

    loop {
        if Instant::now() >= deadline {
            break;
        }
        if best_value <= 0 {
            proved_optimal = true;
            break;
        }

        let candidate_bound = best_value - 1;
        m.c(objective_var).le(int(candidate_bound));

        match m.solve() {
            Ok(candidate) => {
                let candidate_value = candidate.get::<i32>(objective_var);
                best_value = candidate_value;
                best_solution = candidate;
            }
            Err(_) => {
                proved_optimal = true;
                break;
            }
        }
    }

    let _ = objective_upper_bound;
    let status = if proved_optimal {
        SolverStatus::Optimal
    } else {
        SolverStatus::Feasible
    };

    SolveOutcome {
        status,
        objective_value: Some(best_value),
        solution: Some(best_solution),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infeasible_first_solve_reports_infeasible() {
        let mut m = Model::default();
        let x = m.int(0, 1);
        m.c(x).eq(int(0));
        m.c(x).eq(int(1));
        let outcome = solve_with_tightening(&mut m, x, 1, 1.0);
        assert_eq!(outcome.status, SolverStatus::Infeasible);
        assert!(outcome.solution.is_none());
    }

    #[test]
    fn tightens_toward_minimum() {
        let mut m = Model::default();
        let x = m.int(0, 10);
        m.c(x).ge(int(3));
        let outcome = solve_with_tightening(&mut m, x, 10, 5.0);
        assert_eq!(outcome.status, SolverStatus::Optimal);
        assert_eq!(outcome.objective_value, Some(3));
    }
}
