//! Wires C1 through C9 into the single synchronous computation a request
//! performs. `api::handlers` is the only caller; tests drive this directly
//! to avoid going through HTTP.

use chrono::NaiveDate;
use shared::{DomainError, DomainResult, SolverStatus};
use std::collections::HashMap;

use selen::prelude::*;

use crate::domain::carry_over;
use crate::domain::constraints;
use crate::domain::cpmodel;
use crate::domain::extractor::{self, ExtractedSchedule};
use crate::domain::hard_request_store::HardRequestInput;
use crate::domain::model_types::{MonthlySoftRequest, Nurse, PreviousMonthSchedule};
use crate::domain::normalizer::{self, NormalizedInput};
use crate::domain::penalties;
use crate::domain::prior_state;
use crate::domain::solver;

#[allow(clippy::too_many_arguments)]
pub struct GenerateScheduleInput {
    pub nurses: Vec<Nurse>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub previous_month_schedule: Option<PreviousMonthSchedule>,
    pub monthly_soft_requests: HashMap<String, Vec<MonthlySoftRequest>>,
    pub carry_over_flags: HashMap<String, bool>,
    pub holidays: Vec<u32>,
    pub required_nurses_morning: i32,
    pub required_nurses_afternoon: i32,
    pub required_nurses_night: i32,
    pub max_consecutive_shifts_worked: i32,
    pub target_off_days: i32,
    pub solver_time_limit: f64,
    pub hard_requests: HardRequestInput,
}

pub struct GenerateScheduleOutput {
    pub extracted: ExtractedSchedule,
    pub normalized: NormalizedInput,
    pub status: SolverStatus,
    pub objective_value: Option<i32>,
    pub next_carry_over_flags: HashMap<String, bool>,
}

pub fn run(request: GenerateScheduleInput) -> DomainResult<GenerateScheduleOutput> {
    let normalized = normalizer::normalize(
        request.nurses,
        request.start_date,
        request.end_date,
        request.holidays,
        request.required_nurses_morning,
        request.required_nurses_afternoon,
        request.required_nurses_night,
        request.max_consecutive_shifts_worked,
        request.target_off_days,
        request.solver_time_limit,
    )?;

    let prior = prior_state::derive_prior_state(&normalized, request.previous_month_schedule.as_ref());

    let mut m = Model::default();
    let vars = cpmodel::build_variables(&mut m, &normalized, &prior);
    let hard_output = constraints::build_all(&mut m, &normalized, &vars, &prior, &request.hard_requests);
    let terms = penalties::build(
        &mut m,
        &normalized,
        &vars,
        &hard_output.night_to_morning_events,
        &request.monthly_soft_requests,
        &request.carry_over_flags,
    );

    if terms.is_empty() {
        return finish_without_objective(&mut m, &normalized, &vars, request.solver_time_limit, &request.monthly_soft_requests);
    }

    // Each term's own domain ceiling, not a flat `* 2`: `shortfall` can run up
    // to `target_off_days` and `range_imbalance` up to its own `domain_max`,
    // both of which regularly exceed 1 (e.g. a generous `target_off_days` on
    // a short window), so a flat multiplier can under-bound the true
    // objective and make the first solve spuriously infeasible.
    let objective_upper_bound: i32 = terms
        .iter()
        .map(|t| (t.weight as i64).saturating_mul(t.domain_max as i64))
        .fold(0i64, |acc, v| acc.saturating_add(v))
        .min(i32::MAX as i64) as i32;
    let objective_var = m.int(0, objective_upper_bound.max(1));
    let weight_pairs: Vec<(VarId, i32)> = terms.iter().map(|t| (t.var, t.weight)).collect();
    let weighted = cpmodel::linear::weighted_sum(&mut m, &weight_pairs);
    m.c(objective_var).eq(weighted);

    let outcome = solver::solve_with_tightening(
        &mut m,
        objective_var,
        objective_upper_bound,
        normalized.solver_time_limit,
    );

    let status = outcome.status;
    let Some(solution) = outcome.solution else {
        return Err(DomainError::Infeasible(
            "no feasible schedule satisfies coverage, government rules, and hard requests together (likely cause: required Morning coverage vs available government nurses, or a conflicting hard request)".to_string(),
        ));
    };

    let extracted = extractor::extract(&normalized, &vars, &solution);
    let next_carry_over_flags =
        carry_over::evaluate(&normalized, &extracted, &request.monthly_soft_requests);

    Ok(GenerateScheduleOutput {
        extracted,
        normalized,
        status,
        objective_value: outcome.objective_value,
        next_carry_over_flags,
    })
}

/// No soft penalty terms at all (e.g. no nurses carry requests): skip the
/// tightening loop and just solve once for feasibility.
fn finish_without_objective(
    m: &mut Model,
    normalized: &NormalizedInput,
    vars: &cpmodel::DecisionVariables,
    _time_limit: f64,
    monthly_requests: &HashMap<String, Vec<MonthlySoftRequest>>,
) -> DomainResult<GenerateScheduleOutput> {
    let solution = m.solve().map_err(|_| {
        DomainError::Infeasible(
            "no feasible schedule satisfies coverage, government rules, and hard requests together (likely cause: required Morning coverage vs available government nurses, or a conflicting hard request)".to_string(),
        )
    })?;

    let extracted = extractor::extract(normalized, vars, &solution);
    let next_carry_over_flags = carry_over::evaluate(normalized, &extracted, monthly_requests);

    Ok(GenerateScheduleOutput {
        extracted,
        normalized: clone_normalized(normalized),
        status: SolverStatus::Optimal,
        objective_value: Some(0),
        next_carry_over_flags,
    })
}

/// `NormalizedInput` has no `Clone` derive (it owns `Vec<Nurse>`, which the
/// rest of the pipeline only ever needs by reference); this helper exists
/// solely to let the no-objective fast path return the same shape as the
/// main path without threading an extra lifetime through the return type.
fn clone_normalized(normalized: &NormalizedInput) -> NormalizedInput {
    NormalizedInput {
        nurses: normalized.nurses.clone(),
        days: normalized.days.clone(),
        government_idx: normalized.government_idx.clone(),
        non_government_idx: normalized.non_government_idx.clone(),
        holiday_days: normalized.holiday_days.clone(),
        required_morning: normalized.required_morning,
        required_afternoon: normalized.required_afternoon,
        required_night: normalized.required_night,
        max_consecutive_shifts_worked: normalized.max_consecutive_shifts_worked,
        target_off_days: normalized.target_off_days,
        solver_time_limit: normalized.solver_time_limit,
    }
}
