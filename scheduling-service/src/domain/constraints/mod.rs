//! C4 — Hard Constraint Builder, split by rule family the way the reference
//! codebase splits its validation rules one-file-per-concern.

pub mod coverage;
pub mod government;
pub mod requests;
pub mod sequencing;

use selen::prelude::*;

use crate::domain::cpmodel::DecisionVariables;
use crate::domain::hard_request_store::HardRequestInput;
use crate::domain::normalizer::NormalizedInput;
use crate::domain::prior_state::NursePriorState;

/// Night→Morning transition events collected while building the sequential
/// rules, fed into the soft penalty builder (§4.5). `seam` events come from
/// the prior month's last day being an N∧A double (a fact, not a variable);
/// their indicator is just `shift[nurse, day, Morning]` rather than an
/// AND with a "double happened today" variable.
#[derive(Debug, Clone, Copy)]
pub struct NightToMorningEvent {
    pub nurse: usize,
    pub day: usize,
    pub seam: bool,
}

pub struct HardConstraintOutput {
    pub night_to_morning_events: Vec<NightToMorningEvent>,
}

#[allow(clippy::too_many_arguments)]
pub fn build_all(
    m: &mut Model,
    input: &NormalizedInput,
    vars: &DecisionVariables,
    prior: &[NursePriorState],
    hard_requests: &HardRequestInput,
) -> HardConstraintOutput {
    coverage::build(m, input, vars);
    government::build(m, input, vars);
    let night_to_morning_events = sequencing::build(m, input, vars, prior);
    requests::build_hard_requests(m, input, vars, hard_requests);
    requests::build_hard_permanent_constraints(m, input, vars);

    HardConstraintOutput {
        night_to_morning_events,
    }
}
