//! Domain-facing shape of the C11 hard-request fetch: a plain set of
//! (nurse id, date) pairs, decoupled from the HTTP transport in
//! `infrastructure::hard_request_store`.

use chrono::NaiveDate;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct HardRequestInput {
    approved: HashSet<(String, NaiveDate)>,
}

impl HardRequestInput {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, NaiveDate)>) -> Self {
        Self {
            approved: pairs.into_iter().collect(),
        }
    }

    pub fn is_approved_off(&self, nurse_id: &str, date: NaiveDate) -> bool {
        self.approved.contains(&(nurse_id.to_string(), date))
    }
}
