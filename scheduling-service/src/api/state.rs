use std::sync::Arc;

use crate::infrastructure::config::Settings;
use crate::infrastructure::HardRequestStore;

#[derive(Clone)]
pub struct AppState {
    pub hard_request_store: Arc<dyn HardRequestStore>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(hard_request_store: Arc<dyn HardRequestStore>, settings: Arc<Settings>) -> Self {
        Self {
            hard_request_store,
            settings,
        }
    }
}
