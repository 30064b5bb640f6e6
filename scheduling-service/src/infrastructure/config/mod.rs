use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::domain::constants;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub hard_request_store: HardRequestStoreSettings,
    #[serde(default)]
    pub scheduling_defaults: SchedulingDefaultsSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HardRequestStoreSettings {
    pub url: String,
}

/// Overridable defaults applied when a request omits the corresponding
/// field. Per-request values in the JSON body always win over these.
#[derive(Debug, Deserialize, Clone)]
pub struct SchedulingDefaultsSettings {
    pub required_nurses_morning: i32,
    pub required_nurses_afternoon: i32,
    pub required_nurses_night: i32,
    pub max_consecutive_shifts_worked: i32,
    pub target_off_days: i32,
    pub solver_time_limit_seconds: f64,
}

impl Default for SchedulingDefaultsSettings {
    fn default() -> Self {
        Self {
            required_nurses_morning: constants::DEFAULT_REQUIRED_NURSES_MORNING,
            required_nurses_afternoon: constants::DEFAULT_REQUIRED_NURSES_AFTERNOON,
            required_nurses_night: constants::DEFAULT_REQUIRED_NURSES_NIGHT,
            max_consecutive_shifts_worked: constants::DEFAULT_MAX_CONSECUTIVE_SHIFTS_WORKED,
            target_off_days: constants::DEFAULT_TARGET_OFF_DAYS,
            solver_time_limit_seconds: constants::DEFAULT_SOLVER_TIME_LIMIT_SECONDS,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
