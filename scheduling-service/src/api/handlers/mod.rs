pub mod schedule_handlers;

pub use schedule_handlers::{generate_schedule, healthz};
