pub mod schedule_request;

pub use schedule_request::{GenerateScheduleRequest, ScheduleWindow};
