pub mod schedule_response;

pub use schedule_response::{assemble, ErrorResponse, GenerateScheduleResponse};
