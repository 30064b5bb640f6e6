pub mod error;
pub mod types;

pub use error::{DomainError, DomainResult};
pub use types::{RequestShiftCode, ShiftKind, SolverStatus};
