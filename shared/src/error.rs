use thiserror::Error;

/// Error taxonomy for the scheduling core. Each variant maps to a single HTTP
/// status at the presentation boundary: `InvalidInput` to 400, everything
/// else to 500 (see `api::handlers::map_domain_error`).
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No feasible schedule exists: {0}")]
    Infeasible(String),

    #[error("Solver did not converge within the time limit: {0}")]
    Timeout(String),

    #[error("Scheduling model is invalid: {0}")]
    ModelInvalid(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
