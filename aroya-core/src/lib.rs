pub mod envelope;
pub mod flight;
pub mod ids;
pub mod pii;
pub mod reservation;
pub mod seat;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
