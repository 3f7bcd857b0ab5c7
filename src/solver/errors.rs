use thiserror::Error;

/// Invalid-input conditions, all raised before any search begins.
/// Everything else the engine does is enforced by construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("target must be >= 0, got {0}")]
    NegativeTarget(i64),
    #[error("numbers must be > 0, got {0}")]
    NonPositiveNumber(i64),
    #[error("at most 64 numbers are supported, got {0}")]
    TooManyNumbers(usize),
}
