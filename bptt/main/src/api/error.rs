use cellgrad_core::LinalgError;
use thiserror::Error;

pub type BpttResult<T> = Result<T, BpttError>;

#[derive(Debug, Error)]
pub enum BpttError {
    #[error("linear algebra error: {0}")]
    Linalg(#[from] LinalgError),

    #[error("dimension mismatch: expected {expected}, got {got}")]
    Dimension { expected: usize, got: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
