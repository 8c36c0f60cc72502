use thiserror::Error;

pub type LinalgResult<T> = Result<T, LinalgError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinalgError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    Dimension { expected: usize, got: usize },

    #[error("shape mismatch: expected {expected_rows}x{expected_cols}, got {got_rows}x{got_cols}")]
    Shape {
        expected_rows: usize,
        expected_cols: usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("allocation of {elements} elements failed")]
    Allocation { elements: usize },
}
