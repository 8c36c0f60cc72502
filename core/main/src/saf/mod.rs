//! Facade re-exports for cellgrad-core

pub use crate::api::error::{LinalgError, LinalgResult};
pub use crate::core::matrix::Matrix;
pub use crate::core::vector::Vector;
