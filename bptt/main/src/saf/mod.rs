// SAF (Simple API Facade) — re-exports for convenient access

// API types
pub use crate::api::config::{TrainConfig, DEFAULT_LEARNING_RATE};
pub use crate::api::error::{BpttError, BpttResult};
pub use crate::api::gate::{Gate, GateParams};

// Engine components
pub use crate::core::cell::LstmCell;
pub use crate::core::grad::{backward, GateGrads, GradientAccumulator};
pub use crate::core::loss::{sequence_loss, squared_error};
pub use crate::core::optim::sgd::Sgd;
pub use crate::core::unroll::run as unroll;
pub use crate::core::unroll::{Sequence, Snapshot};

// Training
pub use crate::core::training::metrics::Metrics;
pub use crate::core::training::trainer::Trainer;

// Linear algebra re-exports from cellgrad-core
pub use cellgrad_core::{LinalgError, Matrix, Vector};
