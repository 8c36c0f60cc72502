//! Plain gradient descent over a cell's parameter tensors.

use crate::api::config::DEFAULT_LEARNING_RATE;
use crate::api::error::{BpttError, BpttResult};
use crate::api::gate::Gate;
use crate::core::cell::LstmCell;
use crate::core::grad::GradientAccumulator;

/// Gradient-descent update: `param ← param − lr · grad` for every one of the
/// twelve gate parameter tensors.
pub struct Sgd {
    learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    pub fn lr(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_lr(&mut self, lr: f64) {
        self.learning_rate = lr;
    }

    /// Apply an accumulated gradient to the cell's parameters in place.
    ///
    /// The accumulator must be shaped for the cell's dimensions; on mismatch
    /// nothing is mutated.
    pub fn apply(&self, cell: &mut LstmCell, acc: &GradientAccumulator) -> BpttResult<()> {
        if acc.input_dim() != cell.input_dim() || acc.hidden_dim() != cell.hidden_dim() {
            return Err(BpttError::Dimension {
                expected: cell.hidden_dim() * cell.input_dim(),
                got: acc.hidden_dim() * acc.input_dim(),
            });
        }

        let lr = self.learning_rate;
        for gate in Gate::ALL {
            let grads = acc.gate(gate);
            let params = cell.params_mut(gate);
            params.w.add_scaled(&grads.w, -lr)?;
            params.u.add_scaled(&grads.u, -lr)?;
            params.b.add_scaled(&grads.b, -lr)?;
        }
        Ok(())
    }
}

impl Default for Sgd {
    /// Fallback learning rate only; callers normally pass their own.
    fn default() -> Self {
        Self::new(DEFAULT_LEARNING_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgrad_core::Vector;

    #[test]
    fn test_apply_moves_against_gradient() {
        let mut cell = LstmCell::new(1, 2, 1).unwrap();
        let mut acc = GradientAccumulator::zeros(1, 2).unwrap();

        // Seed one bias gradient and check the exact update on it, and that
        // untouched tensors stay put.
        let grad_b = Vector::from_vec(vec![2.0, -4.0]);
        acc.gate_mut(Gate::Forget)
            .b
            .add_scaled(&grad_b, 1.0)
            .unwrap();

        Sgd::new(0.5).apply(&mut cell, &acc).unwrap();
        assert_eq!(cell.params(Gate::Forget).b.as_slice(), &[-1.0, 2.0]);
        assert!(cell
            .params(Gate::Input)
            .b
            .as_slice()
            .iter()
            .all(|&v| v == 0.0));
    }

    #[test]
    fn test_apply_rejects_mismatched_accumulator() {
        let mut cell = LstmCell::new(1, 2, 1).unwrap();
        let acc = GradientAccumulator::zeros(2, 2).unwrap();
        assert!(Sgd::default().apply(&mut cell, &acc).is_err());
        // Nothing mutated.
        assert!(cell
            .params(Gate::Forget)
            .b
            .as_slice()
            .iter()
            .all(|&v| v == 0.0));
    }

    #[test]
    fn test_default_learning_rate_fallback() {
        assert_eq!(Sgd::default().lr(), 0.001);
    }
}
