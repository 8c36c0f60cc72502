//! Gate identifiers and the per-gate parameter triple.

use cellgrad_core::{LinalgResult, Matrix, Vector};

/// One of the four LSTM gates.
///
/// The forget, input, and output gates are sigmoid-activated; the candidate
/// gate (the cell input activation) is tanh-activated. Code that treats all
/// gates uniformly iterates [`Gate::ALL`] and indexes parameter tables with
/// [`Gate::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Forget,
    Input,
    Output,
    Candidate,
}

impl Gate {
    /// All gates, in the fixed table order used for parameter storage.
    pub const ALL: [Gate; 4] = [Gate::Forget, Gate::Input, Gate::Output, Gate::Candidate];

    /// Position of this gate in parameter tables.
    pub fn index(self) -> usize {
        match self {
            Gate::Forget => 0,
            Gate::Input => 1,
            Gate::Output => 2,
            Gate::Candidate => 3,
        }
    }
}

/// The learnable parameters of a single gate: input weights `w`
/// (hidden x input), recurrent weights `u` (hidden x hidden), and bias `b`
/// (hidden).
#[derive(Debug, Clone)]
pub struct GateParams {
    pub w: Matrix,
    pub u: Matrix,
    pub b: Vector,
}

impl GateParams {
    /// Zero-initialized parameters for the given dimensions.
    ///
    /// Allocation failure is surfaced rather than aborting; gate parameter
    /// tensors are the largest allocations a cell makes.
    pub fn try_zeros(hidden_dim: usize, input_dim: usize) -> LinalgResult<Self> {
        Ok(Self {
            w: Matrix::try_zeros(hidden_dim, input_dim)?,
            u: Matrix::try_zeros(hidden_dim, hidden_dim)?,
            b: Vector::try_zeros(hidden_dim)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_index() {
        for (i, gate) in Gate::ALL.iter().enumerate() {
            assert_eq!(gate.index(), i);
        }
    }

    #[test]
    fn test_gate_params_shapes() {
        let p = GateParams::try_zeros(3, 2).unwrap();
        assert_eq!((p.w.rows(), p.w.cols()), (3, 2));
        assert_eq!((p.u.rows(), p.u.cols()), (3, 3));
        assert_eq!(p.b.len(), 3);
    }
}
