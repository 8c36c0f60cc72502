//! Backpropagation through time over an unrolled sequence.
//!
//! Per-timestep loss is the unnormalized squared error
//! `E_t = Σ (y_t − target_t)²`, summed over the sequence. The gradients flow:
//!
//! ```text
//! dE/dh_t  = 2(y_t − target_t)ᵀ · W_y
//! dh/dc_t  = o_t ⊙ sech²(c_t)
//! dE/dc_t  = dE/dh_t ⊙ dh/dc_t + f_{t+1} ⊙ dE/dc_{t+1}
//! ```
//!
//! The `dE/dc` recurrence runs from the last timestep to the first; unfolding
//! it reproduces the sum over future cell states attenuated by the product of
//! intervening forget activations, `Σ_k (dE/dh_k ⊙ dh/dc_k) ⊙ Π f_j`.
//!
//! At each timestep the gate-level gradients are
//!
//! ```text
//! dE/df_t  = dE/dc_t ⊙ c_prev_t      dE/di_t  = dE/dc_t ⊙ ca_t
//! dE/dca_t = dE/dc_t ⊙ i_t           dE/do_t  = dE/dh_t ⊙ tanh(c_t)
//! ```
//!
//! and each parameter gradient accumulates the pre-activation term times the
//! step's inputs: `dE/dW += (dE/dgate ⊙ dgate/dX) xᵀ`,
//! `dE/dU += (dE/dgate ⊙ dgate/dX) h_prevᵀ`, `dE/db += dE/dgate ⊙ dgate/dX`,
//! where `X = W·x + U·h_prev + b`.

use crate::api::error::{BpttError, BpttResult};
use crate::api::gate::Gate;
use crate::core::unroll::{Sequence, Snapshot};
use cellgrad_core::{Matrix, Vector};

/// Gradient of the loss with respect to one gate's parameter triple.
#[derive(Debug, Clone)]
pub struct GateGrads {
    pub w: Matrix,
    pub u: Matrix,
    pub b: Vector,
}

/// The twelve time-summed parameter gradients of one backward pass:
/// `dE/dW`, `dE/dU`, `dE/db` for each of the four gates.
///
/// Zero-initialized at creation, summed into across all timesteps, read by
/// the optimizer, then discarded.
#[derive(Debug, Clone)]
pub struct GradientAccumulator {
    input_dim: usize,
    hidden_dim: usize,
    grads: [GateGrads; 4],
}

impl GradientAccumulator {
    /// All-zero accumulator shaped for the given cell dimensions.
    pub fn zeros(input_dim: usize, hidden_dim: usize) -> BpttResult<Self> {
        let zero = || -> BpttResult<GateGrads> {
            Ok(GateGrads {
                w: Matrix::try_zeros(hidden_dim, input_dim)?,
                u: Matrix::try_zeros(hidden_dim, hidden_dim)?,
                b: Vector::try_zeros(hidden_dim)?,
            })
        };
        Ok(Self {
            input_dim,
            hidden_dim,
            grads: [zero()?, zero()?, zero()?, zero()?],
        })
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn hidden_dim(&self) -> usize {
        self.hidden_dim
    }

    pub fn gate(&self, gate: Gate) -> &GateGrads {
        &self.grads[gate.index()]
    }

    pub(crate) fn gate_mut(&mut self, gate: Gate) -> &mut GateGrads {
        &mut self.grads[gate.index()]
    }

    /// Sum another accumulator into this one.
    pub fn merge(&mut self, other: &GradientAccumulator) -> BpttResult<()> {
        if other.input_dim != self.input_dim || other.hidden_dim != self.hidden_dim {
            return Err(BpttError::Dimension {
                expected: self.hidden_dim * self.input_dim,
                got: other.hidden_dim * other.input_dim,
            });
        }
        for gate in Gate::ALL {
            let src = &other.grads[gate.index()];
            let dst = self.gate_mut(gate);
            dst.w.add_scaled(&src.w, 1.0)?;
            dst.u.add_scaled(&src.u, 1.0)?;
            dst.b.add_scaled(&src.b, 1.0)?;
        }
        Ok(())
    }
}

/// Run the backward pass over an unrolled sequence.
///
/// `targets` must hold one vector per snapshot, each of the output dimension.
/// An empty sequence yields the all-zero accumulator. The accumulator sums
/// every timestep's contribution; nothing in the sequence is mutated.
pub fn backward(
    seq: &Sequence,
    targets: &[Vector],
    w_y: &Matrix,
) -> BpttResult<GradientAccumulator> {
    if targets.len() != seq.len() {
        return Err(BpttError::Dimension {
            expected: seq.len(),
            got: targets.len(),
        });
    }

    let n = seq.len();
    let mut acc = GradientAccumulator::zeros(seq.input_dim(), seq.hidden_dim())?;
    if n == 0 {
        return Ok(acc);
    }

    // Direct terms per timestep: dE/dh and dh/dc.
    let mut direct: Vec<(Vector, Vector)> = Vec::with_capacity(n);
    for (snap, target) in seq.iter().zip(targets.iter()) {
        let residual = snap.y.sub(target)?;
        let dedh = w_y.matvec_t(&residual.scale(2.0))?;
        let sech_c = snap.c.sech();
        let dhdc = snap.o.hadamard(&sech_c.hadamard(&sech_c)?)?;
        direct.push((dedh, dhdc));
    }

    // dE/dc sweep, last timestep first. The final step has no future term;
    // earlier steps add the next step's dE/dc gated by its forget activation.
    let mut dedc: Vec<Vector> = vec![Vector::zeros(seq.hidden_dim()); n];
    for t in (0..n).rev() {
        let (dedh, dhdc) = &direct[t];
        let mut grad = dedh.hadamard(dhdc)?;
        if t + 1 < n {
            let f_next = &seq.steps()[t + 1].f;
            grad = grad.add(&f_next.hadamard(&dedc[t + 1])?)?;
        }
        dedc[t] = grad;
    }

    // Accumulate the per-gate parameter gradients.
    for (t, snap) in seq.iter().enumerate() {
        let (dedh, _) = &direct[t];
        for gate in Gate::ALL {
            let pre = pre_activation_grad(gate, snap, &dedc[t], dedh)?;
            let grads = acc.gate_mut(gate);
            grads.w.add_scaled(&Matrix::outer(&pre, &snap.x), 1.0)?;
            grads.u.add_scaled(&Matrix::outer(&pre, &snap.h_prev), 1.0)?;
            grads.b.add_scaled(&pre, 1.0)?;
        }
    }

    Ok(acc)
}

/// Gradient of the loss with respect to one gate's pre-activation
/// `X = W·x + U·h_prev + b` at a single timestep.
///
/// The stored activations carry their own derivatives: for a sigmoid gate
/// `σ'(X) = g ⊙ (1 − g)`, and for the candidate
/// `tanh'(X) = 1 − ca² = sech²(X)`.
fn pre_activation_grad(
    gate: Gate,
    snap: &Snapshot,
    dedc: &Vector,
    dedh: &Vector,
) -> BpttResult<Vector> {
    let (dedgate, dact) = match gate {
        Gate::Forget => (dedc.hadamard(&snap.c_prev)?, sigmoid_derivative(&snap.f)),
        Gate::Input => (dedc.hadamard(&snap.ca)?, sigmoid_derivative(&snap.i)),
        // The output gate reaches the loss only through h, not through c.
        Gate::Output => (dedh.hadamard(&snap.c.tanh())?, sigmoid_derivative(&snap.o)),
        Gate::Candidate => (
            dedc.hadamard(&snap.i)?,
            snap.ca.map(|v| 1.0 - v * v),
        ),
    };
    Ok(dedgate.hadamard(&dact)?)
}

fn sigmoid_derivative(activated: &Vector) -> Vector {
    activated.map(|v| v * (1.0 - v))
}
