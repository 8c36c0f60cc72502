//! The LSTM cell: parameters plus per-step state, and the forward transition.

use crate::api::error::{BpttError, BpttResult};
use crate::api::gate::{Gate, GateParams};
use cellgrad_core::{Matrix, Vector};

/// A single LSTM cell.
///
/// Implements the standard equations for one timestep:
///
/// ```text
/// f  = sigmoid(W_f·x + U_f·h_prev + b_f)
/// i  = sigmoid(W_i·x + U_i·h_prev + b_i)
/// o  = sigmoid(W_o·x + U_o·h_prev + b_o)
/// ca = tanh(W_c·x + U_c·h_prev + b_c)
/// c  = f ⊙ c_prev + i ⊙ ca
/// h  = o ⊙ tanh(c)
/// y  = W_y·h
/// ```
///
/// `step` evaluates these without touching the recurrent inputs, so a caller
/// can inspect the result before deciding to commit; `advance` moves
/// `h -> h_prev` and `c -> c_prev` for the next timestep. Call `reset_state`
/// before starting a fresh sequence.
#[derive(Debug, Clone)]
pub struct LstmCell {
    input_dim: usize,
    hidden_dim: usize,
    output_dim: usize,

    /// Gate parameters, indexed by `Gate::index`.
    gates: [GateParams; 4],
    /// Output projection (output x hidden).
    w_y: Matrix,

    // Live state, overwritten by each forward step.
    x: Vector,
    h_prev: Vector,
    c_prev: Vector,
    f: Vector,
    i: Vector,
    o: Vector,
    ca: Vector,
    c: Vector,
    h: Vector,
    y: Vector,
}

impl LstmCell {
    /// Create a cell with zero parameters and zero state.
    ///
    /// Dimensions are fixed for the cell's lifetime.
    pub fn new(input_dim: usize, hidden_dim: usize, output_dim: usize) -> BpttResult<Self> {
        assert!(input_dim > 0, "input_dim must be positive");
        assert!(hidden_dim > 0, "hidden_dim must be positive");
        assert!(output_dim > 0, "output_dim must be positive");

        let gates = [
            GateParams::try_zeros(hidden_dim, input_dim)?,
            GateParams::try_zeros(hidden_dim, input_dim)?,
            GateParams::try_zeros(hidden_dim, input_dim)?,
            GateParams::try_zeros(hidden_dim, input_dim)?,
        ];

        Ok(Self {
            input_dim,
            hidden_dim,
            output_dim,
            gates,
            w_y: Matrix::try_zeros(output_dim, hidden_dim)?,
            x: Vector::zeros(input_dim),
            h_prev: Vector::zeros(hidden_dim),
            c_prev: Vector::zeros(hidden_dim),
            f: Vector::zeros(hidden_dim),
            i: Vector::zeros(hidden_dim),
            o: Vector::zeros(hidden_dim),
            ca: Vector::zeros(hidden_dim),
            c: Vector::zeros(hidden_dim),
            h: Vector::zeros(hidden_dim),
            y: Vector::zeros(output_dim),
        })
    }

    /// Xavier-uniform initialization of all weight matrices; biases stay zero.
    pub fn init_random(&mut self) {
        let scale_w = (6.0 / (self.input_dim + self.hidden_dim) as f64).sqrt();
        let scale_u = (6.0 / (2 * self.hidden_dim) as f64).sqrt();
        for params in &mut self.gates {
            params.w = Matrix::random_uniform(self.hidden_dim, self.input_dim, -scale_w, scale_w);
            params.u = Matrix::random_uniform(self.hidden_dim, self.hidden_dim, -scale_u, scale_u);
        }
        let scale_y = (6.0 / (self.hidden_dim + self.output_dim) as f64).sqrt();
        self.w_y = Matrix::random_uniform(self.output_dim, self.hidden_dim, -scale_y, scale_y);
    }

    // ==================== Dimensions ====================

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn hidden_dim(&self) -> usize {
        self.hidden_dim
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    // ==================== Parameters ====================

    pub fn params(&self, gate: Gate) -> &GateParams {
        &self.gates[gate.index()]
    }

    pub fn params_mut(&mut self, gate: Gate) -> &mut GateParams {
        &mut self.gates[gate.index()]
    }

    pub fn w_y(&self) -> &Matrix {
        &self.w_y
    }

    /// Replace the output projection. The shape must match the cell's
    /// `output_dim x hidden_dim`.
    pub fn set_output_projection(&mut self, w_y: Matrix) -> BpttResult<()> {
        if w_y.rows() != self.output_dim || w_y.cols() != self.hidden_dim {
            return Err(BpttError::Dimension {
                expected: self.output_dim * self.hidden_dim,
                got: w_y.rows() * w_y.cols(),
            });
        }
        self.w_y = w_y;
        Ok(())
    }

    // ==================== State access ====================

    pub fn x(&self) -> &Vector {
        &self.x
    }

    pub fn h_prev(&self) -> &Vector {
        &self.h_prev
    }

    pub fn c_prev(&self) -> &Vector {
        &self.c_prev
    }

    pub fn f(&self) -> &Vector {
        &self.f
    }

    pub fn i(&self) -> &Vector {
        &self.i
    }

    pub fn o(&self) -> &Vector {
        &self.o
    }

    pub fn ca(&self) -> &Vector {
        &self.ca
    }

    pub fn c(&self) -> &Vector {
        &self.c
    }

    pub fn h(&self) -> &Vector {
        &self.h
    }

    pub fn y(&self) -> &Vector {
        &self.y
    }

    /// Set the recurrent state directly, e.g. to continue a sequence that was
    /// unrolled elsewhere.
    pub fn set_recurrent_state(&mut self, h_prev: Vector, c_prev: Vector) -> BpttResult<()> {
        if h_prev.len() != self.hidden_dim {
            return Err(BpttError::Dimension {
                expected: self.hidden_dim,
                got: h_prev.len(),
            });
        }
        if c_prev.len() != self.hidden_dim {
            return Err(BpttError::Dimension {
                expected: self.hidden_dim,
                got: c_prev.len(),
            });
        }
        self.h_prev = h_prev;
        self.c_prev = c_prev;
        Ok(())
    }

    /// Zero the recurrent state. Call before unrolling a fresh sequence.
    pub fn reset_state(&mut self) {
        self.h_prev = Vector::zeros(self.hidden_dim);
        self.c_prev = Vector::zeros(self.hidden_dim);
    }

    // ==================== Forward ====================

    /// Evaluate one forward step for the input `x`.
    ///
    /// Overwrites the gate activations, cell state, hidden state, and output,
    /// reading `h_prev`/`c_prev` but leaving them untouched — commit with
    /// [`advance`](Self::advance) once the step is accepted. Parameters are
    /// read-only here. On error the cell state is unchanged.
    pub fn step(&mut self, x: &Vector) -> BpttResult<()> {
        if x.len() != self.input_dim {
            return Err(BpttError::Dimension {
                expected: self.input_dim,
                got: x.len(),
            });
        }

        let f = self.gate_activation(Gate::Forget, x)?;
        let i = self.gate_activation(Gate::Input, x)?;
        let o = self.gate_activation(Gate::Output, x)?;
        let ca = self.gate_activation(Gate::Candidate, x)?;

        let c = f.hadamard(&self.c_prev)?.add(&i.hadamard(&ca)?)?;
        let h = o.hadamard(&c.tanh())?;
        let y = self.w_y.matvec(&h)?;

        self.x = x.clone();
        self.f = f;
        self.i = i;
        self.o = o;
        self.ca = ca;
        self.c = c;
        self.h = h;
        self.y = y;
        Ok(())
    }

    /// Commit the last step: the produced `h`/`c` become the recurrent inputs
    /// of the next one.
    pub fn advance(&mut self) {
        self.h_prev = self.h.clone();
        self.c_prev = self.c.clone();
    }

    /// Shared gate evaluation: activation(W·x + U·h_prev + b), sigmoid for
    /// f/i/o and tanh for the candidate.
    fn gate_activation(&self, gate: Gate, x: &Vector) -> BpttResult<Vector> {
        let params = &self.gates[gate.index()];
        let pre = params
            .w
            .matvec(x)?
            .add(&params.u.matvec(&self.h_prev)?)?
            .add(&params.b)?;
        Ok(match gate {
            Gate::Candidate => pre.tanh(),
            _ => pre.sigmoid(),
        })
    }
}
