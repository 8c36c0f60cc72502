//! # cellgrad-bptt
//!
//! A single-cell LSTM recurrent unit with full backpropagation through time.
//!
//! The crate is organized around four pieces:
//!
//! - [`LstmCell`] — the gate/state equations for one forward step
//! - [`unroll`] — drives a cell across an input series, capturing a
//!   [`Sequence`] of per-timestep [`Snapshot`]s
//! - [`backward`] — consumes a sequence and its targets and produces the
//!   time-summed [`GradientAccumulator`] over all twelve parameter tensors
//! - [`Sgd`] — applies an accumulator to a cell's parameters in place
//!
//! A training iteration wires them in a loop: unroll, backpropagate, apply.
//!
//! ## Example
//!
//! ```rust
//! use cellgrad_bptt::{backward, unroll, LstmCell, Sgd, Vector};
//!
//! let mut cell = LstmCell::new(1, 2, 1).unwrap();
//! cell.init_random();
//!
//! let series = vec![Vector::from_vec(vec![0.5]), Vector::from_vec(vec![-0.5])];
//! let targets = vec![Vector::from_vec(vec![0.1]), Vector::from_vec(vec![0.2])];
//!
//! let seq = unroll(&mut cell, &series).unwrap();
//! let grads = backward(&seq, &targets, cell.w_y()).unwrap();
//! Sgd::new(0.01).apply(&mut cell, &grads).unwrap();
//! ```

pub mod api;
pub mod core;
mod saf;

pub use saf::*;
