//! # cellgrad-core
//!
//! Dense linear algebra for the cellgrad LSTM engine.
//!
//! This crate provides `Vector` and `Matrix` over `f64` with the operations
//! the recurrent engine needs: element-wise arithmetic, hadamard products,
//! matrix-vector products (plain and transposed), rank-1 outer products, and
//! the element-wise activations (sigmoid, tanh, sech).
//!
//! Every operation over two operands validates dimensions and returns a
//! `LinalgError` on mismatch rather than truncating.
//!
//! ## Example
//!
//! ```rust
//! use cellgrad_core::{Matrix, Vector};
//!
//! let w = Matrix::from_vec(vec![1.0, 0.0, 0.0, 1.0], 2, 2).unwrap();
//! let x = Vector::from_vec(vec![3.0, -1.0]);
//! let y = w.matvec(&x).unwrap();
//! assert_eq!(y.as_slice(), &[3.0, -1.0]);
//! ```

pub mod api;
mod core;
mod saf;

pub use saf::*;
