//! Dense row-major f64 matrix with the products the recurrent engine needs.

use crate::api::error::{LinalgError, LinalgResult};
use crate::core::vector::Vector;
use rand::Rng;

/// A dense, row-major matrix of `f64` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    // ==================== Constructors ====================

    /// Create a `rows x cols` matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create a zero matrix, surfacing allocation failure instead of aborting.
    pub fn try_zeros(rows: usize, cols: usize) -> LinalgResult<Self> {
        let elements = rows * cols;
        let mut data = Vec::new();
        data.try_reserve_exact(elements)
            .map_err(|_| LinalgError::Allocation { elements })?;
        data.resize(elements, 0.0);
        Ok(Self { rows, cols, data })
    }

    /// Create a matrix from row-major data.
    pub fn from_vec(data: Vec<f64>, rows: usize, cols: usize) -> LinalgResult<Self> {
        if data.len() != rows * cols {
            return Err(LinalgError::Dimension {
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a matrix with values drawn uniformly from `[lo, hi)`.
    pub fn random_uniform(rows: usize, cols: usize, lo: f64, hi: f64) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            rows,
            cols,
            data: (0..rows * cols).map(|_| rng.gen_range(lo..hi)).collect(),
        }
    }

    // ==================== Properties ====================

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read a single element.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col]
    }

    /// Write a single element.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col] = value;
    }

    /// Borrow the row-major data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    fn check_shape(&self, other: &Matrix) -> LinalgResult<()> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(LinalgError::Shape {
                expected_rows: self.rows,
                expected_cols: self.cols,
                got_rows: other.rows,
                got_cols: other.cols,
            });
        }
        Ok(())
    }

    // ==================== Products ====================

    /// Matrix-vector product `self · v`.
    pub fn matvec(&self, v: &Vector) -> LinalgResult<Vector> {
        if v.len() != self.cols {
            return Err(LinalgError::Dimension {
                expected: self.cols,
                got: v.len(),
            });
        }
        let x = v.as_slice();
        let mut out = Vec::with_capacity(self.rows);
        for row in self.data.chunks_exact(self.cols) {
            out.push(row.iter().zip(x.iter()).map(|(a, b)| a * b).sum());
        }
        Ok(Vector::from_vec(out))
    }

    /// Transposed matrix-vector product `selfᵀ · v`.
    ///
    /// Equivalent to the row-vector form `vᵀ · self`.
    pub fn matvec_t(&self, v: &Vector) -> LinalgResult<Vector> {
        if v.len() != self.rows {
            return Err(LinalgError::Dimension {
                expected: self.rows,
                got: v.len(),
            });
        }
        let x = v.as_slice();
        let mut out = vec![0.0; self.cols];
        for (i, row) in self.data.chunks_exact(self.cols).enumerate() {
            for (j, a) in row.iter().enumerate() {
                out[j] += a * x[i];
            }
        }
        Ok(Vector::from_vec(out))
    }

    /// Rank-1 outer product `u · vᵀ`, shaped `u.len() x v.len()`.
    pub fn outer(u: &Vector, v: &Vector) -> Matrix {
        let mut data = Vec::with_capacity(u.len() * v.len());
        for &a in u.as_slice() {
            for &b in v.as_slice() {
                data.push(a * b);
            }
        }
        Matrix {
            rows: u.len(),
            cols: v.len(),
            data,
        }
    }

    // ==================== Element-wise ops ====================

    /// Element-wise addition.
    pub fn add(&self, other: &Matrix) -> LinalgResult<Matrix> {
        self.check_shape(other)?;
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a + b)
                .collect(),
        })
    }

    /// In-place scaled accumulation: `self += alpha * other`.
    pub fn add_scaled(&mut self, other: &Matrix, alpha: f64) -> LinalgResult<()> {
        self.check_shape(other)?;
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += alpha * b;
        }
        Ok(())
    }

    /// Multiply every element by a scalar.
    pub fn scale(&self, scalar: f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|a| a * scalar).collect(),
        }
    }
}
