//! Involutory integer matrices
//!
//! A matrix with `M * M = I` is its own inverse, so multiplying a vector by it
//! is a reversible update. Construction validates both properties.

use crate::error::{ProcedureError, Result};
use serde::Serialize;

/// Square integer matrix with `M * M = I`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvolutoryMatrix {
    pub(crate) dim: usize,
    pub(crate) entries: Vec<i64>,
}

impl InvolutoryMatrix {
    /// Build from row-major entries
    ///
    /// Fails with `NotSquare` when the entry count is not a perfect square,
    /// and `NotInvolutory` when the matrix squared is not the identity.
    pub fn new(entries: Vec<i64>) -> Result<Self> {
        let dim = isqrt(entries.len());
        if dim * dim != entries.len() {
            return Err(ProcedureError::NotSquare { len: entries.len() });
        }

        let matrix = InvolutoryMatrix { dim, entries };
        for row in 0..dim {
            for col in 0..dim {
                let expected = i64::from(row == col);
                if matrix.square_at(row, col) != expected {
                    return Err(ProcedureError::NotInvolutory { row, col });
                }
            }
        }
        Ok(matrix)
    }

    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Entry at `(row, col)`
    pub fn at(&self, row: usize, col: usize) -> i64 {
        self.entries[row * self.dim + col]
    }

    /// Row `row` dotted with `x`
    ///
    /// `x` must have `dim` entries.
    pub fn row_dot(&self, row: usize, x: &[i64]) -> i64 {
        (0..self.dim).fold(0i64, |acc, col| {
            acc.wrapping_add(self.at(row, col).wrapping_mul(x[col]))
        })
    }

    /// `M * x`
    pub fn apply(&self, x: &[i64]) -> Vec<i64> {
        (0..self.dim).map(|row| self.row_dot(row, x)).collect()
    }

    fn square_at(&self, row: usize, col: usize) -> i64 {
        (0..self.dim).fold(0i64, |acc, k| {
            acc.wrapping_add(self.at(row, k).wrapping_mul(self.at(k, col)))
        })
    }
}

fn isqrt(n: usize) -> usize {
    let mut root = 0;
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
