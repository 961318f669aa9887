//! `matrix`: `x := M * x` for an involutory `M`
//!
//! ```text
//! local y: array[dim] = 0
//!     y[i] += row_i(M) . x     for every i
//!     x[i] <=> y[i]            for every i
//! delocal y == M * x
//! ```
//!
//! The whole block is one step: each `x[i]` is read by every row product and
//! then swapped, so spreading the work over several steps would mutate
//! certified reads. The `delocal` condition holds because `M * M = I`.

use crate::error::{ProcedureError, Result};
use crate::matrix::InvolutoryMatrix;
use crate::procedure::Procedure;
use crate::value::Binding;
use revcheck_core::{exchange, CellGroup, ContainerCell, Place, Trackable};
use std::cell::RefCell;
use tracing::trace;

/// Variables of [`MatrixApply`]
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixState {
    /// Vector being transformed
    pub x: RefCell<Vec<i64>>,
}

/// Multiply a vector by an involutory matrix through a block-local accumulator
#[derive(Debug, Clone)]
pub struct MatrixApply {
    matrix: InvolutoryMatrix,
    x0: Vec<i64>,
}

impl MatrixApply {
    /// Procedure for `matrix` starting from `x0`
    ///
    /// Fails with `InvalidOptions` if `x0` does not have `matrix.dim()` entries.
    pub fn new(matrix: InvolutoryMatrix, x0: Vec<i64>) -> Result<Self> {
        if x0.len() != matrix.dim() {
            return Err(ProcedureError::invalid_options(format!(
                "vector of length {} for a {}x{} matrix",
                x0.len(),
                matrix.dim(),
                matrix.dim()
            )));
        }
        Ok(MatrixApply { matrix, x0 })
    }

    /// The catalog instance: a 3x3 shear-and-reflect on `[3, 4, 5]`
    pub fn standard() -> Self {
        MatrixApply {
            matrix: InvolutoryMatrix {
                dim: 3,
                entries: vec![-1, 0, 0, 2, 1, 0, 0, 0, -1],
            },
            x0: vec![3, 4, 5],
        }
    }

    /// The matrix applied
    pub fn matrix(&self) -> &InvolutoryMatrix {
        &self.matrix
    }
}

impl Procedure for MatrixApply {
    const NAME: &'static str = "matrix";
    const SUMMARY: &'static str = "x := M * x through a block-local accumulator, M * M = I";
    type State = MatrixState;

    fn initial(&self) -> MatrixState {
        MatrixState {
            x: RefCell::new(self.x0.clone()),
        }
    }

    fn apply(&self, state: &MatrixState) -> Result<u64> {
        let dim = self.matrix.dim();
        let x_ = ContainerCell::new("x", &state.x);
        let mut cells = CellGroup::new(Self::NAME);
        cells.push(&x_);

        let y = RefCell::new(vec![0i64; dim]);
        {
            let y_ = ContainerCell::new("y", &y);
            let mut block = cells.nested("local y");
            block.push(&y_);

            let mut xs = Vec::with_capacity(dim);
            for i in 0..dim {
                xs.push(x_.get_at(i)?.load());
            }
            for i in 0..dim {
                let dot = self.matrix.row_dot(i, &xs);
                y_.get_at(i)?.update(|v| *v = v.wrapping_add(dot));
            }
            for i in 0..dim {
                exchange(x_.get_at(i)?, y_.get_at(i)?);
            }

            let expected = self.matrix.apply(&x_.get_whole()?.borrow());
            if *y_.get_whole()?.borrow() != expected {
                return Err(ProcedureError::assertion(Self::NAME, "delocal y == M * x"));
            }
            block.advance()?;
        }
        trace!(x = ?state.x.borrow(), "matrix applied");

        Ok(cells.steps())
    }

    fn bindings(&self, state: &MatrixState) -> Vec<Binding> {
        vec![Binding::array("x", state.x.borrow().iter())]
    }
}
