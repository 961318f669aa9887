//! `fib-copy`: compute, copy, uncompute
//!
//! `fib` is injective but not an involution, so it runs as plain code around
//! a tracked core:
//!
//! ```text
//! call fib        (x1, x2) = (0, 1)       -> (fib(n), fib(n + 1))
//! out ^= x2       tracked
//! uncall fib      (fib(n), fib(n + 1))    -> (0, 1)
//! ```
//!
//! Arithmetic wraps, so `fib` stays exactly invertible for any `n`.

use crate::error::{ProcedureError, Result};
use crate::procedure::Procedure;
use crate::value::Binding;
use revcheck_core::{CellGroup, Place, ScalarCell, Trackable};
use std::cell::RefCell;
use tracing::trace;

/// Variables of [`FibCopy`]
#[derive(Debug, Clone, PartialEq)]
pub struct FibState {
    /// Number of `fib` iterations
    pub n: RefCell<i64>,
    /// `fib(k)` while computing, 0 outside
    pub x1: RefCell<i64>,
    /// `fib(k + 1)` while computing, 1 outside
    pub x2: RefCell<i64>,
    /// Receives `fib(n + 1)` by xor
    pub out: RefCell<i64>,
}

/// Bennett-style compute-copy-uncompute of `fib(n + 1)` into `out`
#[derive(Debug, Clone, Copy, Default)]
pub struct FibCopy;

impl FibCopy {
    fn iterations(state: &FibState) -> Result<u64> {
        let n = *state.n.borrow();
        u64::try_from(n).map_err(|_| ProcedureError::assertion(Self::NAME, format!("n >= 0, got {n}")))
    }

    fn expect_seed(state: &FibState, at: &str) -> Result<()> {
        let (x1, x2) = (*state.x1.borrow(), *state.x2.borrow());
        if x1 != 0 || x2 != 1 {
            return Err(ProcedureError::assertion(
                Self::NAME,
                format!("x1 == 0 && x2 == 1 at {at}, got x1 = {x1}, x2 = {x2}"),
            ));
        }
        Ok(())
    }

    /// `from x1 == 0 && x2 == 1 loop x1 += x2; x1 <=> x2 until k == n`
    fn fib(state: &FibState) -> Result<()> {
        Self::expect_seed(state, "fib entry")?;
        for _ in 0..Self::iterations(state)? {
            let mut x1 = state.x1.borrow_mut();
            let mut x2 = state.x2.borrow_mut();
            *x1 = x1.wrapping_add(*x2);
            std::mem::swap(&mut *x1, &mut *x2);
        }
        trace!(x1 = *state.x1.borrow(), x2 = *state.x2.borrow(), "fib computed");
        Ok(())
    }

    /// Inverse of [`FibCopy::fib`]
    fn unfib(state: &FibState) -> Result<()> {
        for _ in 0..Self::iterations(state)? {
            let mut x1 = state.x1.borrow_mut();
            let mut x2 = state.x2.borrow_mut();
            std::mem::swap(&mut *x1, &mut *x2);
            *x1 = x1.wrapping_sub(*x2);
        }
        Self::expect_seed(state, "fib uncall exit")
    }
}

impl Procedure for FibCopy {
    const NAME: &'static str = "fib-copy";
    const SUMMARY: &'static str = "call fib(n); out ^= x2; uncall fib(n)";
    type State = FibState;

    fn initial(&self) -> FibState {
        FibState {
            n: RefCell::new(10),
            x1: RefCell::new(0),
            x2: RefCell::new(1),
            out: RefCell::new(0),
        }
    }

    fn apply(&self, state: &FibState) -> Result<u64> {
        Self::fib(state)?;

        let steps = {
            let x1_ = ScalarCell::new("x1", &state.x1);
            let x2_ = ScalarCell::new("x2", &state.x2);
            let out_ = ScalarCell::new("out", &state.out);
            let mut cells = CellGroup::new(Self::NAME);
            cells.push(&x1_);
            cells.push(&x2_);
            cells.push(&out_);

            let copied = x2_.get()?.load();
            out_.get()?.update(|out| *out ^= copied);
            cells.advance()?;
            cells.steps()
        };

        Self::unfib(state)?;
        Ok(steps)
    }

    fn bindings(&self, state: &FibState) -> Vec<Binding> {
        vec![
            Binding::int("n", *state.n.borrow()),
            Binding::int("x1", *state.x1.borrow()),
            Binding::int("x2", *state.x2.borrow()),
            Binding::int("out", *state.out.borrow()),
        ]
    }
}
