//! `exchange`: swap an array element with a scalar, then two elements

use crate::error::{ProcedureError, Result};
use crate::procedure::Procedure;
use crate::value::Binding;
use revcheck_core::{exchange, CellGroup, ContainerCell, Place, ScalarCell, Trackable};
use std::cell::RefCell;

/// Variables of [`Exchange`]
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeState {
    /// Three-element array
    pub a: RefCell<[i64; 3]>,
    /// Scalar swapped with `a[0]`
    pub m: RefCell<i64>,
    /// Index into `a`; only read
    pub n: RefCell<i64>,
}

/// ```text
/// swap(a[0], m)
/// swap(a[n], a[2])
/// ```
///
/// The two transpositions are disjoint as long as `n` is neither 0 nor 2, so
/// the procedure is its own inverse.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exchange;

impl Procedure for Exchange {
    const NAME: &'static str = "exchange";
    const SUMMARY: &'static str = "swap(a[0], m); swap(a[n], a[2])";
    type State = ExchangeState;

    fn initial(&self) -> ExchangeState {
        ExchangeState {
            a: RefCell::new([1, 2, 3]),
            m: RefCell::new(0),
            n: RefCell::new(1),
        }
    }

    fn apply(&self, state: &ExchangeState) -> Result<u64> {
        let a_ = ContainerCell::new("a", &state.a);
        let m_ = ScalarCell::new("m", &state.m);
        let n_ = ScalarCell::new("n", &state.n);
        let mut cells = CellGroup::new(Self::NAME);
        cells.push(&a_);
        cells.push(&m_);
        cells.push(&n_);

        exchange(a_.get_at(0)?, m_.get()?);
        cells.advance()?;

        let n = n_.get()?.load();
        let n = usize::try_from(n)
            .map_err(|_| ProcedureError::assertion(Self::NAME, format!("n >= 0, got {n}")))?;
        exchange(a_.get_at(n)?, a_.get_at(2)?);
        cells.advance()?;

        Ok(cells.steps())
    }

    fn bindings(&self, state: &ExchangeState) -> Vec<Binding> {
        vec![
            Binding::array("a", state.a.borrow().iter()),
            Binding::int("m", *state.m.borrow()),
            Binding::int("n", *state.n.borrow()),
        ]
    }
}
