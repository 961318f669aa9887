//! `reverse`: reverse an array in place by pairwise swaps

use crate::error::Result;
use crate::procedure::Procedure;
use crate::value::Binding;
use revcheck_core::{exchange, CellGroup, ContainerCell, Trackable};
use std::cell::RefCell;

/// Variables of [`Reverse`]
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseState {
    /// Array being reversed
    pub a: RefCell<Vec<i64>>,
}

/// ```text
/// for i = 0 to len/2 - 1:
///     swap(a[i], a[len - 1 - i])
/// ```
///
/// One step per swap. Every element is touched in exactly one step, and the
/// middle element of an odd-length array is never touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reverse;

impl Procedure for Reverse {
    const NAME: &'static str = "reverse";
    const SUMMARY: &'static str = "reverse an array by pairwise element swaps";
    type State = ReverseState;

    fn initial(&self) -> ReverseState {
        ReverseState {
            a: RefCell::new((1..=7).collect()),
        }
    }

    fn apply(&self, state: &ReverseState) -> Result<u64> {
        let a_ = ContainerCell::new("a", &state.a);
        let mut cells = CellGroup::new(Self::NAME);
        cells.push(&a_);

        let len = a_.len_snapshot();
        for i in 0..len / 2 {
            exchange(a_.get_at(i)?, a_.get_at(len - 1 - i)?);
            cells.advance()?;
        }

        Ok(cells.steps())
    }

    fn bindings(&self, state: &ReverseState) -> Vec<Binding> {
        let a = state.a.borrow();
        vec![Binding::array("a", a.iter())]
    }
}
