//! `swap-heads`: exchange the first elements of two lists through push/pop
//!
//! List statements move values between a scalar and the front of a list:
//!
//! ```text
//! push x l        l.push_front(x); x = 0
//! pop x l         assert x == 0; x = l.front(); l.pop_front()
//! ```
//!
//! `pop` needs a zeroed receiver, and `push` zeroes its source, so the two are
//! inverses of each other. Both work on places already handed out by cells: a
//! list can be dereferenced only once per step when its length changes.

use crate::error::{ProcedureError, Result};
use crate::procedure::Procedure;
use crate::value::Binding;
use revcheck_core::{CellGroup, ContainerCell, Place, ScalarCell, Trackable};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Variables of [`SwapHeads`]
#[derive(Debug, Clone, PartialEq)]
pub struct SwapHeadsState {
    /// First list; must not be empty
    pub l1: RefCell<VecDeque<i64>>,
    /// Second list; must not be empty
    pub l2: RefCell<VecDeque<i64>>,
    /// Carries the head of `l1`, 0 outside the step
    pub x: RefCell<i64>,
    /// Carries the head of `l2`, 0 outside the step
    pub y: RefCell<i64>,
}

/// ```text
/// pop x l1; pop y l2; push x l2; push y l1
/// ```
///
/// Each list loses and regains one element, and the whole exchange is a
/// single step, so the lists are read and resized in the same step.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapHeads;

impl SwapHeads {
    /// `push x l`
    pub fn push(x: &RefCell<i64>, l: &RefCell<VecDeque<i64>>) {
        l.borrow_mut().push_front(x.load());
        x.store(0);
    }

    /// `pop x l`
    ///
    /// Fails with `AssertionFailed` when `x` is not zero or `l` is empty.
    pub fn pop(x: &RefCell<i64>, l: &RefCell<VecDeque<i64>>) -> Result<()> {
        let held = x.load();
        if held != 0 {
            return Err(ProcedureError::assertion(
                Self::NAME,
                format!("receiver == 0 before pop, got {held}"),
            ));
        }
        let head = l
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| ProcedureError::assertion(Self::NAME, "pop from a non-empty list"))?;
        x.store(head);
        Ok(())
    }
}

impl Procedure for SwapHeads {
    const NAME: &'static str = "swap-heads";
    const SUMMARY: &'static str = "pop x l1; pop y l2; push x l2; push y l1";
    type State = SwapHeadsState;

    fn initial(&self) -> SwapHeadsState {
        SwapHeadsState {
            l1: RefCell::new(VecDeque::from(vec![1, 2, 3])),
            l2: RefCell::new(VecDeque::from(vec![4, 5])),
            x: RefCell::new(0),
            y: RefCell::new(0),
        }
    }

    fn apply(&self, state: &SwapHeadsState) -> Result<u64> {
        let l1_ = ContainerCell::new("l1", &state.l1);
        let l2_ = ContainerCell::new("l2", &state.l2);
        let x_ = ScalarCell::new("x", &state.x);
        let y_ = ScalarCell::new("y", &state.y);
        let mut cells = CellGroup::new(Self::NAME);
        cells.push(&l1_);
        cells.push(&l2_);
        cells.push(&x_);
        cells.push(&y_);

        let (l1, l2) = (l1_.get_whole()?, l2_.get_whole()?);
        let (x, y) = (x_.get()?, y_.get()?);
        Self::pop(x, l1)?;
        Self::pop(y, l2)?;
        Self::push(x, l2);
        Self::push(y, l1);
        cells.advance()?;

        Ok(cells.steps())
    }

    fn bindings(&self, state: &SwapHeadsState) -> Vec<Binding> {
        vec![
            Binding::list("l1", state.l1.borrow().iter()),
            Binding::list("l2", state.l2.borrow().iter()),
            Binding::int("x", *state.x.borrow()),
            Binding::int("y", *state.y.borrow()),
        ]
    }
}
