//! `swap-lists`: exchange two lists of different lengths

use crate::error::Result;
use crate::procedure::Procedure;
use crate::value::Binding;
use revcheck_core::{exchange, CellGroup, ContainerCell, Trackable};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Variables of [`SwapLists`]
#[derive(Debug, Clone, PartialEq)]
pub struct SwapListsState {
    /// First list
    pub l1: RefCell<VecDeque<i64>>,
    /// Second list
    pub l2: RefCell<VecDeque<i64>>,
}

/// ```text
/// l1 <=> l2
/// ```
///
/// Both lists change length, which is legal because the whole-list reads and
/// the resize happen in the same step.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapLists;

impl Procedure for SwapLists {
    const NAME: &'static str = "swap-lists";
    const SUMMARY: &'static str = "exchange two lists of different lengths whole";
    type State = SwapListsState;

    fn initial(&self) -> SwapListsState {
        SwapListsState {
            l1: RefCell::new(VecDeque::from(vec![1, 2, 3])),
            l2: RefCell::new(VecDeque::from(vec![4, 5])),
        }
    }

    fn apply(&self, state: &SwapListsState) -> Result<u64> {
        let l1_ = ContainerCell::new("l1", &state.l1);
        let l2_ = ContainerCell::new("l2", &state.l2);
        let mut cells = CellGroup::new(Self::NAME);
        cells.push(&l1_);
        cells.push(&l2_);

        exchange(l1_.get_whole()?, l2_.get_whole()?);
        cells.advance()?;

        Ok(cells.steps())
    }

    fn bindings(&self, state: &SwapListsState) -> Vec<Binding> {
        vec![
            Binding::list("l1", state.l1.borrow().iter()),
            Binding::list("l2", state.l2.borrow().iter()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revcheck_core::{Change, Violation};

    #[test]
    fn test_swaps_lengths() {
        let state = SwapLists.initial();
        assert_eq!(SwapLists.apply(&state).unwrap(), 1);
        assert_eq!(*state.l1.borrow(), VecDeque::from(vec![4, 5]));
        assert_eq!(*state.l2.borrow(), VecDeque::from(vec![1, 2, 3]));
    }

    #[test]
    fn test_swap_after_peeking_is_caught() {
        let state = SwapLists.initial();
        let l1_ = ContainerCell::new("l1", &state.l1);
        let l2_ = ContainerCell::new("l2", &state.l2);
        let mut cells = CellGroup::new("peek");
        cells.push(&l1_);
        cells.push(&l2_);

        // Looking at the head of l1 in one step, then swapping in the next.
        l1_.get_at(0).unwrap();
        cells.advance().unwrap();

        exchange(l1_.get_whole().unwrap(), l2_.get_whole().unwrap());
        let err = cells.advance().unwrap_err();
        assert_eq!(
            err,
            Violation::UseBeforeMutate {
                cell: revcheck_core::CellPath::new("l1").within("peek"),
                change: Change::Resized { from: 3, to: 2 },
            }
        );
    }

    #[test]
    fn test_bindings_use_list_format() {
        let state = SwapLists.initial();
        let printed: Vec<String> = SwapLists
            .bindings(&state)
            .iter()
            .map(|b| b.to_string())
            .collect();
        assert_eq!(printed, vec!["l1: list = [1, 2, 3]", "l2: list = [4, 5]"]);
    }
}
