//! `xor-mask`: xor every element with a read-only key

use crate::error::Result;
use crate::procedure::Procedure;
use crate::value::Binding;
use revcheck_core::{CellGroup, ContainerCell, Place, ScalarCell, Trackable};
use std::cell::RefCell;

/// Variables of [`XorMask`]
#[derive(Debug, Clone, PartialEq)]
pub struct XorMaskState {
    /// Masked array
    pub a: RefCell<Vec<i64>>,
    /// Mask; read in every step, never mutated
    pub key: RefCell<i64>,
}

/// ```text
/// for i = 0 to len - 1:
///     a[i] ^= key
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct XorMask;

impl Procedure for XorMask {
    const NAME: &'static str = "xor-mask";
    const SUMMARY: &'static str = "a[i] ^= key for every element; key is only read";
    type State = XorMaskState;

    fn initial(&self) -> XorMaskState {
        XorMaskState {
            a: RefCell::new(vec![3, 1, 4, 1, 5, 9, 2, 6]),
            key: RefCell::new(0b1010),
        }
    }

    fn apply(&self, state: &XorMaskState) -> Result<u64> {
        let a_ = ContainerCell::new("a", &state.a);
        let key_ = ScalarCell::new("key", &state.key);
        let mut cells = CellGroup::new(Self::NAME);
        cells.push(&a_);
        cells.push(&key_);

        for i in 0..a_.len_snapshot() {
            let key = key_.get()?.load();
            a_.get_at(i)?.update(|x| *x ^= key);
            cells.advance()?;
        }

        Ok(cells.steps())
    }

    fn bindings(&self, state: &XorMaskState) -> Vec<Binding> {
        vec![
            Binding::array("a", state.a.borrow().iter()),
            Binding::int("key", *state.key.borrow()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revcheck_core::ViolationKind;

    #[test]
    fn test_masks_every_element() {
        let state = XorMask.initial();
        assert_eq!(XorMask.apply(&state).unwrap(), 8);
        assert_eq!(*state.a.borrow(), vec![9, 11, 14, 11, 15, 3, 8, 12]);
        assert_eq!(*state.key.borrow(), 10);
    }

    #[test]
    fn test_zero_key_leaves_cells_fresh() {
        let state = XorMaskState {
            a: RefCell::new(vec![1, 2]),
            key: RefCell::new(0),
        };
        XorMask.apply(&state).unwrap();
        assert_eq!(*state.a.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_masking_the_key_with_itself_is_caught() {
        // Aliasing: the key is also an element of the masked array.
        struct SelfMask;

        impl Procedure for SelfMask {
            const NAME: &'static str = "self-mask";
            const SUMMARY: &'static str = "a[i] ^= a[0]";
            type State = RefCell<Vec<i64>>;

            fn initial(&self) -> RefCell<Vec<i64>> {
                RefCell::new(vec![5, 6, 7])
            }

            fn apply(&self, a: &RefCell<Vec<i64>>) -> Result<u64> {
                let a_ = ContainerCell::new("a", a);
                let mut cells = CellGroup::new(Self::NAME);
                cells.push(&a_);
                for i in (0..3).rev() {
                    let key = a_.get_at(0)?.load();
                    a_.get_at(i)?.update(|x| *x ^= key);
                    cells.advance()?;
                }
                Ok(cells.steps())
            }

            fn bindings(&self, a: &RefCell<Vec<i64>>) -> Vec<Binding> {
                vec![Binding::array("a", a.borrow().iter())]
            }
        }

        // a[2] and a[1] are masked with a[0], then a[0] clears itself after
        // being read in earlier steps.
        let err = SelfMask.apply(&SelfMask.initial()).unwrap_err();
        assert_eq!(err.violation_kind(), Some(ViolationKind::UseBeforeMutate));
    }
}
