//! Built-in procedures
//!
//! | Name | Core | Containers |
//! |------|------|------------|
//! | `exchange` | element and scalar swaps | fixed array |
//! | `reverse` | pairwise element swaps | vector |
//! | `xor-mask` | `a[i] ^= key` | vector |
//! | `fib-copy` | `out ^= x2` between `fib` and its uncall | none |
//! | `swap-lists` | whole-list swap of unequal lengths | deques |
//! | `swap-heads` | `pop`/`push` of list heads through zeroed scalars | deques |
//! | `matrix` | `x := M * x` through a block-local accumulator | vector |

mod exchange;
mod fib;
mod matrix;
mod reverse;
mod swap_heads;
mod swap_lists;
mod xor_mask;

pub use exchange::{Exchange, ExchangeState};
pub use fib::{FibCopy, FibState};
pub use matrix::{MatrixApply, MatrixState};
pub use reverse::{Reverse, ReverseState};
pub use swap_heads::{SwapHeads, SwapHeadsState};
pub use swap_lists::{SwapLists, SwapListsState};
pub use xor_mask::{XorMask, XorMaskState};
