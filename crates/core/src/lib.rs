//! Cell runtime for checking reversible procedures
//!
//! A reversible procedure is only correct if its variables are read and
//! mutated in an order the inverse can replay backward. This crate wraps
//! variables in tracking handles (cells) that observe reads, detect
//! out-of-order mutation, and raise a [`Violation`] the moment the
//! linear-usage discipline is broken:
//!
//! - [`ScalarCell`]: one mutable location
//! - [`ContainerCell`]: an ordered sequence (elements + length)
//! - [`CellGroup`]: the cells of one lexical scope, advanced once per step
//!
//! Cells never own their targets. Storage lives in `RefCell`s owned by the
//! procedure under test, which mutates it directly; cells only compare it
//! against their snapshots when advanced.
//!
//! ```
//! use std::cell::RefCell;
//! use revcheck_core::{exchange, CellGroup, ContainerCell, ScalarCell, Trackable};
//!
//! let a = RefCell::new([1i64, 2, 3]);
//! let m = RefCell::new(0i64);
//!
//! let a_ = ContainerCell::new("a", &a);
//! let m_ = ScalarCell::new("m", &m);
//! let mut cells = CellGroup::new("main");
//! cells.push(&a_);
//! cells.push(&m_);
//!
//! exchange(a_.get_at(0)?, m_.get()?);
//! cells.advance()?;
//!
//! // `m` already changed: touching it again would break the inverse.
//! assert!(m_.get().is_err());
//! # Ok::<(), revcheck_core::Violation>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod container;
pub mod error;
pub mod group;
pub mod place;
pub mod scalar;
pub mod trackable;

pub use container::ContainerCell;
pub use error::{CellPath, Change, Result, Violation, ViolationKind};
pub use group::{CellGroup, ScopeGuard};
pub use place::{exchange, ElementPlace, Place, Sequence};
pub use scalar::ScalarCell;
pub use trackable::{CellState, Trackable};

/// Cell over a whole `RefCell`-held variable
pub type VarCell<'a, T> = ScalarCell<&'a std::cell::RefCell<T>>;
