//! Convenient imports for revcheck
//!
//! ```
//! use revcheck::prelude::*;
//! use std::cell::RefCell;
//!
//! let x = RefCell::new(1i64);
//! let x_ = ScalarCell::new("x", &x);
//! let mut cells = CellGroup::new("main");
//! cells.push(&x_);
//! x_.get()?.update(|x| *x += 1);
//! cells.advance()?;
//! # Ok::<(), revcheck::Error>(())
//! ```

// Cells
pub use revcheck_core::{
    exchange, CellGroup, CellState, ContainerCell, Place, ScalarCell, Trackable, Violation,
};

// Procedures
pub use revcheck_procedures::{catalog, find, Check, Procedure, RunOptions, RunReport};

// Error handling
pub use crate::error::{Error, Result};
