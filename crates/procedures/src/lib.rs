//! Reversible procedures checked under cells
//!
//! Each [`Procedure`] owns its variables in `RefCell`s, wraps the involution
//! core in cells from `revcheck-core`, and reports any [`revcheck_core::Violation`]
//! as a [`ProcedureError`]. The [`runner`] applies procedures repeatedly and
//! confirms that an even number of applications restores the initial state.
//!
//! ```
//! use revcheck_procedures::{find, RunOptions};
//!
//! let report = find("reverse")?.run(&RunOptions::default())?;
//! assert_eq!(report.after[0].to_string(), "a: array[7] = [7, 6, 5, 4, 3, 2, 1]");
//! # Ok::<(), revcheck_procedures::ProcedureError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod error;
pub mod matrix;
pub mod procedure;
pub mod runner;
pub mod value;

pub use error::{ProcedureError, Result};
pub use matrix::InvolutoryMatrix;
pub use procedure::Procedure;
pub use runner::{catalog, find, run, Check, RunOptions, RunReport};
pub use value::{Binding, Value};
