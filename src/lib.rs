//! # revcheck
//!
//! Runtime verifier for linear variable usage in reversible procedures.
//!
//! A procedure that is meant to be run backward must never mutate a value it
//! has already used. revcheck wraps each variable in a cell that watches
//! reads and mutations step by step and reports the first breach.
//!
//! ## Quick Start
//!
//! ```
//! use revcheck::prelude::*;
//!
//! for check in catalog() {
//!     let report = check.run(&RunOptions::default())?;
//!     assert_eq!(report.rounds, 2);
//! }
//! # Ok::<(), revcheck::Error>(())
//! ```
//!
//! ## Crates
//!
//! - [`cells`]: cells, groups and violations
//! - [`procedures`]: built-in procedures and the runner

#![warn(missing_docs)]

mod error;

pub mod prelude;

pub use error::{Error, Result};

/// Cell runtime
pub use revcheck_core as cells;

/// Procedures and runner
pub use revcheck_procedures as procedures;

/// Run every built-in procedure, stopping at the first failure
pub fn run_catalog(options: &procedures::RunOptions) -> Result<Vec<procedures::RunReport>> {
    procedures::catalog()
        .iter()
        .map(|check| check.run(options).map_err(Error::from))
        .collect()
}

/// Render run reports as a JSON array
pub fn reports_to_json(reports: &[procedures::RunReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}
