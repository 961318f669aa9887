//! Error types for procedure runs

use revcheck_core::{Violation, ViolationKind};
use thiserror::Error;

/// Errors raised while building or running a procedure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcedureError {
    /// A cell detected a breach of the linear-usage discipline
    #[error("discipline violation: {0}")]
    Violation(#[from] Violation),

    /// An entry or exit assertion of the procedure did not hold
    #[error("assertion failed in `{procedure}`: {condition}")]
    AssertionFailed {
        /// Procedure whose assertion failed
        procedure: String,
        /// The condition that was expected to hold
        condition: String,
    },

    /// Applying the procedure an even number of times did not give back the initial state
    #[error("`{procedure}` is not its own inverse: state not restored after {rounds} rounds")]
    NotRestored {
        /// Procedure under test
        procedure: String,
        /// Number of applications performed
        rounds: u32,
    },

    /// Matrix entries do not form a square matrix
    #[error("matrix with {len} entries is not square")]
    NotSquare {
        /// Number of entries supplied
        len: usize,
    },

    /// Matrix squared is not the identity
    #[error("matrix is not involutory: M*M differs from I at ({row}, {col})")]
    NotInvolutory {
        /// Row of the first differing entry
        row: usize,
        /// Column of the first differing entry
        col: usize,
    },

    /// No procedure with this name in the catalog
    #[error("unknown procedure `{name}`")]
    UnknownProcedure {
        /// Requested name
        name: String,
    },

    /// Run options failed validation
    #[error("invalid run options: {reason}")]
    InvalidOptions {
        /// What is wrong with the options
        reason: String,
    },
}

/// Result type for procedure operations
pub type Result<T> = std::result::Result<T, ProcedureError>;

impl ProcedureError {
    /// Create an assertion failure
    pub fn assertion(procedure: impl Into<String>, condition: impl Into<String>) -> Self {
        ProcedureError::AssertionFailed {
            procedure: procedure.into(),
            condition: condition.into(),
        }
    }

    /// Create an invalid options error
    pub fn invalid_options(reason: impl Into<String>) -> Self {
        ProcedureError::InvalidOptions {
            reason: reason.into(),
        }
    }

    /// True if a cell raised this error
    pub fn is_violation(&self) -> bool {
        matches!(self, ProcedureError::Violation(_))
    }

    /// Kind of the underlying violation, if any
    pub fn violation_kind(&self) -> Option<ViolationKind> {
        match self {
            ProcedureError::Violation(v) => Some(v.kind()),
            _ => None,
        }
    }
}
