//! Unified error type for revcheck
//!
//! Flattens cell violations and procedure errors into one enum so callers of
//! the facade match on a single type.

use revcheck_core::Violation;
use revcheck_procedures::ProcedureError;
use thiserror::Error;

/// All revcheck errors
#[derive(Debug, Error)]
pub enum Error {
    /// A cell detected a breach of the linear-usage discipline
    #[error("violation: {0}")]
    Violation(Violation),

    /// A procedure's entry, exit or delocal assertion failed
    #[error("assertion failed: {0}")]
    AssertionFailed(String),

    /// A procedure did not restore its state after an even number of rounds
    #[error("not reversible: {0}")]
    NotRestored(String),

    /// A matrix was rejected on construction
    #[error("invalid matrix: {0}")]
    InvalidMatrix(String),

    /// No such procedure
    #[error("not found: {0}")]
    NotFound(String),

    /// Options failed validation
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for revcheck operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if a cell raised this error
    pub fn is_violation(&self) -> bool {
        matches!(self, Error::Violation(_))
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this error means the procedure itself is wrong
    ///
    /// Discipline violations and failed round trips are serious; contract
    /// misuse, bad options and lookups are caller mistakes.
    pub fn is_serious(&self) -> bool {
        match self {
            Error::Violation(v) => !v.is_contract_misuse(),
            Error::NotRestored(_) | Error::AssertionFailed(_) => true,
            _ => false,
        }
    }
}

impl From<Violation> for Error {
    fn from(v: Violation) -> Self {
        Error::Violation(v)
    }
}

// Convert from procedure errors
impl From<ProcedureError> for Error {
    fn from(e: ProcedureError) -> Self {
        match e {
            ProcedureError::Violation(v) => Error::Violation(v),
            ProcedureError::AssertionFailed { procedure, condition } => {
                Error::AssertionFailed(format!("{}: {}", procedure, condition))
            }
            ProcedureError::NotRestored { procedure, rounds } => {
                Error::NotRestored(format!("{} after {} rounds", procedure, rounds))
            }
            e @ (ProcedureError::NotSquare { .. } | ProcedureError::NotInvolutory { .. }) => {
                Error::InvalidMatrix(e.to_string())
            }
            ProcedureError::UnknownProcedure { name } => Error::NotFound(format!("procedure {}", name)),
            ProcedureError::InvalidOptions { reason } => Error::InvalidOptions(reason),
        }
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
