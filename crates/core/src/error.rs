//! Violation types for the cell runtime
//!
//! Every violation is fatal to the current check: it is raised at the point of
//! detection and surfaced to whoever ran the procedure under test. Nothing in
//! this crate retries, since all checks are deterministic.
//!
//! ## Taxonomy
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `StaleRead` | Dereference through a cell whose target already diverged |
//! | `UseBeforeMutate` | A value (or length) certified as read is now mutated |
//! | `SizeChanged` | Container access after its tracked length diverged |
//! | `IndexOutOfBounds` | Element access past the tracked length |
//! | `EmptyGroup` | Scope pop with nothing pushed (contract misuse) |

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Location of the cell that detected a violation.
///
/// Segments run from the group that was advanced down to the cell itself,
/// e.g. `main/a/a[2]`. A nested group lists itself before its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPath(Vec<String>);

impl CellPath {
    /// Path consisting of a single cell name
    pub fn new(name: impl Into<String>) -> Self {
        CellPath(vec![name.into()])
    }

    /// Prepend an enclosing scope name
    pub fn within(mut self, scope: impl Into<String>) -> Self {
        self.0.insert(0, scope.into());
        self
    }

    /// Name of the cell itself (last segment)
    pub fn leaf(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or("")
    }

    /// All segments, outermost first
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for CellPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// What kind of mutation broke the use-before-mutate rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Change {
    /// The observed value differs from the snapshot
    Value,
    /// The container length differs from the snapshot
    Resized {
        /// Length certified at construction
        from: usize,
        /// Live length observed at advance
        to: usize,
    },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Value => write!(f, "value changed"),
            Change::Resized { from, to } => write!(f, "length changed from {} to {}", from, to),
        }
    }
}

/// Discriminant of [`Violation`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// See [`Violation::StaleRead`]
    StaleRead,
    /// See [`Violation::UseBeforeMutate`]
    UseBeforeMutate,
    /// See [`Violation::SizeChanged`]
    SizeChanged,
    /// See [`Violation::IndexOutOfBounds`]
    IndexOutOfBounds,
    /// See [`Violation::EmptyGroup`]
    EmptyGroup,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViolationKind::StaleRead => "StaleRead",
            ViolationKind::UseBeforeMutate => "UseBeforeMutate",
            ViolationKind::SizeChanged => "SizeChanged",
            ViolationKind::IndexOutOfBounds => "IndexOutOfBounds",
            ViolationKind::EmptyGroup => "EmptyGroup",
        };
        f.write_str(name)
    }
}

/// A breach of the linear-usage discipline
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Violation {
    /// Dereference through a cell whose target has permanently diverged
    #[error("stale read through `{cell}`: target diverged from its snapshot in an earlier step")]
    StaleRead {
        /// Cell that rejected the dereference
        cell: CellPath,
    },

    /// A value certified as read in an earlier step is being mutated
    #[error("use before mutate on `{cell}`: {change} after a read was certified")]
    UseBeforeMutate {
        /// Cell that observed the mutation
        cell: CellPath,
        /// Whether the value or the length changed
        change: Change,
    },

    /// Container access after the tracked length diverged
    #[error("size changed under `{cell}`: tracked length {snapshot}, live length {live}")]
    SizeChanged {
        /// Container cell that rejected the access
        cell: CellPath,
        /// Length certified at construction
        snapshot: usize,
        /// Length observed now
        live: usize,
    },

    /// Indexed access past the elements tracked by a container cell
    #[error("index {index} out of bounds for `{cell}` of length {len}")]
    IndexOutOfBounds {
        /// Container cell that rejected the access
        cell: CellPath,
        /// Requested index
        index: usize,
        /// Tracked length
        len: usize,
    },

    /// Scope pop with no member left
    #[error("pop from empty cell group `{scope}`")]
    EmptyGroup {
        /// Group that was popped
        scope: CellPath,
    },
}

/// Result type for cell operations
pub type Result<T> = std::result::Result<T, Violation>;

impl Violation {
    /// Payload-free discriminant
    pub fn kind(&self) -> ViolationKind {
        match self {
            Violation::StaleRead { .. } => ViolationKind::StaleRead,
            Violation::UseBeforeMutate { .. } => ViolationKind::UseBeforeMutate,
            Violation::SizeChanged { .. } => ViolationKind::SizeChanged,
            Violation::IndexOutOfBounds { .. } => ViolationKind::IndexOutOfBounds,
            Violation::EmptyGroup { .. } => ViolationKind::EmptyGroup,
        }
    }

    /// Path of the cell (or group) that detected the violation
    pub fn cell(&self) -> &CellPath {
        match self {
            Violation::StaleRead { cell }
            | Violation::UseBeforeMutate { cell, .. }
            | Violation::SizeChanged { cell, .. }
            | Violation::IndexOutOfBounds { cell, .. } => cell,
            Violation::EmptyGroup { scope } => scope,
        }
    }

    /// True for client contract misuse rather than a data-discipline breach
    pub fn is_contract_misuse(&self) -> bool {
        matches!(self, Violation::EmptyGroup { .. })
    }

    /// Re-root the violation under an enclosing scope
    pub fn within(self, scope: &str) -> Self {
        match self {
            Violation::StaleRead { cell } => Violation::StaleRead {
                cell: cell.within(scope),
            },
            Violation::UseBeforeMutate { cell, change } => Violation::UseBeforeMutate {
                cell: cell.within(scope),
                change,
            },
            Violation::SizeChanged {
                cell,
                snapshot,
                live,
            } => Violation::SizeChanged {
                cell: cell.within(scope),
                snapshot,
                live,
            },
            Violation::IndexOutOfBounds { cell, index, len } => Violation::IndexOutOfBounds {
                cell: cell.within(scope),
                index,
                len,
            },
            Violation::EmptyGroup { scope: inner } => Violation::EmptyGroup {
                scope: inner.within(scope),
            },
        }
    }
}
