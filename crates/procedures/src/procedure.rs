//! The `Procedure` trait

use crate::error::Result;
use crate::value::Binding;
use std::fmt;

/// A reversible procedure that runs under cells
///
/// Every procedure in this crate is an involution, possibly conjugated by an
/// injective prefix (`s ; core ; s⁻¹`). Applying it twice must give back the
/// state it started from, which is what the runner's round-trip check
/// verifies. Only the involution core is tracked by cells.
pub trait Procedure {
    /// Catalog name, used on the command line
    const NAME: &'static str;

    /// One-line description
    const SUMMARY: &'static str;

    /// Program variables, each held in a `RefCell` that cells can observe
    type State: Clone + PartialEq + fmt::Debug;

    /// Fresh state for a run
    fn initial(&self) -> Self::State;

    /// Apply the procedure once, returning the number of cell steps taken
    fn apply(&self, state: &Self::State) -> Result<u64>;

    /// Variables as printable bindings
    fn bindings(&self, state: &Self::State) -> Vec<Binding>;
}
