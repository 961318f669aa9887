//! The single dispatch seam shared by every kind of cell

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Anything a [`CellGroup`](crate::CellGroup) can advance
///
/// `advance` takes `&self`: cells keep their bookkeeping in `Cell`s so client
/// code can keep dereferencing a cell while a group holds a shared reference
/// to it.
pub trait Trackable {
    /// Name used in violation reports
    fn name(&self) -> &str;

    /// Re-synchronize bookkeeping with the live storage
    ///
    /// Called once per certified step. Returns the first violation found.
    fn advance(&self) -> Result<()>;
}

/// Certified state of a cell, as of its last `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Neither a certified read nor a divergence yet
    Fresh,
    /// A read was certified; the value must not change from now on
    Used,
    /// The value diverged; further dereferences are rejected
    Diverged,
}

impl CellState {
    pub(crate) fn from_latches(diverged: bool, used: bool) -> Self {
        if diverged {
            CellState::Diverged
        } else if used {
            CellState::Used
        } else {
            CellState::Fresh
        }
    }
}
