//! ScalarCell: tracking handle for one storage location
//!
//! ## Delayed commit
//!
//! Reads and mutations are only *observed* between steps; they are certified
//! when the enclosing group calls `advance`. A read followed by a mutation in
//! the same step is therefore legal, while a mutation in any later step than a
//! certified read is rejected:
//!
//! ```text
//!            certified read              first divergence
//! Fresh ─────────────────────▶ Used ──────────────────────▶ (UseBeforeMutate)
//!   │
//!   └── first divergence ──▶ Diverged   (every get() → StaleRead)
//! ```
//!
//! Both latches are sticky, and so is the pending read flag: once a read was
//! observed it is folded into `committed_used` on every later advance.

use crate::error::{CellPath, Change, Result, Violation};
use crate::place::Place;
use crate::trackable::{CellState, Trackable};
use std::cell::Cell;
use std::fmt;
use tracing::{debug, trace};

/// Tracking handle for one mutable location
pub struct ScalarCell<P: Place> {
    name: String,
    target: P,
    snapshot: P::Value,
    pending_read: Cell<bool>,
    committed_diverged: Cell<bool>,
    committed_used: Cell<bool>,
}

impl<P: Place> ScalarCell<P> {
    /// Snapshot the current value of `target`
    pub fn new(name: impl Into<String>, target: P) -> Self {
        let snapshot = target.load();
        ScalarCell {
            name: name.into(),
            target,
            snapshot,
            pending_read: Cell::new(false),
            committed_diverged: Cell::new(false),
            committed_used: Cell::new(false),
        }
    }

    /// Dereference: hand out the target for reading (and direct mutation)
    ///
    /// Rejected with [`Violation::StaleRead`] once the target has diverged in
    /// an earlier step.
    pub fn get(&self) -> Result<P> {
        self.check_readable()?;
        self.pending_read.set(true);
        Ok(self.target)
    }

    /// Fails like [`get`](Self::get) would, without recording a read
    pub(crate) fn check_readable(&self) -> Result<()> {
        if self.committed_diverged.get() {
            debug!(cell = %self.name, "stale read rejected");
            return Err(Violation::StaleRead {
                cell: CellPath::new(self.name.as_str()),
            });
        }
        Ok(())
    }

    /// Certified state as of the last advance
    pub fn state(&self) -> CellState {
        CellState::from_latches(self.committed_diverged.get(), self.committed_used.get())
    }

    /// Value certified at construction
    pub fn snapshot(&self) -> &P::Value {
        &self.snapshot
    }

    /// Whether the live value differs from the snapshot right now
    pub fn is_diverged(&self) -> bool {
        self.target.load() != self.snapshot
    }

    /// The observed place, without counting as a read
    pub fn target(&self) -> P {
        self.target
    }
}

impl<P: Place> Trackable for ScalarCell<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn advance(&self) -> Result<()> {
        let diverged = self.is_diverged();

        if diverged && !self.committed_diverged.get() {
            if self.committed_used.get() {
                debug!(cell = %self.name, "mutation after certified use");
                return Err(Violation::UseBeforeMutate {
                    cell: CellPath::new(self.name.as_str()),
                    change: Change::Value,
                });
            }
            self.committed_diverged.set(true);
        }

        self.committed_used
            .set(self.committed_used.get() || self.pending_read.get());

        trace!(cell = %self.name, state = ?self.state(), "advanced");
        Ok(())
    }
}

impl<P: Place> fmt::Debug for ScalarCell<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarCell")
            .field("name", &self.name)
            .field("snapshot", &self.snapshot)
            .field("pending_read", &self.pending_read.get())
            .field("state", &self.state())
            .finish()
    }
}
