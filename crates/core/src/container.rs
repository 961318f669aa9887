//! ContainerCell: tracking handle for an ordered sequence
//!
//! Tracks a container at two granularities:
//!
//! - **Elements**: one [`ScalarCell`] per element present at construction,
//!   following the scalar rules for as long as the length is unchanged.
//! - **Length**: once the live length has ever differed from the snapshot,
//!   per-index identity is gone, and every indexed or whole-container access
//!   through this handle fails with [`Violation::SizeChanged`].
//!
//! Resizing a container after a certified read (of the whole container or of
//! any element) is a use-before-mutate violation, same as for scalars.

use crate::error::{CellPath, Change, Result, Violation};
use crate::place::{ElementPlace, Sequence};
use crate::scalar::ScalarCell;
use crate::trackable::{CellState, Trackable};
use std::cell::{Cell, RefCell};
use std::fmt;
use tracing::{debug, trace};

/// Tracking handle for a mutable ordered sequence
pub struct ContainerCell<'a, S: Sequence> {
    name: String,
    target: &'a RefCell<S>,
    elements: Vec<ScalarCell<ElementPlace<'a, S>>>,
    length_snapshot: usize,
    pending_container_read: Cell<bool>,
    pending_element_read: Cell<bool>,
    committed_length_changed: Cell<bool>,
    committed_container_used: Cell<bool>,
    committed_element_used: Cell<bool>,
}

impl<'a, S: Sequence> ContainerCell<'a, S> {
    /// Snapshot the length and every element of `target`
    pub fn new(name: impl Into<String>, target: &'a RefCell<S>) -> Self {
        let name = name.into();
        let length_snapshot = target.borrow().len();
        let elements = (0..length_snapshot)
            .map(|i| ScalarCell::new(format!("{}[{}]", name, i), ElementPlace::new(target, i)))
            .collect();

        ContainerCell {
            name,
            target,
            elements,
            length_snapshot,
            pending_container_read: Cell::new(false),
            pending_element_read: Cell::new(false),
            committed_length_changed: Cell::new(false),
            committed_container_used: Cell::new(false),
            committed_element_used: Cell::new(false),
        }
    }

    /// Dereference the whole container
    ///
    /// Dereferences every element cell as well, so a stale element makes the
    /// whole container unreadable. A rejected call marks nothing as read.
    pub fn get_whole(&self) -> Result<&'a RefCell<S>> {
        self.check_size()?;
        for element in &self.elements {
            element.check_readable().map_err(|v| v.within(&self.name))?;
        }
        for element in &self.elements {
            element.get().map_err(|v| v.within(&self.name))?;
        }
        self.pending_container_read.set(true);
        Ok(self.target)
    }

    /// Dereference element `index`
    pub fn get_at(&self, index: usize) -> Result<ElementPlace<'a, S>> {
        self.check_size()?;
        let element = self.elements.get(index).ok_or_else(|| {
            debug!(cell = %self.name, index, "index out of bounds");
            Violation::IndexOutOfBounds {
                cell: CellPath::new(self.name.as_str()),
                index,
                len: self.length_snapshot,
            }
        })?;
        let place = element.get().map_err(|v| v.within(&self.name))?;
        self.pending_element_read.set(true);
        Ok(place)
    }

    /// Certified state of the length, as of the last advance
    ///
    /// `Used` covers both whole-container and element reads.
    pub fn state(&self) -> CellState {
        CellState::from_latches(
            self.committed_length_changed.get(),
            self.committed_container_used.get() || self.committed_element_used.get(),
        )
    }

    /// Length certified at construction
    pub fn len_snapshot(&self) -> usize {
        self.length_snapshot
    }

    /// Live length of the target
    pub fn live_len(&self) -> usize {
        self.target.borrow().len()
    }

    /// Element cell `index`, for introspection
    pub fn element(&self, index: usize) -> Option<&ScalarCell<ElementPlace<'a, S>>> {
        self.elements.get(index)
    }

    fn check_size(&self) -> Result<()> {
        let live = self.live_len();
        if self.committed_length_changed.get() || live != self.length_snapshot {
            debug!(cell = %self.name, snapshot = self.length_snapshot, live, "size changed");
            return Err(Violation::SizeChanged {
                cell: CellPath::new(self.name.as_str()),
                snapshot: self.length_snapshot,
                live,
            });
        }
        Ok(())
    }
}

impl<S: Sequence> Trackable for ContainerCell<'_, S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn advance(&self) -> Result<()> {
        let live = self.live_len();
        let length_changed = live != self.length_snapshot;

        if length_changed && !self.committed_length_changed.get() {
            if self.committed_container_used.get() || self.committed_element_used.get() {
                debug!(cell = %self.name, from = self.length_snapshot, to = live, "resize after certified use");
                return Err(Violation::UseBeforeMutate {
                    cell: CellPath::new(self.name.as_str()),
                    change: Change::Resized {
                        from: self.length_snapshot,
                        to: live,
                    },
                });
            }
            self.committed_length_changed.set(true);
        }

        // Element indices mean nothing once the length has ever moved.
        if !self.committed_length_changed.get() {
            for element in &self.elements {
                element.advance().map_err(|v| v.within(&self.name))?;
            }
        }

        self.committed_container_used
            .set(self.committed_container_used.get() || self.pending_container_read.get());
        self.committed_element_used
            .set(self.committed_element_used.get() || self.pending_element_read.get());

        trace!(cell = %self.name, state = ?self.state(), "advanced");
        Ok(())
    }
}

impl<S: Sequence> fmt::Debug for ContainerCell<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerCell")
            .field("name", &self.name)
            .field("length_snapshot", &self.length_snapshot)
            .field("state", &self.state())
            .field("elements", &self.elements)
            .finish()
    }
}
