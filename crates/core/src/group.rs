//! CellGroup: the cells visible in one lexical scope
//!
//! A group is a stack of [`Trackable`] members. Advancing the group advances
//! every member in insertion order; the first violation stops the sweep.
//!
//! ## Block-local variables
//!
//! Two ways to mirror `local ... delocal` blocks:
//!
//! - [`CellGroup::scope`] pushes a member and pops it when the returned guard
//!   drops. The member must live as long as the group's other members.
//! - [`CellGroup::nested`] opens a child group that advances the parent
//!   before its own members. Use it when the local's storage is declared
//!   inside the block and so cannot outlive the parent group. The parent is
//!   not a member: the child's `pop` never reaches it.
//!
//! ```
//! use std::cell::RefCell;
//! use revcheck_core::{CellGroup, Place, ScalarCell, Trackable};
//!
//! let x = RefCell::new(1i64);
//! let x_ = ScalarCell::new("x", &x);
//! let mut main = CellGroup::new("main");
//! main.push(&x_);
//!
//! {
//!     let t = RefCell::new(0i64);
//!     let t_ = ScalarCell::new("t", &t);
//!     let mut block = main.nested("local t");
//!     block.push(&t_);
//!
//!     let v = x_.get().unwrap().load();
//!     t_.get().unwrap().update(|t| *t += v);
//!     block.advance().unwrap();
//! }
//!
//! main.advance().unwrap();
//! assert_eq!(main.steps(), 2);
//! ```

use crate::error::{CellPath, Result, Violation};
use crate::trackable::Trackable;
use std::cell::Cell;
use std::fmt;
use std::ops::{Deref, DerefMut};
use tracing::{debug, trace};

/// Ordered, stack-like collection of trackables
pub struct CellGroup<'g> {
    name: String,
    parent: Option<&'g dyn Trackable>,
    members: Vec<&'g dyn Trackable>,
    steps: Cell<u64>,
}

impl<'g> CellGroup<'g> {
    /// Empty group named after the scope it covers
    pub fn new(name: impl Into<String>) -> Self {
        CellGroup {
            name: name.into(),
            parent: None,
            members: Vec::new(),
            steps: Cell::new(0),
        }
    }

    /// Append a member
    pub fn push(&mut self, member: &'g dyn Trackable) {
        trace!(scope = %self.name, member = member.name(), "push");
        self.members.push(member);
    }

    /// Remove the most recently pushed member
    pub fn pop(&mut self) -> Result<&'g dyn Trackable> {
        match self.members.pop() {
            Some(member) => {
                trace!(scope = %self.name, member = member.name(), "pop");
                Ok(member)
            }
            None => {
                debug!(scope = %self.name, "pop from empty group");
                Err(Violation::EmptyGroup {
                    scope: CellPath::new(self.name.as_str()),
                })
            }
        }
    }

    /// Push `member` for the lifetime of the returned guard
    pub fn scope<'s>(&'s mut self, member: &'g dyn Trackable) -> ScopeGuard<'s, 'g> {
        let depth = self.members.len();
        self.push(member);
        ScopeGuard { group: self, depth }
    }

    /// Child group for a nested block, advancing `self` first
    pub fn nested<'s>(&'s self, name: impl Into<String>) -> CellGroup<'s> {
        let mut child = CellGroup::new(name);
        child.parent = Some(self);
        child
    }

    /// Enclosing group, for groups opened with [`nested`](Self::nested)
    pub fn parent(&self) -> Option<&'g dyn Trackable> {
        self.parent
    }

    /// Number of pushed members, not counting the parent
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when no member is pushed
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Completed advance sweeps
    pub fn steps(&self) -> u64 {
        self.steps.get()
    }

    /// Names of the members, in insertion order
    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name()).collect()
    }
}

impl Trackable for CellGroup<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn advance(&self) -> Result<()> {
        trace!(scope = %self.name, members = self.members.len(), "advance");
        for member in self.parent.iter().chain(&self.members) {
            member.advance().map_err(|v| v.within(&self.name))?;
        }
        self.steps.set(self.steps.get() + 1);
        Ok(())
    }
}

impl fmt::Debug for CellGroup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellGroup")
            .field("name", &self.name)
            .field("parent", &self.parent.map(|p| p.name()))
            .field("members", &self.member_names())
            .field("steps", &self.steps.get())
            .finish()
    }
}

/// Pops what [`CellGroup::scope`] pushed when dropped
///
/// Dereferences to the group, so the block can advance (or open further
/// scopes) through the guard.
pub struct ScopeGuard<'s, 'g> {
    group: &'s mut CellGroup<'g>,
    depth: usize,
}

impl<'g> Deref for ScopeGuard<'_, 'g> {
    type Target = CellGroup<'g>;

    fn deref(&self) -> &CellGroup<'g> {
        &*self.group
    }
}

impl<'g> DerefMut for ScopeGuard<'_, 'g> {
    fn deref_mut(&mut self) -> &mut CellGroup<'g> {
        &mut *self.group
    }
}

impl Drop for ScopeGuard<'_, '_> {
    fn drop(&mut self) {
        trace!(scope = %self.group.name, depth = self.depth, "scope exit");
        // Also drops anything pushed through the guard and never popped.
        self.group.members.truncate(self.depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViolationKind;
    use crate::place::Place;
    use crate::scalar::ScalarCell;

    /// Records how often it was advanced
    struct Tally {
        name: &'static str,
        hits: Cell<u32>,
        fail: bool,
    }

    impl Tally {
        fn new(name: &'static str) -> Self {
            Tally {
                name,
                hits: Cell::new(0),
                fail: false,
            }
        }

        fn failing(name: &'static str) -> Self {
            Tally {
                fail: true,
                ..Tally::new(name)
            }
        }
    }

    impl Trackable for Tally {
        fn name(&self) -> &str {
            self.name
        }

        fn advance(&self) -> Result<()> {
            self.hits.set(self.hits.get() + 1);
            if self.fail {
                return Err(Violation::StaleRead {
                    cell: CellPath::new(self.name),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_pop_is_lifo() {
        let (a, b, c) = (Tally::new("a"), Tally::new("b"), Tally::new("c"));
        let mut group = CellGroup::new("main");
        group.push(&a);
        group.push(&b);
        group.push(&c);

        assert_eq!(group.pop().unwrap().name(), "c");
        group.advance().unwrap();

        assert_eq!(a.hits.get(), 1);
        assert_eq!(b.hits.get(), 1);
        assert_eq!(c.hits.get(), 0);
    }

    #[test]
    fn test_pop_empty_fails() {
        let mut group = CellGroup::new("main");
        let err = match group.pop() {
            Err(err) => err,
            Ok(member) => panic!("popped {} from an empty group", member.name()),
        };
        assert_eq!(err.kind(), ViolationKind::EmptyGroup);
        assert!(err.is_contract_misuse());
        assert_eq!(err.cell().to_string(), "main");
    }

    #[test]
    fn test_first_violation_stops_sweep() {
        let (a, bad, c) = (Tally::new("a"), Tally::failing("bad"), Tally::new("c"));
        let mut group = CellGroup::new("main");
        group.push(&a);
        group.push(&bad);
        group.push(&c);

        let err = group.advance().unwrap_err();
        assert_eq!(err.cell().to_string(), "main/bad");
        assert_eq!(c.hits.get(), 0);
        assert_eq!(group.steps(), 0);
    }

    #[test]
    fn test_scope_guard_pops_on_drop() {
        let (a, local) = (Tally::new("a"), Tally::new("t"));
        let mut group = CellGroup::new("main");
        group.push(&a);

        {
            let block = group.scope(&local);
            assert_eq!(block.len(), 2);
            block.advance().unwrap();
        }

        assert_eq!(group.len(), 1);
        assert_eq!(group.member_names(), vec!["a"]);
        assert_eq!(local.hits.get(), 1);
    }

    #[test]
    fn test_scope_guard_discards_unpopped_pushes() {
        let (a, t, u) = (Tally::new("a"), Tally::new("t"), Tally::new("u"));
        let mut group = CellGroup::new("main");
        group.push(&a);

        {
            let mut block = group.scope(&t);
            block.push(&u);
        }

        assert_eq!(group.member_names(), vec!["a"]);
    }

    #[test]
    fn test_nested_group_advances_parent_first() {
        let x = std::cell::RefCell::new(1i64);
        let x_ = ScalarCell::new("x", &x);
        let mut main = CellGroup::new("main");
        main.push(&x_);

        x_.get().unwrap();
        main.advance().unwrap();

        let t = std::cell::RefCell::new(0i64);
        let t_ = ScalarCell::new("t", &t);
        let mut block = main.nested("local t");
        block.push(&t_);

        // Mutating the certified outer variable inside the block is caught
        // and reported through both scopes.
        x_.get().unwrap().store(2);
        let err = block.advance().unwrap_err();
        assert_eq!(err.cell().to_string(), "local t/main/x");
        assert_eq!(err.kind(), ViolationKind::UseBeforeMutate);
    }

    #[test]
    fn test_nested_group_pop_never_removes_parent() {
        let x = std::cell::RefCell::new(1i64);
        let x_ = ScalarCell::new("x", &x);
        let mut main = CellGroup::new("main");
        main.push(&x_);

        x_.get().unwrap();
        main.advance().unwrap();

        let t = std::cell::RefCell::new(0i64);
        let t_ = ScalarCell::new("t", &t);
        let mut block = main.nested("local t");
        block.push(&t_);
        assert_eq!(block.len(), 1);
        assert_eq!(block.member_names(), vec!["t"]);
        assert_eq!(block.parent().map(|p| p.name()), Some("main"));

        assert_eq!(block.pop().unwrap().name(), "t");
        let err = match block.pop() {
            Err(err) => err,
            Ok(member) => panic!("popped {} past the pushed members", member.name()),
        };
        assert_eq!(err.kind(), ViolationKind::EmptyGroup);
        assert_eq!(err.cell().to_string(), "local t");

        // The outer scope is still checked
        x_.get().unwrap().store(9);
        let err = block.advance().unwrap_err();
        assert_eq!(err.cell().to_string(), "local t/main/x");
        assert_eq!(err.kind(), ViolationKind::UseBeforeMutate);
    }

    #[test]
    fn test_nested_group_counts_parent_steps() {
        let main = CellGroup::new("main");
        let block = main.nested("block");
        block.advance().unwrap();
        block.advance().unwrap();
        assert_eq!(block.steps(), 2);
        assert_eq!(main.steps(), 2);
    }

    #[test]
    fn test_empty_group_advances() {
        let group = CellGroup::new("main");
        group.advance().unwrap();
        assert!(group.is_empty());
        assert_eq!(group.steps(), 1);
    }
}
