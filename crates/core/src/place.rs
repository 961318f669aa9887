//! Storage locations observed by cells
//!
//! Cells never own what they watch. A [`Place`] is a cheap, copyable handle to
//! client storage that lives in a `RefCell`, so the procedure under test can
//! keep mutating the storage directly while cells compare it against their
//! snapshots.
//!
//! - `&RefCell<T>`: a whole variable (scalar or entire container)
//! - [`ElementPlace`]: one element of a `RefCell`-held [`Sequence`]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

/// A readable, writable storage location
pub trait Place: Copy {
    /// Value stored at this location
    type Value: Clone + PartialEq + fmt::Debug;

    /// Current value
    fn load(&self) -> Self::Value;

    /// Overwrite the current value
    fn store(&self, value: Self::Value);

    /// Read-modify-write in one call
    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Self::Value),
    {
        let mut value = self.load();
        f(&mut value);
        self.store(value);
    }
}

impl<'a, T> Place for &'a RefCell<T>
where
    T: Clone + PartialEq + fmt::Debug,
{
    type Value = T;

    fn load(&self) -> T {
        self.borrow().clone()
    }

    fn store(&self, value: T) {
        *self.borrow_mut() = value;
    }
}

/// Swap the values held by two places
///
/// This is the `<=>` mutation of reversible procedures. Both places may point
/// into the same container.
pub fn exchange<A, B>(a: A, b: B)
where
    A: Place,
    B: Place<Value = A::Value>,
{
    let left = a.load();
    let right = b.load();
    a.store(right);
    b.store(left);
}

/// An ordered container with length query and indexed access
pub trait Sequence {
    /// Element type
    type Item: Clone + PartialEq + fmt::Debug;

    /// Number of elements
    fn len(&self) -> usize;

    /// True when there are no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, if present
    fn get(&self, index: usize) -> Option<&Self::Item>;

    /// Mutable element at `index`, if present
    fn get_mut(&mut self, index: usize) -> Option<&mut Self::Item>;
}

impl<T> Sequence for Vec<T>
where
    T: Clone + PartialEq + fmt::Debug,
{
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        <[T]>::get_mut(self, index)
    }
}

impl<T> Sequence for VecDeque<T>
where
    T: Clone + PartialEq + fmt::Debug,
{
    type Item = T;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        VecDeque::get(self, index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        VecDeque::get_mut(self, index)
    }
}

impl<T, const N: usize> Sequence for [T; N]
where
    T: Clone + PartialEq + fmt::Debug,
{
    type Item = T;

    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self.as_slice(), index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        <[T]>::get_mut(self.as_mut_slice(), index)
    }
}

/// Handle to element `index` of a `RefCell`-held sequence
///
/// # Panics
///
/// `load` and `store` panic if the index is out of bounds for the live
/// sequence, exactly like slice indexing. Container cells refuse to hand out
/// element places once the length has moved, so this only fires for places
/// kept around past a resize.
pub struct ElementPlace<'a, S> {
    container: &'a RefCell<S>,
    index: usize,
}

impl<'a, S> ElementPlace<'a, S> {
    /// Place for `container[index]`
    pub fn new(container: &'a RefCell<S>, index: usize) -> Self {
        ElementPlace { container, index }
    }

    /// Element index within the container
    pub fn index(&self) -> usize {
        self.index
    }

    /// The container this element belongs to
    pub fn container(&self) -> &'a RefCell<S> {
        self.container
    }
}

impl<S: Sequence> ElementPlace<'_, S> {
    /// Current value, or `None` if the index is past the live length
    pub fn try_load(&self) -> Option<S::Item> {
        self.container.borrow().get(self.index).cloned()
    }
}

// Manual impls: a derive would require `S: Copy`.
impl<S> Clone for ElementPlace<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for ElementPlace<'_, S> {}

impl<S> fmt::Debug for ElementPlace<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementPlace")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<'a, S: Sequence> Place for ElementPlace<'a, S> {
    type Value = S::Item;

    fn load(&self) -> S::Item {
        let container = self.container.borrow();
        match container.get(self.index) {
            Some(value) => value.clone(),
            None => panic!(
                "element index {} out of bounds for sequence of length {}",
                self.index,
                container.len()
            ),
        }
    }

    fn store(&self, value: S::Item) {
        let mut container = self.container.borrow_mut();
        let len = container.len();
        match container.get_mut(self.index) {
            Some(slot) => *slot = value,
            None => panic!(
                "element index {} out of bounds for sequence of length {}",
                self.index, len
            ),
        }
    }
}
