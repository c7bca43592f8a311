use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use serde::ser::{Serialize, Serializer};

use crate::{Entries, IntoIter, Iter, IterMut, Nodes, ReversedNodes};

pub mod iterator;
pub mod stream;

mod algorithms;

/// The `List` is a doubly-linked ordered sequence with owned cells. It allows
/// inserting and removing elements at either end, and removing any cell given
/// its handle, in constant time. Accessing an element at an arbitrary position
/// takes *O*(*n*) time, bounded to *n*/2 steps by walking from the nearer end.
///
/// The `List` contains:
/// - a pointer `head` to the first cell (`None` when empty);
/// - a pointer `tail` to the last cell (`None` when empty);
/// - a cached length `len`.
///
/// # Naming Conventions
///
/// - `forward`: the owning link from a cell to its successor;
/// - `backward`: the non-owning link from a cell to its predecessor;
/// - a *handle* is a `NonNull<Cell<T>>` naming a live cell of the list.
pub struct List<T> {
    pub(crate) head: Option<NonNull<Cell<T>>>,
    pub(crate) tail: Option<NonNull<Cell<T>>>,
    /// the cached length of the list
    pub(crate) len: usize,
    _marker: PhantomData<Box<Cell<T>>>,
}

/// A single cell of the chain, holding one value and the two neighbor links.
///
/// Cells are created and destroyed only by [`List`]; the only mutation
/// available outside of `List` methods is through the unsafe link setters,
/// which exist as an escape hatch and can violate the list invariants.
#[repr(C)]
pub struct Cell<T> {
    pub(crate) forward: Option<NonNull<Cell<T>>>,
    pub(crate) backward: Option<NonNull<Cell<T>>>,
    pub(crate) value: T,
}

/// Payload-less stand-in for a cell value.
///
/// `Cell` is `#[repr(C)]` with the value last, so a `Cell<Erased>` shares
/// the link layout of every `Cell<T>` and can serve as a link-only sentinel.
#[derive(Default)]
pub(crate) struct Erased;

// private methods
impl<T> List<T> {
    pub(crate) fn new_cell(value: T) -> NonNull<Cell<T>> {
        NonNull::from(Box::leak(Box::new(Cell {
            forward: None,
            backward: None,
            value,
        })))
    }

    /// Attach a fresh cell as the new head.
    fn push_front_cell(&mut self, cell: NonNull<Cell<T>>) {
        // SAFETY: `cell` is freshly allocated, and `head` is either `None`
        // or a live cell owned by this list.
        unsafe {
            (*cell.as_ptr()).forward = self.head;
            (*cell.as_ptr()).backward = None;
            match self.head {
                None => self.tail = Some(cell),
                Some(head) => (*head.as_ptr()).backward = Some(cell),
            }
        }
        self.head = Some(cell);
        self.len += 1;
    }

    /// Attach a fresh cell as the new tail.
    fn push_back_cell(&mut self, cell: NonNull<Cell<T>>) {
        // SAFETY: `cell` is freshly allocated, and `tail` is either `None`
        // or a live cell owned by this list.
        unsafe {
            (*cell.as_ptr()).forward = None;
            (*cell.as_ptr()).backward = self.tail;
            match self.tail {
                None => self.head = Some(cell),
                Some(tail) => (*tail.as_ptr()).forward = Some(cell),
            }
        }
        self.tail = Some(cell);
        self.len += 1;
    }

    /// Detach the head cell and return it as a box, or `None` if the list
    /// is empty.
    fn pop_front_cell(&mut self) -> Option<Box<Cell<T>>> {
        self.head.map(|cell| {
            // SAFETY: `head` is a live cell owned by this list, and so is
            // its forward neighbor, if any.
            let cell = unsafe { Box::from_raw(cell.as_ptr()) };
            self.head = cell.forward;
            match self.head {
                None => self.tail = None,
                Some(head) => unsafe { (*head.as_ptr()).backward = None },
            }
            self.len -= 1;
            cell
        })
    }

    /// Detach the tail cell and return it as a box, or `None` if the list
    /// is empty.
    fn pop_back_cell(&mut self) -> Option<Box<Cell<T>>> {
        self.tail.map(|cell| {
            // SAFETY: `tail` is a live cell owned by this list, and so is
            // its backward neighbor, if any.
            let cell = unsafe { Box::from_raw(cell.as_ptr()) };
            self.tail = cell.backward;
            match self.tail {
                None => self.head = None,
                Some(tail) => unsafe { (*tail.as_ptr()).forward = None },
            }
            self.len -= 1;
            cell
        })
    }
}

impl<T> List<T> {
    /// Create an empty `List`.
    ///
    /// # Examples
    /// ```
    /// use chain_list::List;
    /// let list: List<u32> = List::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.len(), 1);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    ///
    /// list.push_back(3);
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.front(), None);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Provides a reference to the first value, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        // SAFETY: `head` is either `None` or a live cell owned by this list.
        unsafe { self.head.map(|cell| &(*cell.as_ptr()).value) }
    }

    /// Provides a mutable reference to the first value, or `None` if the
    /// list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// if let Some(x) = list.front_mut() {
    ///     *x = 5;
    /// }
    /// assert_eq!(list.front(), Some(&5));
    /// ```
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        // SAFETY: `head` is either `None` or a live cell owned by this list.
        unsafe { self.head.map(|cell| &mut (*cell.as_ptr()).value) }
    }

    /// Provides a reference to the last value, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.back(), None);
    ///
    /// list.push_back(1);
    /// assert_eq!(list.back(), Some(&1));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        // SAFETY: `tail` is either `None` or a live cell owned by this list.
        unsafe { self.tail.map(|cell| &(*cell.as_ptr()).value) }
    }

    /// Provides a mutable reference to the last value, or `None` if the
    /// list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// if let Some(x) = list.back_mut() {
    ///     *x = 5;
    /// }
    /// assert_eq!(list.back(), Some(&5));
    /// ```
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        // SAFETY: `tail` is either `None` or a live cell owned by this list.
        unsafe { self.tail.map(|cell| &mut (*cell.as_ptr()).value) }
    }

    /// Prepends a value as the new head cell, and returns the new length of
    /// the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front(), Some(&2));
    ///
    /// assert_eq!(list.push_front(1), 2);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    pub fn push_front(&mut self, value: T) -> usize {
        self.push_front_cell(Self::new_cell(value));
        self.len
    }

    /// Removes the first value and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        self.pop_front_cell().map(|cell| cell.value)
    }

    /// Appends a value as the new tail cell, and returns the new length of
    /// the list.
    ///
    /// To append several values at once, use [`Extend`].
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.push_back(1), 1);
    /// assert_eq!(list.push_back(3), 2);
    /// assert_eq!(list.back(), Some(&3));
    /// ```
    pub fn push_back(&mut self, value: T) -> usize {
        self.push_back_cell(Self::new_cell(value));
        self.len
    }

    /// Removes the last value and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_back(), None);
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        self.pop_back_cell().map(|cell| cell.value)
    }

    /// Removes the cell named by `handle` from the list and returns its
    /// value, rewiring the neighbor links and decrementing the length. The
    /// sole-cell, head, tail and interior shapes are all handled; the
    /// removed cell is deallocated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Safety
    ///
    /// `handle` must name a cell that is currently a live member of *this*
    /// list. Passing a handle from another list, or one that has already
    /// been removed, is undefined behavior; membership is not checked.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let handle = list.node_at(1).unwrap();
    /// // SAFETY: `handle` was just obtained from `list` and is still live.
    /// assert_eq!(unsafe { list.delete_node(handle) }, 2);
    /// assert_eq!(list.len(), 2);
    /// ```
    pub unsafe fn delete_node(&mut self, handle: NonNull<Cell<T>>) -> T {
        let cell = Box::from_raw(handle.as_ptr());
        match cell.backward {
            Some(prev) => (*prev.as_ptr()).forward = cell.forward,
            // the cell is the head
            None => self.head = cell.forward,
        }
        match cell.forward {
            Some(next) => (*next.as_ptr()).backward = cell.backward,
            // the cell is the tail
            None => self.tail = cell.backward,
        }
        self.len -= 1;
        cell.value
    }

    /// Removes the first cell whose value equals `value` and returns `true`,
    /// or returns `false` without mutation if no cell matches.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from([1, 2, 2, 3]);
    /// assert!(list.delete(&2));
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3]);
    /// ```
    pub fn delete(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let mut current = self.head;
        while let Some(cell) = current {
            // SAFETY: `current` walks the chain of live cells owned by this
            // list, so every handle it yields is a valid member.
            unsafe {
                if (*cell.as_ptr()).value == *value {
                    self.delete_node(cell);
                    return true;
                }
                current = (*cell.as_ptr()).forward;
            }
        }
        false
    }

    /// Returns a handle to the cell at the given logical position, or `None`
    /// if the position is out of range.
    ///
    /// A negative `index` is a tail-relative offset: `-1` names the last
    /// cell and `-len` the first. A non-negative `index` in the second half
    /// of the list is converted to its tail-relative form before walking, so
    /// the walk never exceeds `len / 2` steps.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let list = List::from([10, 20, 30, 40]);
    /// assert_eq!(list.at(0), Some(&10));
    /// assert_eq!(list.at(-1), Some(&40));
    /// assert_eq!(list.at(-4), Some(&10));
    /// assert_eq!(list.at(4), None);
    /// assert_eq!(list.at(-5), None);
    /// ```
    pub fn node_at(&self, index: isize) -> Option<NonNull<Cell<T>>> {
        let len = self.len as isize;
        let mut index = index;
        if index >= len {
            return None;
        }
        if index > len / 2 {
            index -= len;
        }
        if index < 0 {
            if index < -len {
                return None;
            }
            let mut cell = self.tail;
            for _ in index..-1 {
                // SAFETY: the walk stays within the chain of live cells.
                cell = unsafe { (*cell?.as_ptr()).backward };
            }
            cell
        } else {
            let mut cell = self.head;
            for _ in 0..index {
                // SAFETY: the walk stays within the chain of live cells.
                cell = unsafe { (*cell?.as_ptr()).forward };
            }
            cell
        }
    }

    /// Returns a reference to the value at the given logical position, or
    /// `None` if out of range. See [`List::node_at`] for the index
    /// semantics.
    pub fn at(&self, index: isize) -> Option<&T> {
        // SAFETY: `node_at` only returns handles to live cells of this list.
        self.node_at(index).map(|cell| unsafe { &(*cell.as_ptr()).value })
    }

    /// Returns a mutable reference to the value at the given logical
    /// position, or `None` if out of range.
    pub fn at_mut(&mut self, index: isize) -> Option<&mut T> {
        // SAFETY: `node_at` only returns handles to live cells of this list.
        self.node_at(index)
            .map(|cell| unsafe { &mut (*cell.as_ptr()).value })
    }

    /// Reverses the list in place by swapping every cell's forward and
    /// backward links, then swapping `head` and `tail`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// list.reverse();
    /// assert_eq!(Vec::from_iter(&list), vec![&3, &2, &1]);
    ///
    /// // Reversal is an involution.
    /// list.reverse();
    /// assert_eq!(Vec::from_iter(&list), vec![&1, &2, &3]);
    /// ```
    pub fn reverse(&mut self) {
        let mut current = self.head;
        while let Some(cell) = current {
            // SAFETY: the walk stays within the chain of live cells; after
            // the swap, the old forward link is found in `backward`.
            unsafe {
                let cell = &mut *cell.as_ptr();
                std::mem::swap(&mut cell.forward, &mut cell.backward);
                current = cell.backward;
            }
        }
        std::mem::swap(&mut self.head, &mut self.tail);
    }

    /// Returns a reversed copy of the list, leaving the receiver untouched.
    pub fn to_reversed(&self) -> Self
    where
        T: Clone,
    {
        let mut list = self.iter().cloned().collect::<List<T>>();
        list.reverse();
        list
    }

    /// Removes up to `count` cells beginning at logical position `start`,
    /// and returns their values, in original order, as a new `List`.
    ///
    /// The second argument is a *count*, not an end position. If
    /// `start >= len`, an empty list is returned and the receiver is not
    /// mutated. If the chain runs out before `count` removals, the removal
    /// stops early.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from(['a', 'b', 'c', 'd', 'e']);
    /// let removed = list.splice(1, 2);
    /// assert_eq!(Vec::from_iter(removed), vec!['b', 'c']);
    /// assert_eq!(Vec::from_iter(list), vec!['a', 'd', 'e']);
    /// ```
    pub fn splice(&mut self, start: usize, count: usize) -> List<T> {
        let mut removed = List::new();
        if start >= self.len {
            return removed;
        }
        let mut next = self.node_at(start as isize);
        for _ in 0..count {
            let cell = match next {
                Some(cell) => cell,
                None => break,
            };
            // SAFETY: `cell` is a live member of this list; its forward
            // handle is read before the cell is deleted.
            unsafe {
                next = (*cell.as_ptr()).forward;
                removed.push_back(self.delete_node(cell));
            }
        }
        removed
    }

    /// Returns a new `List` containing copies of up to `count` values
    /// beginning at logical position `start`, without mutating the receiver.
    ///
    /// The second argument is a *count*, not an end position. The copy stops
    /// early when the chain is exhausted.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from([1, 2, 3, 4]);
    /// assert_eq!(Vec::from_iter(list.slice(1, 2)), vec![2, 3]);
    /// assert_eq!(Vec::from_iter(list.slice(3, 10)), vec![4]);
    /// assert!(list.slice(4, 1).is_empty());
    /// assert_eq!(list.len(), 4);
    /// ```
    pub fn slice(&self, start: usize, count: usize) -> List<T>
    where
        T: Clone,
    {
        let mut copied = List::new();
        if start >= self.len {
            return copied;
        }
        let mut current = self.node_at(start as isize);
        for _ in 0..count {
            let cell = match current {
                Some(cell) => cell,
                None => break,
            };
            // SAFETY: the walk stays within the chain of live cells.
            unsafe {
                copied.push_back((*cell.as_ptr()).value.clone());
                current = (*cell.as_ptr()).forward;
            }
        }
        copied
    }

    /// Overwrites the values of the cells in the half-open logical range
    /// `start..end` with clones of `value`. Links and length are unchanged;
    /// the out-of-range portion of the range is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from([1, 2, 3, 4]);
    /// list.fill(0, 1, 3);
    /// assert_eq!(Vec::from_iter(list), vec![1, 0, 0, 4]);
    /// ```
    pub fn fill(&mut self, value: T, start: usize, end: usize)
    where
        T: Clone,
    {
        if start >= end || start >= self.len {
            return;
        }
        let mut current = self.node_at(start as isize);
        for _ in start..end {
            let cell = match current {
                Some(cell) => cell,
                None => break,
            };
            // SAFETY: the walk stays within the chain of live cells.
            unsafe {
                (*cell.as_ptr()).value = value.clone();
                current = (*cell.as_ptr()).forward;
            }
        }
    }

    /// Returns a new `List` containing copies of the receiver's values
    /// followed by copies of each argument list's values, in argument order.
    /// None of the inputs are mutated.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let a = List::from([1, 2]);
    /// let b = List::from([3]);
    /// let c = List::from([4, 5]);
    /// let joined = a.concat([&b, &c]);
    /// assert_eq!(Vec::from_iter(joined), vec![1, 2, 3, 4, 5]);
    /// assert_eq!(a.len(), 2);
    /// ```
    pub fn concat<'a, I>(&'a self, others: I) -> List<T>
    where
        T: Clone + 'a,
        I: IntoIterator<Item = &'a List<T>>,
    {
        let mut joined = self.iter().cloned().collect::<List<T>>();
        for other in others {
            joined.extend(other.iter().cloned());
        }
        joined
    }

    /// Shrinks the list to `new_len` elements: the cell at position
    /// `new_len - 1` becomes the new tail, its forward link is severed, and
    /// every cell past it is freed. A no-op when `new_len == len`.
    ///
    /// The length can only shrink through this method.
    ///
    /// # Panics
    ///
    /// Panics if `new_len > len`; the list is not mutated in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from([1, 2, 3, 4, 5]);
    /// list.truncate(2);
    /// assert_eq!(Vec::from_iter(&list), vec![&1, &2]);
    /// assert_eq!(list.back(), Some(&2));
    /// ```
    pub fn truncate(&mut self, new_len: usize) {
        assert!(
            new_len <= self.len,
            "Cannot grow a list by assigning a larger length"
        );
        if new_len == self.len {
            return;
        }
        if new_len == 0 {
            self.clear();
            return;
        }
        // `new_len` is in `1..len`, so the new tail exists.
        let new_tail = match self.node_at(new_len as isize - 1) {
            Some(cell) => cell,
            None => return,
        };
        // SAFETY: `new_tail` is a live member; the severed suffix is a chain
        // of live cells exclusively owned by this list, freed one by one.
        unsafe {
            let mut current = (*new_tail.as_ptr()).forward;
            (*new_tail.as_ptr()).forward = None;
            while let Some(cell) = current {
                let cell = Box::from_raw(cell.as_ptr());
                current = cell.forward;
            }
        }
        self.tail = Some(new_tail);
        self.len = new_len;
    }

    /// Builds a new `List` from any finite source, applying `transform` to
    /// each element in source order before appending it.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_mapped(["1", "22", "333"], str::len);
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3]);
    /// ```
    pub fn from_mapped<I, U, F>(source: I, transform: F) -> Self
    where
        I: IntoIterator<Item = U>,
        F: FnMut(U) -> T,
    {
        source.into_iter().map(transform).collect()
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from([0, 1, 2]);
    ///
    /// for value in list.iter_mut() {
    ///     *value += 10;
    /// }
    ///
    /// assert_eq!(Vec::from_iter(list), vec![10, 11, 12]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Provides a lazy iterator over the cell handles, forward from the
    /// head. The sequence is finite while the chain is acyclic.
    #[inline]
    pub fn nodes(&self) -> Nodes<'_, T> {
        Nodes::new(self)
    }

    /// Provides a lazy iterator over the cell handles, backward from the
    /// tail. The sequence is finite while the chain is acyclic.
    #[inline]
    pub fn reversed_nodes(&self) -> ReversedNodes<'_, T> {
        ReversedNodes::new(self)
    }

    /// Provides a lazy iterator of `(index, value)` pairs which defends
    /// against a corrupted chain: if more than `len` pairs would be produced
    /// without reaching the tail, iteration panics instead of looping
    /// forever.
    ///
    /// # Panics
    ///
    /// The returned iterator panics if the chain has been bent into a cycle
    /// through the unsafe cell link setters.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let list = List::from(['a', 'b']);
    /// let entries: Vec<_> = list.entries().collect();
    /// assert_eq!(entries, vec![(0, &'a'), (1, &'b')]);
    /// ```
    #[inline]
    pub fn entries(&self) -> Entries<'_, T> {
        Entries::new(self)
    }

    /// Produces the JSON rendition of the list: a flat ordered array of the
    /// values.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.to_json().unwrap(), "[1,2,3]");
    /// ```
    pub fn to_json(&self) -> serde_json::Result<String>
    where
        T: Serialize,
    {
        serde_json::to_string(self)
    }
}

impl<T> Cell<T> {
    /// Returns a reference to the stored value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns a mutable reference to the stored value.
    #[inline]
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Returns the handle of the successor cell, if any.
    #[inline]
    pub fn forward(&self) -> Option<NonNull<Cell<T>>> {
        self.forward
    }

    /// Returns the handle of the predecessor cell, if any.
    #[inline]
    pub fn backward(&self) -> Option<NonNull<Cell<T>>> {
        self.backward
    }

    /// Overwrites the forward link.
    ///
    /// # Safety
    ///
    /// This bypasses every invariant the owning [`List`] maintains. The
    /// caller is responsible for restoring a well-formed chain before any
    /// further `List` operation; [`List::is_cyclic`] and [`List::entries`]
    /// exist to detect the damage, not to repair it.
    #[inline]
    pub unsafe fn set_forward(&mut self, forward: Option<NonNull<Cell<T>>>) {
        self.forward = forward;
    }

    /// Overwrites the backward link.
    ///
    /// # Safety
    ///
    /// Same contract as [`Cell::set_forward`].
    #[inline]
    pub unsafe fn set_backward(&mut self, backward: Option<NonNull<Cell<T>>>) {
        self.backward = backward;
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders the value sequence joined by `⇄`, mirroring the bidirectional
/// links.
///
/// # Examples
///
/// ```
/// use chain_list::List;
///
/// let list = List::from([1, 2, 3]);
/// assert_eq!(list.to_string(), "1 ⇄ 2 ⇄ 3");
/// ```
impl<T: Display> Display for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut values = self.iter();
        if let Some(first) = values.next() {
            write!(f, "{}", first)?;
            for value in values {
                write!(f, " ⇄ {}", value)?;
            }
        }
        Ok(())
    }
}

impl<T: Serialize> Serialize for List<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(values: [T; N]) -> Self {
        // Call form iterates the array by value on the 2018 edition.
        IntoIterator::into_iter(values).collect()
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}
