//! This crate provides a doubly-linked ordered sequence with owned cells.
//!
//! The [`List`] allows inserting and removing elements at either end, and
//! removing any cell given its handle, in constant time. Accessing an
//! element at an arbitrary position takes *O*(*n*) time, bounded to *n*/2
//! steps because a position in the second half is reached by walking
//! backward from the tail.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use chain_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3, 4]);
//!
//! list.push_front(0);
//! assert_eq!(Vec::from_iter(&list), vec![&0, &1, &2, &3, &4]);
//!
//! // Negative positions are tail-relative: -1 is the last value.
//! assert_eq!(list.at(-1), Some(&4));
//!
//! // A cell handle allows constant-time removal from the middle.
//! let handle = list.node_at(2).unwrap();
//! assert_eq!(unsafe { list.delete_node(handle) }, 2);
//! assert_eq!(Vec::from_iter(list), vec![0, 1, 3, 4]);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!    ╔═══════════╗           ╔═══════════╗                  ╔═══════════╗
//!    ║  forward  ║ ────────→ ║  forward  ║ ──→ ┄┄ ────────→ ║  forward  ║ ──→ ∅
//!    ╟───────────╢           ╟───────────╢  Cell 2, 3, ...  ╟───────────╢
//! ∅ ←─ backward  ║ ←──────── ║  backward ║ ←── ┄┄ ←──────── ║  backward ║
//!    ╟───────────╢           ╟───────────╢                  ╟───────────╢
//!    ║  value T  ║           ║  value T  ║                  ║  value T  ║
//!    ╚═══════════╝           ╚═══════════╝                  ╚═══════════╝
//!        Cell 0                  Cell 1                      Cell N - 1
//!          ↑                                                      ↑
//!          │  ╔═══════════╗                                       │
//!          └─ ║   head    ║                                       │
//!             ╟───────────╢                                       │
//!             ║   tail    ║ ──────────────────────────────────────┘
//!             ╟───────────╢
//!             ║    len    ║
//!             ╚═══════════╝
//!                  List
//! ```
//! The `List` contains:
//! - a pointer `head` to the first cell (`None` when the list is empty);
//! - a pointer `tail` to the last cell (`None` when the list is empty);
//! - a cached length `len`, kept in step by every mutating operation.
//!
//! Each cell of the list `List<T>` is allocated on the heap and contains:
//! - the `forward` pointer to the successor cell, or `None` in the tail;
//! - the `backward` pointer to the predecessor cell, or `None` in the head;
//! - the actual value `T`.
//!
//! The `forward` links own the cells; the `backward` links are back
//! references. The chain is null-terminated in both directions, never
//! circular: a cycle can only be formed through the unsafe link setters on
//! [`Cell`], and [`List::is_cyclic`] and [`List::entries`] exist to detect
//! that corruption.
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These
//! are double-ended, exact-size and fused, and iterate the list like an
//! array. [`IterMut`] provides mutability of the values (but not of the
//! linked structure of the list).
//!
//! ## Examples
//!
//! ```
//! use chain_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! Three further views exist: [`Nodes`] and [`ReversedNodes`] yield the raw
//! cell handles in either direction, and [`Entries`] yields `(index, value)`
//! pairs while refusing to outrun the recorded length, so it panics on a
//! corrupted chain instead of looping forever.
//!
//! # Sorting
//!
//! [`List::sort`], [`List::sort_by`] and [`List::sort_by_key`] run a stable
//! in-place merge sort directly on the cells: the chain is split with slow
//! and fast cursors, sorted recursively, and merged by rewiring links. No
//! auxiliary array is built.
//!
//! ```
//! use chain_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from([12, 2, 33]);
//! list.sort();
//! assert_eq!(Vec::from_iter(&list), vec![&2, &12, &33]);
//! list.reverse();
//! assert_eq!(Vec::from_iter(&list), vec![&33, &12, &2]);
//! ```
//!
//! # Asynchronous construction
//!
//! A list can be built from a [`Stream`](futures::stream::Stream) or from a
//! collection of futures, strictly one element at a time; see
//! [`List::from_stream`], [`List::try_from_stream`] and
//! [`List::from_futures`].
//!
//! [`List`]: crate::List
//! [`Cell`]: crate::Cell
//! [`Iter`]: crate::Iter
//! [`IterMut`]: crate::IterMut
//! [`Nodes`]: crate::Nodes
//! [`ReversedNodes`]: crate::ReversedNodes
//! [`Entries`]: crate::Entries

#[doc(inline)]
pub use list::iterator::{Entries, IntoIter, Iter, IterMut, Nodes, ReversedNodes};
#[doc(inline)]
pub use list::{Cell, List};

pub mod list;

mod experiments;
