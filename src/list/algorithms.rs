use crate::list::{Cell, Erased, List};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    fn clone_from(&mut self, other: &Self) {
        self.clear();
        self.extend(other.iter().cloned());
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains a value equal to the given one.
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
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Returns a reference to the first value satisfying the predicate, or
    /// `None` if no value does.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let list = List::from([1, 2, 3, 4]);
    /// assert_eq!(list.find(|v| v % 2 == 0), Some(&2));
    /// assert_eq!(list.find(|v| *v > 9), None);
    /// ```
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|&value| predicate(value))
    }

    /// Returns a handle to the first cell whose value satisfies the
    /// predicate, or `None` if no cell does.
    pub fn find_node<P>(&self, mut predicate: P) -> Option<NonNull<Cell<T>>>
    where
        P: FnMut(&T) -> bool,
    {
        // SAFETY: `nodes` only yields handles to live cells of this list.
        self.nodes()
            .find(|&cell| predicate(unsafe { &(*cell.as_ptr()).value }))
    }

    /// Returns the position of the first value satisfying the predicate, or
    /// `None` if no value does.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.find_index(|v| *v > 1), Some(1));
    /// assert_eq!(list.find_index(|v| *v > 9), None);
    /// ```
    pub fn find_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().position(predicate)
    }

    /// Returns the position of the first value equal to the given one, or
    /// `None` if the list holds no such value.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|v| v == value)
    }

    /// Returns a new `List` containing clones of the values satisfying the
    /// predicate, in original order.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from([1, 2, 3, 4]);
    /// let even = list.filter(|v| v % 2 == 0);
    /// assert_eq!(Vec::from_iter(even), vec![2, 4]);
    /// ```
    pub fn filter<P>(&self, mut predicate: P) -> List<T>
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        self.iter().filter(|&value| predicate(value)).cloned().collect()
    }

    /// Returns a new `List` obtained by applying `transform` to every value,
    /// in original order.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let doubled = list.map(|v| v * 2);
    /// assert_eq!(Vec::from_iter(doubled), vec![2, 4, 6]);
    /// ```
    pub fn map<U, F>(&self, transform: F) -> List<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(transform).collect()
    }

    /// Sort the list.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and
    /// *O*(log(*n*)) stack memory. No auxiliary array is built; cells are
    /// relinked in place.
    ///
    /// # Current Implementation
    ///
    /// Top-down merge sort: the chain is split at its middle with a pair of
    /// slow and fast cursors, the halves are sorted recursively, and the
    /// sorted runs are merged by rewiring links behind a payload-less
    /// sentinel cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use std::iter::FromIterator;
    /// let mut list = List::from_iter([5, 2, 4, 3, 1]);
    ///
    /// list.sort();
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        merge_sort(self, T::cmp);
    }

    /// Sort the list with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the list. If the ordering is not total, the order
    /// of the elements is unspecified.
    ///
    /// For example, while [`f64`] doesn't implement [`Ord`] because
    /// `NaN != NaN`, we can use `partial_cmp` as our sort function
    /// when we know the list doesn't contain a `NaN`.
    ///
    /// # Complexity
    ///
    /// Same as [`List::sort`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use std::iter::FromIterator;
    /// let mut v = List::from([5, 4, 1, 3, 2]);
    /// v.sort_by(|a, b| a.cmp(b));
    /// assert_eq!(Vec::from_iter(&v), vec![&1, &2, &3, &4, &5]);
    ///
    /// // reverse sorting
    /// v.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(Vec::from_iter(&v), vec![&5, &4, &3, &2, &1]);
    /// ```
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        merge_sort(self, compare);
    }

    /// Sorts the list with a key extraction function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements) and
    /// *O*(*m* \* *n* \* log(*n*)) worst-case, where the key function
    /// is *O*(*m*).
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use std::iter::FromIterator;
    /// let mut v = List::from([-5i32, 4, 1, -3, 2]);
    ///
    /// v.sort_by_key(|k| k.abs());
    /// assert_eq!(Vec::from_iter(v), vec![1, 2, -3, 4, -5]);
    /// ```
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        merge_sort(self, |a, b| f(a).cmp(&f(b)));
    }

    /// Returns a sorted copy of the list, leaving the receiver untouched.
    pub fn to_sorted(&self) -> Self
    where
        T: Clone + Ord,
    {
        let mut sorted = self.clone();
        sorted.sort();
        sorted
    }

    /// Returns a copy of the list sorted with a comparator function,
    /// leaving the receiver untouched.
    pub fn to_sorted_by<F>(&self, compare: F) -> Self
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut sorted = self.clone();
        sorted.sort_by(compare);
        sorted
    }

    /// Detects whether the chain reachable from `start` along the `forward`
    /// links ever revisits a cell, with Floyd's two-cursor walk: the fast
    /// cursor advances two links per round, the slow one link, and they can
    /// only meet on a cycle. *O*(*n*) time, *O*(1) memory.
    ///
    /// A well-formed list always answers `false`; a cycle is only
    /// constructible through the unsafe link setters on [`Cell`].
    ///
    /// # Safety
    ///
    /// `start` must be a handle to a live cell, and every cell reachable
    /// from it along `forward` links must also be live.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let head = list.node_at(0).unwrap();
    /// // SAFETY: `head` and the whole chain behind it are live.
    /// assert!(!unsafe { List::is_cyclic(head) });
    /// ```
    pub unsafe fn is_cyclic(start: NonNull<Cell<T>>) -> bool {
        let mut slow = start;
        let mut fast = start;
        loop {
            fast = match (*fast.as_ptr()).forward {
                Some(next) => next,
                None => return false,
            };
            if fast == slow {
                return true;
            }
            fast = match (*fast.as_ptr()).forward {
                Some(next) => next,
                None => return false,
            };
            if fast == slow {
                return true;
            }
            slow = match (*slow.as_ptr()).forward {
                Some(next) => next,
                None => return false,
            };
        }
    }
}

fn merge_sort<T, F>(list: &mut List<T>, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if list.len < 2 {
        return;
    }
    let head = match list.head {
        Some(head) => head,
        None => return,
    };
    // SAFETY: `head` starts a well-formed chain of `len` live cells; the
    // helpers below only rewire links between those cells.
    unsafe {
        let head = sort_cells(head, &mut compare);
        // The sort threads the chain by heads only; the new tail is found by
        // walking to the end of the merged run.
        let mut tail = head;
        while let Some(next) = (*tail.as_ptr()).forward {
            tail = next;
        }
        list.head = Some(head);
        list.tail = Some(tail);
    }
}

/// Sort the chain starting at `head` and return its new head.
///
/// The chain must be null-terminated in the forward direction; the caller
/// owns every cell in it.
unsafe fn sort_cells<T, F>(head: NonNull<Cell<T>>, compare: &mut F) -> NonNull<Cell<T>>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mid = match split_at_middle(head) {
        Some(mid) => mid,
        // A single cell is already sorted.
        None => return head,
    };
    let left = sort_cells(head, compare);
    let right = sort_cells(mid, compare);
    merge_runs(left, right, compare)
}

/// Find the middle of the chain starting at `head` with a slow cursor and a
/// fast cursor advancing two links per round, sever the chain there, and
/// return the head of the second half. Returns `None` if the chain holds a
/// single cell.
unsafe fn split_at_middle<T>(head: NonNull<Cell<T>>) -> Option<NonNull<Cell<T>>> {
    let mut slow = head;
    let mut fast = head;
    loop {
        let step = match (*fast.as_ptr()).forward {
            Some(next) => (*next.as_ptr()).forward,
            None => None,
        };
        match step {
            Some(next) => {
                fast = next;
                slow = match (*slow.as_ptr()).forward {
                    Some(next) => next,
                    None => break,
                };
            }
            None => break,
        }
    }
    let mid = (*slow.as_ptr()).forward.take();
    if let Some(mid) = mid {
        (*mid.as_ptr()).backward = None;
    }
    mid
}

/// Merge two sorted non-empty runs into one and return its head.
///
/// The rewiring is anchored by a payload-less sentinel cell on the stack, so
/// no "is this the first cell" branch is needed in the loop. On equal keys
/// the left run's cell is taken first, which keeps the sort stable.
unsafe fn merge_runs<T, F>(
    left_head: NonNull<Cell<T>>,
    right_head: NonNull<Cell<T>>,
    compare: &mut F,
) -> NonNull<Cell<T>>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut sentinel = Cell {
        forward: None,
        backward: None,
        value: Erased,
    };
    // `Cell` is `#[repr(C)]` with the value last, so a `Cell<Erased>` shares
    // the link layout of `Cell<T>`; only the links of the sentinel are ever
    // touched.
    let sentinel: NonNull<Cell<T>> = NonNull::from(&mut sentinel).cast();
    let mut tail = sentinel;
    let mut left = Some(left_head);
    let mut right = Some(right_head);
    while let (Some(l), Some(r)) = (left, right) {
        let chosen = if compare(&(*l.as_ptr()).value, &(*r.as_ptr()).value) != Ordering::Greater {
            left = (*l.as_ptr()).forward;
            l
        } else {
            right = (*r.as_ptr()).forward;
            r
        };
        (*tail.as_ptr()).forward = Some(chosen);
        (*chosen.as_ptr()).backward = Some(tail);
        tail = chosen;
    }
    // Splice whichever run is left over behind the merged tail.
    let rest = left.or(right);
    (*tail.as_ptr()).forward = rest;
    if let Some(rest) = rest {
        (*rest.as_ptr()).backward = Some(tail);
    }
    let head = match (*sentinel.as_ptr()).forward {
        Some(head) => head,
        // Both runs are non-empty, so the loop ran at least once.
        None => left_head,
    };
    // The first merged cell must not keep a link to the stack sentinel.
    (*head.as_ptr()).backward = None;
    head
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::iter::FromIterator;

    fn assert_sorted_as<T>(input: Vec<T>, expected: Vec<T>)
    where
        T: Ord + Clone + std::fmt::Debug,
    {
        let mut list = List::from_iter(input);
        let len = list.len();
        list.sort();
        assert_eq!(Vec::from_iter(&list), expected.iter().collect::<Vec<_>>());
        assert_eq!(list.len(), len);
        // Head and tail must agree with the new order.
        assert_eq!(list.front(), expected.first());
        assert_eq!(list.back(), expected.last());
        // The backward chain must mirror the forward chain.
        let backward: Vec<_> = list.iter().rev().collect();
        assert_eq!(backward, expected.iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn sort_basic() {
        assert_sorted_as(Vec::<i32>::new(), vec![]);
        assert_sorted_as(vec![1], vec![1]);
        assert_sorted_as(vec![2, 1], vec![1, 2]);
        assert_sorted_as(vec![1, 2], vec![1, 2]);
        assert_sorted_as(vec![5, 2, 4, 3, 1], vec![1, 2, 3, 4, 5]);
        assert_sorted_as(vec![1, 2, 3, 4, 5], vec![1, 2, 3, 4, 5]);
        assert_sorted_as(vec![5, 4, 3, 2, 1], vec![1, 2, 3, 4, 5]);
        assert_sorted_as(vec![2, 2, 1, 1, 3, 3], vec![1, 1, 2, 2, 3, 3]);
        assert_sorted_as(
            vec![9, 3, 7, 1, 8, 2, 6, 0, 5, 4],
            (0..10).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn sort_then_reverse() {
        let mut list = List::from([12, 2, 33]);
        list.sort();
        assert_eq!(Vec::from_iter(&list), vec![&2, &12, &33]);
        list.reverse();
        assert_eq!(Vec::from_iter(&list), vec![&33, &12, &2]);
    }

    #[test]
    fn sort_idempotent() {
        let mut list = List::from([4, 1, 3, 2, 5, 1]);
        list.sort();
        let once = Vec::from_iter(list.iter().copied());
        list.sort();
        assert_eq!(Vec::from_iter(list.iter().copied()), once);
    }

    #[test]
    fn sort_is_stable() {
        // Pairs compared by key only; the sequence numbers of equal keys
        // must keep their original relative order.
        let pairs = vec![(2, 0), (1, 1), (2, 2), (1, 3), (2, 4), (1, 5)];
        let mut list = List::from_iter(pairs);
        list.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            Vec::from_iter(list),
            vec![(1, 1), (1, 3), (1, 5), (2, 0), (2, 2), (2, 4)]
        );
    }

    #[test]
    fn sort_by_and_by_key() {
        let mut list = List::from([5, 4, 1, 3, 2]);
        list.sort_by(|a, b| b.cmp(a));
        assert_eq!(Vec::from_iter(&list), vec![&5, &4, &3, &2, &1]);

        let mut list = List::from([-5i32, 4, 1, -3, 2]);
        list.sort_by_key(|k| k.abs());
        assert_eq!(Vec::from_iter(list), vec![1, 2, -3, 4, -5]);
    }

    #[test]
    fn sort_large_mixed() {
        // A deterministic shuffle big enough to exercise deep recursion.
        let input: Vec<i64> = (0..500).map(|i| (i * 193) % 499).collect();
        let mut expected = input.clone();
        expected.sort();
        assert_sorted_as(input, expected);
    }

    #[test]
    fn to_sorted_leaves_original() {
        let list = List::from([3, 1, 2]);
        let sorted = list.to_sorted();
        assert_eq!(Vec::from_iter(sorted), vec![1, 2, 3]);
        assert_eq!(Vec::from_iter(&list), vec![&3, &1, &2]);

        let sorted = list.to_sorted_by(|a, b| b.cmp(a));
        assert_eq!(Vec::from_iter(sorted), vec![3, 2, 1]);
    }

    #[test]
    fn sorted_list_still_mutable() {
        let mut list = List::from([3, 1, 2]);
        list.sort();
        list.push_front(0);
        list.push_back(4);
        assert_eq!(Vec::from_iter(list), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn is_cyclic_clean_chain() {
        let list = List::from_iter(0..5);
        let head = list.node_at(0).unwrap();
        assert!(!unsafe { List::is_cyclic(head) });

        let sole = List::from([1]);
        let head = sole.node_at(0).unwrap();
        assert!(!unsafe { List::is_cyclic(head) });
    }

    #[test]
    fn is_cyclic_detects_corruption() {
        let list = List::from_iter(0..5);
        let head = list.node_at(0).unwrap();
        let mid = list.node_at(2).unwrap();
        let tail = list.node_at(-1).unwrap();

        // Bend the tail's forward link back into the chain.
        unsafe { (*tail.as_ptr()).set_forward(Some(mid)) };
        assert!(unsafe { List::is_cyclic(head) });

        // Restore the chain so the list can be dropped normally.
        unsafe { (*tail.as_ptr()).set_forward(None) };
        assert!(!unsafe { List::is_cyclic(head) });
    }

    #[test]
    fn search_and_combinators() {
        let list = List::from([1, 2, 3, 4]);
        assert_eq!(list.find(|v| v % 2 == 0), Some(&2));
        assert_eq!(list.find(|v| *v > 9), None);
        assert_eq!(list.find_index(|v| *v > 2), Some(2));
        assert_eq!(list.index_of(&3), Some(2));
        assert_eq!(list.index_of(&9), None);
        assert!(list.contains(&4));
        assert!(!list.contains(&0));

        let node = list.find_node(|v| *v == 3).unwrap();
        assert_eq!(unsafe { node.as_ref().value() }, &3);
        assert!(list.find_node(|v| *v == 9).is_none());

        assert_eq!(Vec::from_iter(list.filter(|v| v % 2 == 1)), vec![1, 3]);
        assert_eq!(
            Vec::from_iter(list.map(|v| v.to_string())),
            vec!["1", "2", "3", "4"]
        );

        // `reduce`, `forEach`, `some` and `every` come from `Iterator`.
        assert_eq!(list.iter().fold(0, |acc, v| acc + v), 10);
        assert!(list.iter().any(|v| *v == 4));
        assert!(list.iter().all(|v| *v < 5));
    }

    #[test]
    fn eq_ord_hash_clone() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let a = List::from([1, 2, 3]);
        let b = a.clone();
        assert_eq!(a, b);
        assert!(a < List::from([1, 2, 4]));
        assert!(List::from([1, 2]) < a);

        let hash = |list: &List<i32>| {
            let mut hasher = DefaultHasher::new();
            list.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&a), hash(&b));

        let mut c = List::from([9, 9]);
        c.clone_from(&a);
        assert_eq!(c, a);
    }
}
