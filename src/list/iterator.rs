use crate::list::{Cell, List};
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An iterator over the values of a `List`.
///
/// It keeps a pair of cursors `front` and `back` delimiting the values not
/// yet yielded, plus the remaining count `len`; when `len` reaches zero the
/// cursors are exhausted.
///
/// Though the `Iter` does not hold a reference from the list,
/// it actually *borrows* (immutably) from the list, so a phantom
/// marker of `&'a List<T>` is added to protect the list from being
/// write.
///
/// # Examples
///
/// ```compile_fail
/// use chain_list::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.push_back(4);
/// println!("{:?}", iter.next());
/// ```
#[derive(Clone)]
pub struct Iter<'a, T: 'a> {
    front: Option<NonNull<Cell<T>>>,
    back: Option<NonNull<Cell<T>>>,
    len: usize,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            front: list.head,
            back: list.tail,
            len: list.len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("Iter");
        let mut cursor = self.front;
        for _ in 0..self.len {
            // SAFETY: `front..=back` is a range of `len` live cells.
            let current = unsafe { cursor.map(|cell| cell.as_ref()) };
            if let Some(current) = current {
                f.field(&current.value);
                cursor = current.forward;
            }
        }
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.front.map(|cell| {
            // SAFETY: `front..=back` is a range of `len > 0` live cells.
            let current = unsafe { cell.as_ref() };
            self.front = current.forward;
            self.len -= 1;
            &current.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.back.map(|cell| {
            // SAFETY: `front..=back` is a range of `len > 0` live cells.
            let current = unsafe { cell.as_ref() };
            self.back = current.backward;
            self.len -= 1;
            &current.value
        })
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the values of a `List`.
///
/// Though the `IterMut` does not hold a reference from the list,
/// it actually *borrows* (mutably) from the list, so a phantom
/// marker of `&'a mut List<T>` is added to protect the list from
/// being read.
///
/// # Examples
///
/// `List` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use chain_list::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    front: Option<NonNull<Cell<T>>>,
    back: Option<NonNull<Cell<T>>>,
    len: usize,
    _marker: PhantomData<&'a mut List<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        Self {
            front: list.head,
            back: list.tail,
            len: list.len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("IterMut");
        let mut cursor = self.front;
        for _ in 0..self.len {
            // SAFETY: `front..=back` is a range of `len` live cells.
            let current = unsafe { cursor.map(|cell| cell.as_ref()) };
            if let Some(current) = current {
                f.field(&current.value);
                cursor = current.forward;
            }
        }
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.front.map(|mut cell| {
            // SAFETY: `front..=back` is a range of `len > 0` live cells, and
            // each cell is yielded at most once, so the exclusive references
            // never alias.
            let current = unsafe { cell.as_mut() };
            self.front = current.forward;
            self.len -= 1;
            &mut current.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.back.map(|mut cell| {
            // SAFETY: same aliasing argument as in `next`.
            let current = unsafe { cell.as_mut() };
            self.back = current.backward;
            self.len -= 1;
            &mut current.value
        })
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator over the values of a `List`.
///
/// This `struct` is created by the [`into_iter`] method on [`List`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: List::into_iter
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("list", &self.list)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len;
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

/// A lazy iterator over the cell handles, forward along the `forward` links.
///
/// Unlike [`Iter`], it is driven by the links alone, not the cached length,
/// so the sequence it produces is finite exactly while the chain is acyclic.
pub struct Nodes<'a, T: 'a> {
    cursor: Option<NonNull<Cell<T>>>,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> Nodes<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            cursor: list.head,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Iterator for Nodes<'a, T> {
    type Item = NonNull<Cell<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.cursor?;
        // SAFETY: the walk stays within the chain of live cells.
        self.cursor = unsafe { cell.as_ref().forward };
        Some(cell)
    }
}

/// A lazy iterator over the cell handles, backward along the `backward`
/// links, starting at the tail.
pub struct ReversedNodes<'a, T: 'a> {
    cursor: Option<NonNull<Cell<T>>>,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> ReversedNodes<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            cursor: list.tail,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Iterator for ReversedNodes<'a, T> {
    type Item = NonNull<Cell<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.cursor?;
        // SAFETY: the walk stays within the chain of live cells.
        self.cursor = unsafe { cell.as_ref().backward };
        Some(cell)
    }
}

/// An iterator of `(index, value)` pairs that refuses to outrun the recorded
/// length.
///
/// A well-formed list yields exactly `len` pairs. If the links have been
/// bent into a cycle through the unsafe setters, the chain never reaches the
/// tail; this iterator detects that within `len + 1` steps and panics rather
/// than looping forever.
pub struct Entries<'a, T: 'a> {
    cursor: Option<NonNull<Cell<T>>>,
    index: usize,
    budget: usize,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> Entries<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            cursor: list.head,
            index: 0,
            budget: list.len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Iterator for Entries<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.cursor?;
        assert!(
            self.budget > 0,
            "List is corrupted: the chain did not terminate within the recorded length"
        );
        self.budget -= 1;
        // SAFETY: the walk stays within the chain of live cells.
        let current = unsafe { cell.as_ref() };
        self.cursor = current.forward;
        let index = self.index;
        self.index += 1;
        Some((index, &current.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.budget))
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| {
            self.push_back(item);
        });
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::fmt::Debug;
    use std::iter::FromIterator;

    #[test]
    fn test_iter() {
        macro_rules! test_iter {
            ($FN:ident, $ITER:ident $(, $REV:ident)?) => {
                fn $FN<T, I>(input: I, mid: usize)
                where
                    T: Eq + Debug + Clone,
                    I: IntoIterator<Item = T>,
                {
                    #[allow(unused_mut)]
                    let mut vec = Vec::from_iter(input);
                    #[allow(unused_mut)]
                    let mut list = List::from_iter(vec.clone());
                    let len = vec.len();
                    let mut iter = list.$ITER() $( .$REV() )?;
                    for (i, item) in vec.$ITER() $( .$REV() )?.enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                    assert_eq!(iter.len(), 0);

                    let mut iter = list.$ITER() $( .$REV() )?;
                    for (i, item) in vec.$ITER() $( .$REV() )? .take(mid).enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    let mut iter = iter.rev();
                    for (i, item) in vec.$ITER() $( .$REV() )? .skip(mid).rev().enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - mid - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                    assert_eq!(iter.len(), 0);
                }
            };
        }
        test_iter!(test_iter, iter);
        test_iter!(test_iter_mut, iter_mut);
        test_iter!(test_back_iter, iter, rev);
        test_iter!(test_back_iter_mut, iter_mut, rev);

        fn test_case<T, I>(input: I, mid: usize)
        where
            T: Eq + Debug + Clone,
            I: IntoIterator<Item = T> + Clone,
        {
            test_iter(input.clone(), mid);
            test_iter_mut(input.clone(), mid);
            test_back_iter(input.clone(), mid);
            test_back_iter_mut(input.clone(), mid);
        }
        test_case(0..10, 10);
        test_case(0..10, 8);
        test_case(0..10, 5);
        test_case(0..10, 2);
        test_case(0..10, 0);
        test_case(0..2, 2);
        test_case(0..2, 1);
        test_case(0..2, 0);
        test_case(0..1, 1);
        test_case(0..1, 0);
        test_case(0..0, 0);
    }

    #[test]
    fn test_into_iter() {
        let list = List::from_iter(0..5);
        let mut iter = list.into_iter();
        assert_eq!(iter.size_hint(), (5, Some(5)));
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(Vec::from_iter(iter), vec![1, 2, 3]);
    }

    #[test]
    fn test_nodes() {
        let list = List::from_iter(0..4);
        let forward: Vec<i32> = list
            .nodes()
            .map(|cell| unsafe { *cell.as_ref().value() })
            .collect();
        assert_eq!(forward, vec![0, 1, 2, 3]);

        let backward: Vec<i32> = list
            .reversed_nodes()
            .map(|cell| unsafe { *cell.as_ref().value() })
            .collect();
        assert_eq!(backward, vec![3, 2, 1, 0]);

        assert!(List::<i32>::new().nodes().next().is_none());
        assert!(List::<i32>::new().reversed_nodes().next().is_none());
    }

    #[test]
    fn test_entries() {
        let list = List::from_iter('a'..='c');
        let entries: Vec<_> = list.entries().collect();
        assert_eq!(entries, vec![(0, &'a'), (1, &'b'), (2, &'c')]);
        assert!(List::<char>::new().entries().next().is_none());
    }

    #[test]
    #[should_panic(expected = "List is corrupted")]
    fn test_entries_corruption_guard() {
        use std::mem::ManuallyDrop;

        // The cyclic chain must not be dropped during unwinding, so the
        // list is leaked deliberately.
        let list = ManuallyDrop::new(List::from_iter(0..3));
        let head = list.node_at(0).unwrap();
        let tail = list.node_at(-1).unwrap();
        // Bend the tail's forward link back to the head, forming a cycle.
        unsafe { (*tail.as_ptr()).set_forward(Some(head)) };

        // The guard must fire within `len + 1` steps instead of spinning.
        let mut entries = list.entries();
        for _ in 0..=list.len() {
            let _ = entries.next();
        }
    }
}
