//! A fully-safe rendition of the chain, with no raw pointers and no
//! `unsafe`.
//!
//! Each cell is owned by exactly two [`StaticRc`] halves of one allocation:
//! the predecessor's `forward` link (or the list's `head`) and the
//! successor's `backward` link (or the list's `tail`). Rejoining the halves
//! gives the allocation back, so removal is a compile-time-checked handover
//! instead of a `Box::from_raw`. Interior mutability goes through a
//! [`GhostCell`] token, which plays the role the borrow checker plays for
//! the raw-pointer chain.

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use std::ops::Deref;

pub struct List<'id, T> {
    head: Option<CellPtr<'id, T>>,
    tail: Option<CellPtr<'id, T>>,
    len: usize,
}

struct Cell<'id, T> {
    forward: Option<CellPtr<'id, T>>,
    backward: Option<CellPtr<'id, T>>,
    value: T,
}

type CellPtr<'id, T> = Half<GhostCell<'id, Cell<'id, T>>>;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

impl<'id, T> Cell<'id, T> {
    fn new(value: T) -> Self {
        Self {
            forward: None,
            backward: None,
            value,
        }
    }
}

impl<'id, T> Default for List<'id, T> {
    fn default() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }
}

impl<'id, T> List<'id, T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn front<'a>(&'a self, token: &'a GhostToken<'id>) -> Option<&'a T> {
        self.head
            .as_ref()
            .map(|cell| &cell.deref().borrow(token).value)
    }

    pub fn back<'a>(&'a self, token: &'a GhostToken<'id>) -> Option<&'a T> {
        self.tail
            .as_ref()
            .map(|cell| &cell.deref().borrow(token).value)
    }

    pub fn push_back(&mut self, value: T, token: &mut GhostToken<'id>) -> usize {
        let (forward_half, backward_half) =
            Full::split(Full::new(GhostCell::new(Cell::new(value))));
        match self.tail.take() {
            Some(old_tail) => {
                old_tail.deref().borrow_mut(token).forward = Some(forward_half);
                backward_half.deref().borrow_mut(token).backward = Some(old_tail);
            }
            None => self.head = Some(forward_half),
        }
        self.tail = Some(backward_half);
        self.len += 1;
        self.len
    }

    pub fn push_front(&mut self, value: T, token: &mut GhostToken<'id>) -> usize {
        let (forward_half, backward_half) =
            Full::split(Full::new(GhostCell::new(Cell::new(value))));
        match self.head.take() {
            Some(old_head) => {
                old_head.deref().borrow_mut(token).backward = Some(backward_half);
                forward_half.deref().borrow_mut(token).forward = Some(old_head);
            }
            None => self.tail = Some(backward_half),
        }
        self.head = Some(forward_half);
        self.len += 1;
        self.len
    }

    pub fn pop_back(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        let tail_half = self.tail.take()?;
        let other_half = match tail_half.deref().borrow_mut(token).backward.take() {
            Some(prev) => {
                let half = prev.deref().borrow_mut(token).forward.take().unwrap();
                self.tail = Some(prev);
                half
            }
            // sole cell
            None => self.head.take().unwrap(),
        };
        self.len -= 1;
        Some(
            Full::into_box(Full::join(other_half, tail_half))
                .into_inner()
                .value,
        )
    }

    pub fn pop_front(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        let head_half = self.head.take()?;
        let other_half = match head_half.deref().borrow_mut(token).forward.take() {
            Some(next) => {
                let half = next.deref().borrow_mut(token).backward.take().unwrap();
                self.head = Some(next);
                half
            }
            // sole cell
            None => self.tail.take().unwrap(),
        };
        self.len -= 1;
        Some(
            Full::into_box(Full::join(head_half, other_half))
                .into_inner()
                .value,
        )
    }

    /// Drains the list into a `Vec`, front to back.
    pub fn into_values(mut self, token: &mut GhostToken<'id>) -> Vec<T> {
        let mut values = Vec::with_capacity(self.len);
        while let Some(value) = self.pop_front(token) {
            values.push(value);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use crate::experiments::List;
    use ghost_cell::GhostToken;

    #[test]
    fn list_push_pop() {
        GhostToken::new(|mut token| {
            let mut list = List::new();
            assert!(list.is_empty());
            list.push_front(1, &mut token);
            list.push_back(2, &mut token);
            assert!(!list.is_empty());
            assert_eq!(list.pop_back(&mut token), Some(2));
            assert_eq!(list.pop_front(&mut token), Some(1));
            assert!(list.is_empty());
        })
    }

    #[test]
    fn list_len_and_peek() {
        GhostToken::new(|mut token| {
            let mut list = List::new();
            assert_eq!(list.len(), 0);
            assert_eq!(list.push_back(10, &mut token), 1);
            assert_eq!(list.push_back(20, &mut token), 2);
            assert_eq!(list.push_front(5, &mut token), 3);
            assert_eq!(list.front(&token), Some(&5));
            assert_eq!(list.back(&token), Some(&20));
            assert_eq!(list.pop_front(&mut token), Some(5));
            assert_eq!(list.len(), 2);
        })
    }

    #[test]
    fn list_into_values() {
        GhostToken::new(|mut token| {
            let mut list = List::new();
            for v in 0..5 {
                list.push_back(v, &mut token);
            }
            assert_eq!(list.into_values(&mut token), vec![0, 1, 2, 3, 4]);
        })
    }
}
