// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A persistent singly-linked list with shared tails.

use alloc::{sync::Arc, vec::Vec};
use core::iter::FusedIterator;
use derive_where::derive_where;

/// An immutable list whose tails are shared between versions.
///
/// Pushing to the front is O(1) and leaves every existing handle to the list
/// untouched. This is the storage behind `DoorMap`, which keeps items in
/// most-recent-first order.
#[derive_where(Clone, Default)]
pub(crate) struct ConsList<T> {
    head: Option<Arc<Node<T>>>,
}

struct Node<T> {
    item: T,
    next: ConsList<T>,
}

impl<T> ConsList<T> {
    #[inline]
    pub(crate) fn new() -> Self {
        Self { head: None }
    }

    /// Returns a new list with `item` at the front.
    #[inline]
    pub(crate) fn push_front(&self, item: T) -> Self {
        Self { head: Some(Arc::new(Node { item, next: self.clone() })) }
    }

    #[inline]
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter { next: self.head.as_deref() }
    }

    /// Returns true if both lists are the same allocation (or both empty).
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Returns a list without the items for which `keep` is false.
    ///
    /// Items before the last removed one are cloned into fresh nodes. The
    /// tail after it is shared with `self`. Returns `None` if nothing was
    /// removed.
    pub(crate) fn filter<F>(&self, mut keep: F) -> Option<(Self, usize)>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        let mut prefix = Vec::new();
        let mut kept_since_removal = Vec::new();
        let mut shared_tail = None;
        let mut removed = 0;

        let mut cursor = self;
        while let Some(node) = cursor.head.as_deref() {
            if keep(&node.item) {
                kept_since_removal.push(&node.item);
            } else {
                prefix.append(&mut kept_since_removal);
                removed += 1;
                shared_tail = Some(&node.next);
            }
            cursor = &node.next;
        }

        let mut list = shared_tail?.clone();
        for item in prefix.into_iter().rev() {
            list = list.push_front(item.clone());
        }
        Some((list, removed))
    }
}

impl<T> Drop for ConsList<T> {
    fn drop(&mut self) {
        // Unlink uniquely owned nodes one at a time, so that dropping a long
        // list doesn't recurse once per node.
        let mut head = self.head.take();
        while let Some(node) = head {
            match Arc::try_unwrap(node) {
                Ok(mut node) => head = node.next.head.take(),
                Err(_) => break,
            }
        }
    }
}

/// Iterator over a [`ConsList`], front to back.
#[derive_where(Clone)]
pub(crate) struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.head.as_deref();
        Some(&node.item)
    }
}

impl<T> FusedIterator for Iter<'_, T> {}
