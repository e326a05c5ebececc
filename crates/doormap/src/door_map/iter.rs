// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::support::cons_list;
use core::{fmt, iter::FusedIterator};
use derive_where::derive_where;

/// An iterator over the items of a [`DoorMap`] by shared reference.
///
/// Created by [`DoorMap::iter`], and ordered most recently inserted first.
///
/// [`DoorMap`]: crate::DoorMap
/// [`DoorMap::iter`]: crate::DoorMap::iter
#[derive_where(Clone)]
pub struct Iter<'a, T> {
    inner: cons_list::Iter<'a, T>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(inner: cons_list::Iter<'a, T>, len: usize) -> Self {
        Self { inner, remaining: len }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining
    }
}

// cons_list::Iter is a FusedIterator, so Iter is as well.
impl<T> FusedIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
