// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::Iter;
use crate::{
    errors::DuplicateItem,
    internal::ValidationError,
    support::{cons_list::ConsList, list_diff},
    Door,
};
use alloc::{format, sync::Arc, vec::Vec};
use core::fmt;
use derive_where::derive_where;
use equivalent::Equivalent;

/// A persistent collection where every item can be found through several
/// unique doors.
///
/// Each [`Door`] promises that some view of the items is unique. Every
/// operation returns a new `DoorMap` and leaves `self` untouched. Versions
/// share their storage, so cloning is O(1) and deriving a new version only
/// copies what changed.
///
/// Items are kept in most-recent-first order. This order is visible through
/// [`iter`](Self::iter) and [`fold`](Self::fold), but is not part of the
/// map's identity: two maps are equal if they hold the same items, in any
/// order.
///
/// Lookups are linear scans.
///
/// # Examples
///
/// ```
/// use doormap::{Door, DoorMap};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Letter {
///     lower: char,
///     upper: char,
/// }
///
/// let map = DoorMap::new([
///     Door::named("lower", |l: &Letter| l.lower),
///     Door::named("upper", |l: &Letter| l.upper),
/// ]);
///
/// let map = map
///     .insert(Letter { lower: 'b', upper: 'B' })
///     .insert(Letter { lower: 'a', upper: 'A' })
///     // Rejected: 'b' is already taken.
///     .insert(Letter { lower: 'b', upper: 'C' });
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(
///     map.get_by(|l: &Letter| l.upper, &'B'),
///     Some(&Letter { lower: 'b', upper: 'B' }),
/// );
/// ```
#[derive_where(Clone)]
pub struct DoorMap<T> {
    doors: Arc<[Door<T>]>,
    // Invariant: no door is violated by any item and any item inserted
    // before it.
    items: ConsList<T>,
    len: usize,
}

impl<T> DoorMap<T> {
    /// Creates an empty map guarded by `doors`.
    ///
    /// The doors are fixed for the lifetime of this map and every map derived
    /// from it, except through [`map`](Self::map).
    pub fn new<I>(doors: I) -> Self
    where
        I: IntoIterator<Item = Door<T>>,
    {
        Self {
            doors: doors.into_iter().collect(),
            items: ConsList::new(),
            len: 0,
        }
    }

    /// Creates a map by inserting `items` in order.
    ///
    /// If several items collide on a door, the earliest one wins and the
    /// later ones are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use doormap::{Door, DoorMap};
    ///
    /// let map = DoorMap::from_items(
    ///     [Door::new(|(k, _): &(u8, char)| *k)],
    ///     [(1, 'a'), (1, 'b'), (2, 'c')],
    /// );
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get_by(|(k, _)| *k, &1u8), Some(&(1, 'a')));
    /// ```
    pub fn from_items<D, I>(doors: D, items: I) -> Self
    where
        D: IntoIterator<Item = Door<T>>,
        I: IntoIterator<Item = T>,
    {
        let mut map = Self::new(doors);
        for item in items {
            map.absorb(item);
        }
        map
    }

    /// Returns the doors guarding this map, in the order they were supplied.
    #[inline]
    pub fn doors(&self) -> &[Door<T>] {
        &self.doors
    }

    /// Returns true if the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of items in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Iterates over the items, most recently inserted first.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.items.iter(), self.len)
    }

    /// Checks the invariants of the map.
    ///
    /// The code below always upholds these invariants, but it's useful to have
    /// an explicit check for tests.
    #[doc(hidden)]
    pub fn validate(&self) -> Result<(), ValidationError> {
        let items: Vec<&T> = self.items.iter().collect();
        if items.len() != self.len {
            return Err(ValidationError::general(format!(
                "stored length {} doesn't match actual length {}",
                self.len,
                items.len(),
            )));
        }

        // Each item was checked against everything inserted before it, which
        // is everything after it in most-recent-first order.
        for (i, newer) in items.iter().enumerate() {
            for (j, older) in items.iter().enumerate().skip(i + 1) {
                for (door, d) in self.doors.iter().enumerate() {
                    if d.violates(newer, older) {
                        return Err(ValidationError::Collision {
                            door,
                            items: (i, j),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Returns a map with `item` added, or an unchanged copy of this map if
    /// `item` collides with a stored item on any door.
    ///
    /// A collision is not an error: use [`try_insert`](Self::try_insert) to
    /// find out about it.
    #[must_use]
    pub fn insert(&self, item: T) -> Self {
        let mut map = self.clone();
        map.absorb(item);
        map
    }

    /// Returns a map with `item` added, or an error listing the stored items
    /// that `item` collides with.
    pub fn try_insert(&self, item: T) -> Result<Self, DuplicateItem<T, &T>> {
        // Check for duplicates before building anything, so that the error
        // path doesn't allocate a node.
        let duplicates: Vec<&T> =
            self.items.iter().filter(|e| self.collides(&item, e)).collect();
        if !duplicates.is_empty() {
            return Err(DuplicateItem::__internal_new(item, duplicates));
        }

        Ok(Self {
            doors: self.doors.clone(),
            items: self.items.push_front(item),
            len: self.len + 1,
        })
    }

    /// Returns the most recently inserted item whose projection through
    /// `door` equals `key`.
    ///
    /// `door` doesn't have to be one of the map's doors. If it isn't, several
    /// items may match and only the most recent one is returned.
    pub fn get_by<K, Q, F>(&self, door: F, key: &Q) -> Option<&T>
    where
        F: Fn(&T) -> K,
        Q: ?Sized + Equivalent<K>,
    {
        self.items.iter().find(|item| key.equivalent(&door(item)))
    }

    /// Returns true if some item's projection through `door` equals `key`.
    pub fn contains_by<K, Q, F>(&self, door: F, key: &Q) -> bool
    where
        F: Fn(&T) -> K,
        Q: ?Sized + Equivalent<K>,
    {
        self.get_by(door, key).is_some()
    }

    /// Returns a map without the items whose projection through `door`
    /// equals `key`.
    ///
    /// This is a plain filter: if `door` isn't one of the map's doors,
    /// every matching item is removed. If nothing matches, the result shares
    /// all of its storage with `self`.
    #[must_use]
    pub fn remove_by<K, Q, F>(&self, door: F, key: &Q) -> Self
    where
        T: Clone,
        F: Fn(&T) -> K,
        Q: ?Sized + Equivalent<K>,
    {
        match self.items.filter(|item| !key.equivalent(&door(item))) {
            Some((items, removed)) => Self {
                doors: self.doors.clone(),
                items,
                len: self.len - removed,
            },
            None => self.clone(),
        }
    }

    /// Folds over the items, most recently inserted first.
    ///
    /// The order of items isn't part of the map's identity, so there is no
    /// fold in the other direction.
    pub fn fold<B, F>(&self, init: B, f: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.iter().fold(init, f)
    }

    /// Builds a map of transformed items guarded by new doors.
    ///
    /// Items are transformed and inserted most recently inserted first. So if
    /// two transformed items collide on a new door, the one derived from the
    /// more recent item wins, and the resulting map lists items in the
    /// opposite order from `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use doormap::{Door, DoorMap};
    ///
    /// let map = DoorMap::from_items([Door::new(|n: &u32| *n)], [1, 2, 11]);
    /// // Last digits collide: 11 was inserted after 1, so it wins.
    /// let last_digits = map.map(|n| *n, [Door::new(|n: &u32| *n % 10)]);
    /// assert_eq!(last_digits.iter().copied().collect::<Vec<_>>(), [2, 11]);
    /// ```
    pub fn map<U, F, D>(&self, mut f: F, doors: D) -> DoorMap<U>
    where
        F: FnMut(&T) -> U,
        D: IntoIterator<Item = Door<U>>,
    {
        let mut map = DoorMap::new(doors);
        for item in self {
            map.absorb(f(item));
        }
        map
    }

    /// Inserts every item of `to_insert` into `preferred`.
    ///
    /// On a collision the item already in `preferred` always wins, whichever
    /// map is newer. The result is guarded by `preferred`'s doors.
    ///
    /// # Examples
    ///
    /// ```
    /// use doormap::{Door, DoorMap};
    ///
    /// let doors = || [Door::new(|(k, _): &(char, u32)| *k)];
    /// let old = DoorMap::from_items(doors(), [('a', 1), ('b', 2)]);
    /// let new = DoorMap::from_items(doors(), [('a', 10), ('c', 30)]);
    ///
    /// let merged = DoorMap::union(&new, &old);
    /// assert_eq!(merged.len(), 3);
    /// assert_eq!(merged.get_by(|(k, _)| *k, &'a'), Some(&('a', 1)));
    /// ```
    #[must_use]
    pub fn union(to_insert: &Self, preferred: &Self) -> Self
    where
        T: Clone,
    {
        let mut map = preferred.clone();
        for item in to_insert {
            if !map.collides_with_any(item) {
                map.push(item.clone());
            }
        }
        map
    }

    /// Collects the items into a fresh map, keyed by `key_of`.
    ///
    /// Items are visited most recently inserted first. With collections whose
    /// `Extend` keeps the last value for a key (like `HashMap` and
    /// `BTreeMap`), the *least* recently inserted item decides the value for
    /// a key. This is the opposite of [`get_by`](Self::get_by).
    ///
    /// # Examples
    ///
    /// ```
    /// use doormap::{Door, DoorMap};
    /// use std::collections::BTreeMap;
    ///
    /// let map = DoorMap::from_items(
    ///     [Door::new(|(id, _, _): &(u8, char, u32)| *id)],
    ///     [(1, 'x', 100), (2, 'x', 200)],
    /// );
    ///
    /// let by_char: BTreeMap<char, u32> =
    ///     map.to_map(|(_, c, _)| *c, |(_, _, v)| *v);
    /// // The older item decides the map value...
    /// assert_eq!(by_char[&'x'], 100);
    /// // ...while lookups find the newer one.
    /// assert_eq!(map.get_by(|(_, c, _)| *c, &'x'), Some(&(2, 'x', 200)));
    /// ```
    pub fn to_map<M, K, V, KF, VF>(
        &self,
        mut key_of: KF,
        mut value_of: VF,
    ) -> M
    where
        M: Default + Extend<(K, V)>,
        KF: FnMut(&T) -> K,
        VF: FnMut(&T) -> V,
    {
        let mut map = M::default();
        map.extend(self.iter().map(|item| (key_of(item), value_of(item))));
        map
    }

    /// Adds `item` unless it collides with a stored item. Returns true if it
    /// was added.
    pub(super) fn absorb(&mut self, item: T) -> bool {
        if self.collides_with_any(&item) {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                len = self.len,
                "insert rejected: item collides on a door"
            );
            return false;
        }
        self.push(item);
        true
    }

    fn push(&mut self, item: T) {
        self.items = self.items.push_front(item);
        self.len += 1;
    }

    fn collides_with_any(&self, new: &T) -> bool {
        self.items.iter().any(|existing| self.collides(new, existing))
    }

    fn collides(&self, new: &T, existing: &T) -> bool {
        self.doors.iter().any(|door| door.violates(new, existing))
    }
}

impl<T: fmt::Debug> fmt::Debug for DoorMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoorMap")
            .field("doors", &self.doors)
            .field("items", &self.iter())
            .finish()
    }
}

impl<T: PartialEq> PartialEq for DoorMap<T> {
    fn eq(&self, other: &Self) -> bool {
        // Two maps are equal if they hold the same items, regardless of order
        // or of the doors guarding them. The items aren't necessarily Ord or
        // Hash, so each item of `other` is matched against a remaining item
        // of `self` by a linear scan.
        self.len == other.len
            && (self.items.ptr_eq(&other.items)
                || list_diff::same_items(self, other))
    }
}

// The Eq bound on T ensures that the DoorMap forms an equivalence class.
impl<T: Eq> Eq for DoorMap<T> {}

impl<'a, T> IntoIterator for &'a DoorMap<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
