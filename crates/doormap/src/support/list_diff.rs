// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Order-independent comparison of two sequences.

use alloc::vec::Vec;

/// Returns true if `a` and `b` hold the same items with the same
/// multiplicities, in any order.
///
/// Each item of `b` removes exactly one equal item (the first one) from what
/// is left of `a`. The comparison fails as soon as an item of `b` has no
/// partner, and succeeds only if nothing of `a` is left over at the end.
///
/// This is O(n * m). Items are only required to be `PartialEq`, so neither
/// sorting nor hashing is available.
pub(crate) fn same_items<'a, T, I, J>(a: I, b: J) -> bool
where
    T: PartialEq + 'a,
    I: IntoIterator<Item = &'a T>,
    J: IntoIterator<Item = &'a T>,
{
    let mut remaining: Vec<&T> = a.into_iter().collect();
    for item in b {
        if !remove_first(&mut remaining, item) {
            return false;
        }
    }
    remaining.is_empty()
}

/// Removes the first element of `items` equal to `target`, preserving the
/// order of the rest. Returns false if there was no such element.
pub(crate) fn remove_first<T: PartialEq>(
    items: &mut Vec<&T>,
    target: &T,
) -> bool {
    match items.iter().position(|item| *item == target) {
        Some(index) => {
            items.remove(index);
            true
        }
        None => false,
    }
}
