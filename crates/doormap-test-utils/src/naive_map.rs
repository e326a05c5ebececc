// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::test_item::{TestItem, UniqueConstraint};
use doormap::errors::DuplicateItem;

/// A naive, inefficient map that acts as an oracle for property-based tests.
///
/// This map is stored as a vector in insertion order, and performs linear
/// scans from the back so that it reports items most-recent-first.
#[derive(Clone, Debug)]
pub struct NaiveMap {
    items: Vec<TestItem>,
    unique_constraint: UniqueConstraint,
}

impl NaiveMap {
    pub fn new(unique_constraint: UniqueConstraint) -> Self {
        Self { items: Vec::new(), unique_constraint }
    }

    pub fn new_key1() -> Self {
        Self::new(UniqueConstraint::Key1)
    }

    pub fn new_key12() -> Self {
        Self::new(UniqueConstraint::Key12)
    }

    pub fn new_key123() -> Self {
        Self::new(UniqueConstraint::Key123)
    }

    pub fn unique_constraint(&self) -> UniqueConstraint {
        self.unique_constraint
    }

    /// Inserts `item` unless it conflicts with an existing item. Returns true
    /// if it was inserted.
    pub fn insert(&mut self, item: TestItem) -> bool {
        let conflict =
            self.items.iter().any(|e| self.unique_constraint.matches(&item, e));
        if !conflict {
            self.items.push(item);
        }
        !conflict
    }

    pub fn try_insert(
        &mut self,
        item: TestItem,
    ) -> Result<(), DuplicateItem<TestItem, &TestItem>> {
        // Cannot store the duplicates directly here because of borrow checker
        // issues. Instead, we store indexes and then map them to items.
        let dup_indexes = self
            .items
            .iter()
            .enumerate()
            .rev()
            .filter_map(|(i, e)| {
                self.unique_constraint.matches(&item, e).then_some(i)
            })
            .collect::<Vec<_>>();

        if dup_indexes.is_empty() {
            self.items.push(item);
            Ok(())
        } else {
            Err(DuplicateItem::__internal_new(
                item,
                dup_indexes.iter().map(|&i| &self.items[i]).collect(),
            ))
        }
    }

    pub fn get1(&self, key1: u8) -> Option<&TestItem> {
        self.iter().find(|e| e.key1 == key1)
    }

    pub fn get2(&self, key2: char) -> Option<&TestItem> {
        self.iter().find(|e| e.key2 == key2)
    }

    pub fn get3(&self, key3: &str) -> Option<&TestItem> {
        self.iter().find(|e| e.key3 == key3)
    }

    /// Removes every item with this `key1`.
    pub fn remove1(&mut self, key1: u8) {
        self.items.retain(|e| e.key1 != key1);
    }

    /// Removes every item with this `key2`.
    pub fn remove2(&mut self, key2: char) {
        self.items.retain(|e| e.key2 != key2);
    }

    /// Removes every item with this `key3`.
    pub fn remove3(&mut self, key3: &str) {
        self.items.retain(|e| e.key3 != key3);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over items, most recently inserted first.
    pub fn iter(&self) -> impl Iterator<Item = &TestItem> {
        self.items.iter().rev()
    }
}
