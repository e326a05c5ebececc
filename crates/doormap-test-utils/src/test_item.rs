// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use doormap::{Door, DoorMap};
use proptest::{prelude::*, sample::SizeRange};
use test_strategy::Arbitrary;

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Arbitrary)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestItem {
    // u8 has only 256 values, increasing the likelihood of collisions in
    // property tests.
    pub key1: u8,
    // char is chosen because the Arbitrary impl for it is biased towards
    // ASCII, increasing the likelihood of collisions.
    pub key2: char,
    // String is a generally open-ended type that probably won't have many
    // collisions.
    pub key3: String,
    pub value: String,
}

impl TestItem {
    pub fn new(
        key1: u8,
        key2: char,
        key3: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self { key1, key2, key3: key3.into(), value: value.into() }
    }
}

impl PartialEq<&TestItem> for TestItem {
    fn eq(&self, other: &&TestItem) -> bool {
        self.key1 == other.key1
            && self.key2 == other.key2
            && self.key3 == other.key3
            && self.value == other.value
    }
}

pub fn key1_door() -> Door<TestItem> {
    Door::named("key1", |item: &TestItem| item.key1)
}

pub fn key2_door() -> Door<TestItem> {
    Door::named("key2", |item: &TestItem| item.key2)
}

pub fn key3_door() -> Door<TestItem> {
    Door::named("key3", |item: &TestItem| item.key3.clone())
}

/// Which keys are promised to be unique.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub enum UniqueConstraint {
    None,
    Key1,
    Key12,
    Key123,
}

impl UniqueConstraint {
    /// Returns the doors implementing this constraint.
    pub fn doors(self) -> Vec<Door<TestItem>> {
        match self {
            UniqueConstraint::None => Vec::new(),
            UniqueConstraint::Key1 => vec![key1_door()],
            UniqueConstraint::Key12 => vec![key1_door(), key2_door()],
            UniqueConstraint::Key123 => {
                vec![key1_door(), key2_door(), key3_door()]
            }
        }
    }

    /// Returns true if `item` and `other` may not be stored together.
    pub fn matches(self, item: &TestItem, other: &TestItem) -> bool {
        match self {
            UniqueConstraint::None => false,
            UniqueConstraint::Key1 => item.key1 == other.key1,
            UniqueConstraint::Key12 => {
                item.key1 == other.key1 || item.key2 == other.key2
            }
            UniqueConstraint::Key123 => {
                item.key1 == other.key1
                    || item.key2 == other.key2
                    || item.key3 == other.key3
            }
        }
    }
}

/// Returns a pair of permutations of a set of items that can be stored
/// together under `constraint`.
pub fn test_item_permutation_strategy(
    constraint: UniqueConstraint,
    size: impl Into<SizeRange>,
) -> impl Strategy<Value = (Vec<TestItem>, Vec<TestItem>)> {
    prop::collection::vec(any::<TestItem>(), size.into()).prop_perturb(
        move |v, mut rng| {
            // It is possible (likely even) that the input vector has
            // duplicates. The easiest way to remove them is to use the
            // logic that already exists to drop them.
            let map = DoorMap::from_items(constraint.doors(), v);
            let set: Vec<_> = map.iter().cloned().collect();

            // Now shuffle the items. This is a simple Fisher-Yates shuffle
            // (Durstenfeld variant, low to high).
            let mut set2 = set.clone();
            if set.len() < 2 {
                return (set, set2);
            }
            for i in 0..set2.len() - 2 {
                let j = rng.random_range(i..set2.len());
                set2.swap(i, j);
            }

            (set, set2)
        },
    )
}
