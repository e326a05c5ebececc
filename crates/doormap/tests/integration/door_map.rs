// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use doormap::{internal::ValidationError, Door, DoorMap, Promise};
use doormap_test_utils::{
    eq_props::{assert_eq_props, assert_ne_props},
    test_item::{key1_door, key2_door, key3_door, TestItem},
};
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug, Eq, PartialEq)]
struct Letter {
    lowercase: char,
    uppercase: char,
}

fn letter(lowercase: char, uppercase: char) -> Letter {
    Letter { lowercase, uppercase }
}

fn letter_doors() -> Vec<Door<Letter>> {
    vec![
        Door::named("lowercase", |l: &Letter| l.lowercase),
        Door::named("uppercase", |l: &Letter| l.uppercase),
    ]
}

#[test]
fn test_lowercase_uppercase_scenario() {
    let map = DoorMap::new(letter_doors());

    let map = map.insert(letter('b', 'B'));
    let map = map.insert(letter('a', 'A'));
    assert_eq!(map.len(), 2);

    // Rejected: lowercase collision with ('b', 'B').
    let map = map.insert(letter('b', 'C'));
    assert_eq!(map.len(), 2);

    // Rejected: uppercase collision with ('a', 'A').
    let map = map.insert(letter('c', 'A'));
    assert_eq!(map.len(), 2);

    let map = map.insert(letter('c', 'C'));
    assert_eq!(map.len(), 3);
    map.validate().expect("map is valid");

    assert_eq!(
        map.iter().cloned().collect::<Vec<_>>(),
        vec![letter('c', 'C'), letter('a', 'A'), letter('b', 'B')],
        "items are most recent first"
    );
    assert_eq!(
        map.get_by(|l: &Letter| l.uppercase, &'B'),
        Some(&letter('b', 'B'))
    );
    assert_eq!(map.get_by(|l: &Letter| l.lowercase, &'d'), None);
}

#[test]
fn test_insert_conflict_is_noop() {
    let map = DoorMap::from_items(
        vec![key1_door(), key2_door()],
        [TestItem::new(1, 'a', "x", "v"), TestItem::new(2, 'b', "y", "v")],
    );

    for conflicting in [
        // key1 only.
        TestItem::new(1, 'c', "z", "w"),
        // key2 only.
        TestItem::new(3, 'b', "z", "w"),
        // Both keys, against different items.
        TestItem::new(2, 'a', "z", "w"),
    ] {
        let after = map.insert(conflicting.clone());
        assert_eq!(after, map, "insert of {conflicting:?} is a no-op");
        assert_eq!(
            after.iter().collect::<Vec<_>>(),
            map.iter().collect::<Vec<_>>(),
            "order is unchanged too"
        );
    }

    // key3 isn't a door, so sharing it is fine.
    let after = map.insert(TestItem::new(3, 'c', "x", "v"));
    assert_eq!(after.len(), 3);
    after.validate().expect("map is valid");
}

#[test]
fn test_insert_duplicate_is_idempotent() {
    let item = TestItem::new(1, 'a', "x", "v");
    let map = DoorMap::new(vec![key3_door()]);

    let once = map.insert(item.clone());
    let twice = once.insert(item.clone());
    assert_eq!(once.len(), 1);
    assert_eq_props(&once, &twice);
}

#[test]
fn test_no_doors_allow_anything() {
    let item = TestItem::new(1, 'a', "x", "v");
    let map = DoorMap::new(Vec::new())
        .insert(item.clone())
        .insert(item.clone());
    assert_eq!(map.len(), 2);
    map.validate().expect("map is valid");
}

#[test]
fn test_from_items_first_wins() {
    let a = TestItem::new(1, 'a', "x", "first");
    let b = TestItem::new(1, 'b', "y", "second");

    let map = DoorMap::from_items(vec![key1_door()], [a.clone(), b.clone()]);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get_by(|item: &TestItem| item.key1, &1u8), Some(&a));
    assert!(!map.contains_by(|item: &TestItem| item.key2, &'b'));

    // The same result as inserting one at a time.
    let stepwise = DoorMap::new(vec![key1_door()]).insert(a).insert(b);
    assert_eq_props(&map, &stepwise);
}

#[test]
fn test_try_insert() {
    let map = DoorMap::new(vec![key1_door(), key2_door(), key3_door()]);

    let v1 = TestItem::new(20, 'a', "x", "v");
    let map = map.try_insert(v1.clone()).unwrap();

    // An exact duplicate is an error, and v1 is reported once even though it
    // collides on all three doors.
    let error = map.try_insert(v1.clone()).unwrap_err();
    assert_eq!(error.new_item(), &v1);
    assert_eq!(error.duplicates(), vec![&v1]);

    let v2 = TestItem::new(5, 'b', "y", "v");
    let map = map.try_insert(v2.clone()).unwrap();

    // v3 collides with v1 on key1 and with v2 on key3. Duplicates are most
    // recent first.
    let v3 = TestItem::new(20, 'c', "y", "v");
    let error = map.try_insert(v3.clone()).unwrap_err();
    assert_eq!(error.new_item(), &v3);
    assert_eq!(error.duplicates(), vec![&v2, &v1]);
    assert_eq!(
        error.to_string(),
        format!("new item: {:?} conflicts with existing: {:?}", v3, [&v2, &v1]),
    );

    let owned = error.into_owned();
    let (new, duplicates) = owned.into_parts();
    assert_eq!(new, v3);
    assert_eq!(duplicates, vec![v2.clone(), v1.clone()]);

    // The failed insert didn't change the map, and insert agrees with
    // try_insert.
    assert_eq!(map.len(), 2);
    assert_eq!(map.insert(v3), map);
}

#[test]
fn test_get_by_non_door_returns_most_recent() {
    let older = TestItem::new(1, 'a', "shared", "older");
    let newer = TestItem::new(2, 'b', "shared", "newer");
    let map =
        DoorMap::from_items(vec![key1_door()], [older.clone(), newer.clone()]);

    assert_eq!(
        map.get_by(|item: &TestItem| item.key3.clone(), "shared"),
        Some(&newer)
    );
    assert_eq!(map.get_by(|item: &TestItem| item.key1, &1u8), Some(&older));
    assert_eq!(map.get_by(|item: &TestItem| item.key3.clone(), "none"), None);
}

#[test]
fn test_remove_by() {
    let v1 = TestItem::new(1, 'a', "shared", "v");
    let v2 = TestItem::new(2, 'b', "shared", "v");
    let v3 = TestItem::new(3, 'c', "other", "v");
    let map = DoorMap::from_items(
        vec![key1_door()],
        [v1.clone(), v2.clone(), v3.clone()],
    );

    // Removing by a door removes at most one item.
    let removed = map.remove_by(|item: &TestItem| item.key1, &2u8);
    removed.validate().expect("map is valid");
    assert_eq!(removed.len(), 2);
    assert_eq!(removed.iter().collect::<Vec<_>>(), vec![&v3, &v1]);

    // Removing by a projection that isn't a door removes every match.
    let removed = map.remove_by(|item: &TestItem| item.key3.clone(), "shared");
    removed.validate().expect("map is valid");
    assert_eq!(removed.iter().collect::<Vec<_>>(), vec![&v3]);

    // Removing an absent key gives an equal map.
    let removed = map.remove_by(|item: &TestItem| item.key1, &9u8);
    assert_eq!(removed.len(), 3);
    assert_eq_props(&removed, &map);

    // The original map is untouched throughout.
    assert_eq!(map.iter().collect::<Vec<_>>(), vec![&v3, &v2, &v1]);

    // Removal frees the key for a later insert.
    let map = map
        .remove_by(|item: &TestItem| item.key1, &1u8)
        .insert(TestItem::new(1, 'z', "new", "v"));
    assert_eq!(map.len(), 3);
    map.validate().expect("map is valid");
}

#[test]
fn test_union_prefers_preferred() {
    let preferred = DoorMap::from_items(
        vec![key1_door()],
        [
            TestItem::new(1, 'a', "x", "preferred"),
            TestItem::new(2, 'b', "y", "v"),
        ],
    );
    let to_insert = DoorMap::from_items(
        vec![key2_door()],
        [
            TestItem::new(1, 'a', "x", "inserted"),
            TestItem::new(3, 'd', "z", "v"),
        ],
    );

    let union = DoorMap::union(&to_insert, &preferred);
    union.validate().expect("union is valid");
    assert_eq!(union.len(), 3);
    assert_eq!(
        union.get_by(|item: &TestItem| item.key1, &1u8).unwrap().value,
        "preferred"
    );
    assert!(union.contains_by(|item: &TestItem| item.key1, &3u8));

    // The union keeps the preferred map's doors.
    assert_eq!(union.doors().len(), 1);
    assert_eq!(union.doors()[0].name(), Some("key1"));

    // Swapping the arguments flips the winner. The item from `preferred` now
    // collides on key2.
    let union = DoorMap::union(&preferred, &to_insert);
    assert_eq!(
        union.get_by(|item: &TestItem| item.key1, &1u8).unwrap().value,
        "inserted"
    );
}

#[test]
fn test_eq_ignores_order_and_doors() {
    let a = letter('a', 'A');
    let b = letter('b', 'B');

    let mut doors = letter_doors();
    let map1 = DoorMap::from_items(doors.clone(), [a.clone(), b.clone()]);
    doors.reverse();
    let map2 = DoorMap::from_items(doors, [b.clone(), a.clone()]);
    assert_eq_props(&map1, &map2);

    // Doors aren't compared at all.
    let map3 = DoorMap::from_items(Vec::new(), [a.clone(), b.clone()]);
    assert_eq_props(&map1, &map3);
}

// Test various conditions for non-equality.
#[test]
fn test_permutation_eq_examples() {
    let doors = || vec![key1_door(), key2_door(), key3_door()];
    let map1 = DoorMap::new(doors());
    let map2 = DoorMap::new(doors());

    // Two empty maps are equal.
    assert_eq_props(&map1, &map2);

    let item = TestItem::new(0, 'a', "x", "v");
    let map1 = map1.insert(item.clone());

    // The maps are not equal.
    assert_ne_props(&map1, &map2);

    // Insert the same item into the other map.
    let map2 = map2.insert(item.clone());
    assert_eq_props(&map1, &map2);

    for (item1, item2) in [
        // Different key1.
        (TestItem::new(1, 'b', "y", "v"), TestItem::new(2, 'b', "y", "v")),
        // Different key2.
        (TestItem::new(1, 'b', "y", "v"), TestItem::new(1, 'c', "y", "v")),
        // Different key3.
        (TestItem::new(1, 'b', "y", "v"), TestItem::new(1, 'b', "z", "v")),
        // Same keys, different value.
        (TestItem::new(1, 'b', "y", "w"), TestItem::new(1, 'b', "y", "x")),
    ] {
        assert_ne_props(&map1.insert(item1), &map2.insert(item2));
    }

    // Multiplicity matters when there are no doors.
    let bag1 = DoorMap::from_items(Vec::new(), [item.clone(), item.clone()]);
    let other = TestItem::new(9, 'z', "z", "z");
    let bag2 = DoorMap::from_items(Vec::new(), [item.clone(), other]);
    assert_ne_props(&bag1, &bag2);
}

#[test]
fn test_to_map_prefers_least_recent() {
    // Both items share key2, which isn't a door.
    let older = TestItem::new(1, 'a', "x", "older");
    let newer = TestItem::new(2, 'a', "y", "newer");
    let map =
        DoorMap::from_items(vec![key1_door()], [older.clone(), newer.clone()]);

    let hash_map: HashMap<char, String> =
        map.to_map(|item| item.key2, |item| item.value.clone());
    assert_eq!(hash_map.len(), 1);
    assert_eq!(hash_map[&'a'], "older");

    let btree_map: BTreeMap<u8, String> =
        map.to_map(|item| item.key1, |item| item.value.clone());
    assert_eq!(
        btree_map,
        BTreeMap::from([(1, "older".to_string()), (2, "newer".to_string())])
    );

    // Lookups go the other way.
    assert_eq!(map.get_by(|item: &TestItem| item.key2, &'a'), Some(&newer));
}

#[test]
fn test_fold_is_most_recent_first() {
    let map = DoorMap::from_items(
        vec![key1_door()],
        (0..5).map(|i| TestItem::new(i, 'a', "x", "v")),
    );
    let keys = map.fold(Vec::new(), |mut acc, item| {
        acc.push(item.key1);
        acc
    });
    assert_eq!(keys, vec![4, 3, 2, 1, 0]);
    assert_eq!(map.fold(0u32, |acc, item| acc + u32::from(item.key1)), 10);
}

#[test]
fn test_map_order_and_tie_break() {
    let map = DoorMap::from_items(
        vec![key1_door()],
        [
            TestItem::new(1, 'a', "x", "v1"),
            TestItem::new(2, 'b', "y", "v2"),
            TestItem::new(3, 'a', "z", "v3"),
        ],
    );
    let mapped = map.map(
        |item| (item.key2, item.value.clone()),
        [Door::new(|(key2, _): &(char, String)| *key2)],
    );
    mapped.validate().expect("mapped map is valid");

    // Items were inserted most recent first, so among the two items with
    // key2 = 'a', the more recent one (v3) won. The mapped map lists items in
    // the opposite order from the source.
    assert_eq!(
        mapped.iter().cloned().collect::<Vec<_>>(),
        vec![('b', "v2".to_string()), ('a', "v3".to_string())]
    );

    // Mapping is the same as rebuilding from the transformed items in
    // iteration order.
    let rebuilt = DoorMap::from_items(
        [Door::new(|(key2, _): &(char, String)| *key2)],
        map.iter().map(|item| (item.key2, item.value.clone())),
    );
    assert!(mapped.iter().eq(rebuilt.iter()));

    // An identity map with the same doors is equal to the source.
    let identity = map.map(TestItem::clone, map.doors().to_vec());
    assert_eq_props(&identity, &map);
}

#[test]
fn test_old_versions_are_unchanged() {
    let v0 = DoorMap::new(vec![key1_door()]);
    let v1 = v0.insert(TestItem::new(1, 'a', "x", "v"));
    let v2 = v1.insert(TestItem::new(2, 'b', "y", "v"));
    let v3 = v2.remove_by(|item: &TestItem| item.key1, &1u8);
    let v4 = DoorMap::union(&v1, &v3);

    assert_eq!(v0.len(), 0);
    assert!(v0.is_empty());
    assert_eq!(v1.len(), 1);
    assert_eq!(v2.len(), 2);
    assert_eq!(v3.len(), 1);
    assert_eq!(v4.len(), 2);
    assert!(v2.contains_by(|item: &TestItem| item.key1, &1u8));
    assert!(!v3.contains_by(|item: &TestItem| item.key1, &1u8));
}

#[test]
fn test_custom_promise() {
    struct SameParity;

    impl Promise<u32> for SameParity {
        fn violates(&self, a: &u32, b: &u32) -> bool {
            a % 2 == b % 2
        }
    }

    let map = DoorMap::from_items([Door::from_promise(SameParity)], 1u32..10);
    assert_eq!(map.iter().copied().collect::<Vec<_>>(), vec![2, 1]);
    map.validate().expect("map is valid");
}

#[test]
fn test_validate_reports_collisions() {
    // Build a map whose door changes its mind after insertion, to check that
    // validate notices.
    use std::sync::atomic::{AtomicBool, Ordering};
    static STRICT: AtomicBool = AtomicBool::new(false);

    struct Flaky;

    impl Promise<u32> for Flaky {
        fn violates(&self, _: &u32, _: &u32) -> bool {
            STRICT.load(Ordering::SeqCst)
        }
    }

    let map = DoorMap::from_items([Door::from_promise(Flaky)], [1, 2]);
    assert_eq!(map.len(), 2);
    map.validate().expect("map is valid");

    STRICT.store(true, Ordering::SeqCst);
    let error = map.validate().unwrap_err();
    assert!(
        matches!(error, ValidationError::Collision { door: 0, items: (0, 1) }),
        "unexpected error: {error:?}"
    );
    assert_eq!(error.to_string(), "items at 0 and 1 collide on door 0");
}

#[test]
fn test_iter() {
    let map = DoorMap::from_items(
        vec![key1_door()],
        (0..3).map(|i| TestItem::new(i, 'a', "x", "v")),
    );
    let mut iter = map.iter();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next().map(|item| item.key1), Some(2));
    assert_eq!(iter.size_hint(), (2, Some(2)));
    assert_eq!(iter.by_ref().count(), 2);
    assert_eq!(iter.next(), None);

    let via_into_iter: Vec<u8> = (&map).into_iter().map(|i| i.key1).collect();
    assert_eq!(via_into_iter, vec![2, 1, 0]);
}

#[test]
fn test_debug() {
    let map = DoorMap::from_items(
        vec![key1_door(), Door::new(|item: &TestItem| item.key2)],
        [TestItem::new(1, 'a', "x", "v")],
    );
    assert_eq!(
        format!("{map:?}"),
        "DoorMap { doors: [Door(key1), Door(_)], items: [TestItem { key1: 1, \
         key2: 'a', key3: \"x\", value: \"v\" }] }"
    );
}

#[test]
fn test_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DoorMap<TestItem>>();
    assert_send_sync::<Door<TestItem>>();

    // Maps can be shared across threads, and each thread derives its own
    // versions.
    let map = DoorMap::new(vec![key1_door()]);
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let map = map.clone();
            std::thread::spawn(move || {
                map.insert(TestItem::new(i, 'a', "x", "v"))
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().len(), 1);
    }
    assert!(map.is_empty());
}

#[cfg(feature = "serde")]
mod serde_tests {
    use doormap::{DoorMap, DoorMapSeed};
    use doormap_test_utils::{
        serde_utils::assert_serialize_roundtrip,
        test_item::{key1_door, TestItem, UniqueConstraint},
    };
    use serde::de::DeserializeSeed;
    use test_strategy::proptest;

    #[proptest]
    fn proptest_serialize_roundtrip(
        constraint: UniqueConstraint,
        values: Vec<TestItem>,
    ) {
        assert_serialize_roundtrip(constraint, values);
    }

    #[test]
    fn test_decode_drops_later_duplicates() {
        let json = r#"[
            {"key1": 1, "key2": "a", "key3": "x", "value": "first"},
            {"key1": 1, "key2": "b", "key3": "y", "value": "second"},
            {"key1": 2, "key2": "c", "key3": "z", "value": "third"}
        ]"#;
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let map = DoorMapSeed::new(vec![key1_door()])
            .deserialize(&mut deserializer)
            .unwrap();
        deserializer.end().unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get_by(|item: &TestItem| item.key1, &1u8).unwrap().value,
            "first"
        );
    }

    #[test]
    fn test_decode_failure_fails_whole_map() {
        // The second item is missing key2.
        let json = r#"[
            {"key1": 1, "key2": "a", "key3": "x", "value": "v"},
            {"key1": 2, "key3": "y", "value": "v"}
        ]"#;
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let error = DoorMap::<TestItem>::deserialize_with(
            vec![key1_door()],
            &mut deserializer,
        )
        .unwrap_err();
        assert!(
            error.to_string().contains("missing field `key2`"),
            "unexpected error: {error}"
        );

        // Not a list at all.
        let mut deserializer =
            serde_json::Deserializer::from_str(r#"{"key1": 1}"#);
        let error = DoorMap::<TestItem>::deserialize_with(
            vec![key1_door()],
            &mut deserializer,
        )
        .unwrap_err();
        assert!(
            error.to_string().contains("a sequence of items for a DoorMap"),
            "unexpected error: {error}"
        );
    }

    #[test]
    fn test_roundtrip_reverses_order() {
        let map = DoorMap::from_items(
            UniqueConstraint::Key1.doors(),
            (0..3).map(|i| TestItem::new(i, 'a', "x", "v")),
        );
        let json = serde_json::to_string(&map).unwrap();
        let mut deserializer = serde_json::Deserializer::from_str(&json);
        let decoded = DoorMap::deserialize_with(
            UniqueConstraint::Key1.doors(),
            &mut deserializer,
        )
        .unwrap();

        assert_eq!(decoded, map);
        let keys: Vec<u8> = decoded.iter().map(|item| item.key1).collect();
        assert_eq!(keys, vec![0, 1, 2]);
    }
}
