// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serde-related test utilities.

use crate::{
    eq_props::assert_eq_props,
    test_item::{TestItem, UniqueConstraint},
};
use doormap::DoorMap;

fn deserialize_with(
    constraint: UniqueConstraint,
    json: &str,
) -> Result<DoorMap<TestItem>, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let map = DoorMap::deserialize_with(constraint.doors(), &mut deserializer)?;
    deserializer.end()?;
    Ok(map)
}

pub fn assert_serialize_roundtrip(
    constraint: UniqueConstraint,
    values: Vec<TestItem>,
) {
    // Duplicates are quite possible here. They're dropped while building the
    // map, which is also what deserialization does.
    let map = DoorMap::from_items(constraint.doors(), values.clone());

    let serialized = serde_json::to_string(&map).unwrap();

    // The map is serialized as a plain list, most recently inserted first.
    let as_list: Vec<TestItem> = serde_json::from_str(&serialized).unwrap();
    assert_eq!(
        as_list,
        map.iter().cloned().collect::<Vec<_>>(),
        "serialized list is in iteration order"
    );

    let deserialized = deserialize_with(constraint, &serialized).unwrap();
    deserialized.validate().expect("deserialized map is valid");
    assert_eq!(deserialized.len(), map.len(), "lengths match");
    assert_eq_props(&map, &deserialized);

    // Deserializing the original list, duplicates included, gives exactly
    // the map that from_items built, in the same order.
    let serialized = serde_json::to_string(&values).unwrap();
    let from_values = deserialize_with(constraint, &serialized).unwrap();
    from_values.validate().expect("map deserialized from values is valid");
    assert!(
        from_values.iter().eq(map.iter()),
        "deserializing values matches from_items"
    );
}
