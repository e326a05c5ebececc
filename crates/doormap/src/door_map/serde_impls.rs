// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{Door, DoorMap};
use alloc::vec::Vec;
use core::fmt;
use serde_core::{
    de::{DeserializeSeed, SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};

/// A `DoorMap` serializes to the list of its items, most recently inserted
/// first. The doors are not serialized.
///
/// # Examples
///
/// ```
/// use doormap::{Door, DoorMap};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// let map = DoorMap::from_items(
///     [Door::new(|u: &User| u.id)],
///     [
///         User { id: 1, name: "alice".to_string() },
///         User { id: 2, name: "bob".to_string() },
///     ],
/// );
///
/// let serialized = serde_json::to_string(&map).unwrap();
/// assert_eq!(
///     serialized,
///     r#"[{"id":2,"name":"bob"},{"id":1,"name":"alice"}]"#,
/// );
/// ```
impl<T: Serialize> Serialize for DoorMap<T> {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

/// Deserializes a [`DoorMap`] from a list of items, using doors supplied by
/// the caller.
///
/// Doors can't be serialized, so there is no plain `Deserialize` impl for
/// `DoorMap`. Instead, this seed carries fresh doors into the deserializer.
///
/// Items are inserted in list order, exactly like [`DoorMap::from_items`]:
/// an item that collides with an earlier one is dropped. If any item fails
/// to deserialize, the whole map fails to deserialize.
///
/// # Examples
///
/// ```
/// use doormap::{Door, DoorMapSeed};
/// use serde::{de::DeserializeSeed, Deserialize};
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// let json = r#"[{"id":1,"name":"alice"},{"id":1,"name":"alias"}]"#;
/// let mut deserializer = serde_json::Deserializer::from_str(json);
/// let map = DoorMapSeed::new([Door::new(|u: &User| u.id)])
///     .deserialize(&mut deserializer)
///     .unwrap();
/// deserializer.end().unwrap();
///
/// // The second user collides with the first on `id`, so it's dropped.
/// assert_eq!(map.len(), 1);
/// assert_eq!(map.get_by(|u| u.id, &1u32).unwrap().name, "alice");
/// ```
pub struct DoorMapSeed<T> {
    doors: Vec<Door<T>>,
}

impl<T> DoorMapSeed<T> {
    /// Creates a seed that builds maps guarded by `doors`.
    pub fn new<I>(doors: I) -> Self
    where
        I: IntoIterator<Item = Door<T>>,
    {
        Self { doors: doors.into_iter().collect() }
    }
}

impl<T> fmt::Debug for DoorMapSeed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoorMapSeed").field("doors", &self.doors).finish()
    }
}

impl<'de, T: Deserialize<'de>> DeserializeSeed<'de> for DoorMapSeed<T> {
    type Value = DoorMap<T>;

    fn deserialize<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<Self::Value, D::Error> {
        let map = DoorMap::new(self.doors);
        deserializer.deserialize_seq(SeqVisitor { map })
    }
}

impl<'de, T: Deserialize<'de>> DoorMap<T> {
    /// Deserializes a map from a list of items, guarding it with `doors`.
    ///
    /// This is a shorthand for [`DoorMapSeed`].
    pub fn deserialize_with<D, I>(
        doors: I,
        deserializer: D,
    ) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
        I: IntoIterator<Item = Door<T>>,
    {
        DoorMapSeed::new(doors).deserialize(deserializer)
    }
}

struct SeqVisitor<T> {
    map: DoorMap<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for SeqVisitor<T> {
    type Value = DoorMap<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of items for a DoorMap")
    }

    fn visit_seq<Access>(
        mut self,
        mut seq: Access,
    ) -> Result<Self::Value, Access::Error>
    where
        Access: SeqAccess<'de>,
    {
        let mut dropped = 0usize;
        while let Some(item) = seq.next_element()? {
            if !self.map.absorb(item) {
                dropped += 1;
            }
        }

        #[cfg(feature = "tracing")]
        if dropped > 0 {
            tracing::debug!(
                dropped,
                kept = self.map.len(),
                "duplicate items dropped while deserializing a DoorMap"
            );
        }
        #[cfg(not(feature = "tracing"))]
        let _ = dropped;

        Ok(self.map)
    }
}
