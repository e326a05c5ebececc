// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schemars implementations for DoorMap.

use crate::{support::schemars_utils::create_list_schema, DoorMap};
use alloc::string::String;
use schemars::{gen::SchemaGenerator, schema::Schema, JsonSchema};

impl<T: JsonSchema> JsonSchema for DoorMap<T> {
    fn schema_name() -> String {
        alloc::format!("DoorMap_of_{}", T::schema_name())
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        create_list_schema::<T>("DoorMap", "doormap::DoorMap", generator)
    }

    fn is_referenceable() -> bool {
        false
    }
}
