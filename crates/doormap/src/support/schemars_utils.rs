// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Utilities for schemars support.

use alloc::{
    boxed::Box,
    string::{String, ToString},
};
use schemars::{
    gen::SchemaGenerator,
    schema::{
        ArrayValidation, InstanceType, Metadata, Schema, SchemaObject,
        SingleOrVec,
    },
    JsonSchema,
};

/// The crate name, used in the x-rust-type extension.
pub(crate) static DOORMAP_CRATE_NAME: &str = "doormap";

/// The crate version, used in the x-rust-type extension.
///
/// We use * here because the serialized form is a plain list and is expected
/// to stay the same across breaking changes.
pub(crate) static DOORMAP_CRATE_VERSION: &str = "*";

/// Array validation for a list of `T`.
///
/// `uniqueItems` is left unset: a list with duplicates decodes successfully,
/// with later duplicates dropped.
fn array_validation<T: JsonSchema>(
    generator: &mut SchemaGenerator,
) -> Box<ArrayValidation> {
    Box::new(ArrayValidation {
        items: Some(SingleOrVec::Single(Box::new(
            generator.subschema_for::<T>(),
        ))),
        ..Default::default()
    })
}

fn make_extension_table<T: JsonSchema>(
    path: &'static str,
    generator: &mut SchemaGenerator,
) -> schemars::Map<String, serde_json::Value> {
    [(
        "x-rust-type".to_string(),
        serde_json::json!({
            "crate": DOORMAP_CRATE_NAME,
            "version": DOORMAP_CRATE_VERSION,
            "path": path,
            "parameters": [generator.subschema_for::<T>()]
        }),
    )]
    .into_iter()
    .collect()
}

/// Creates the schema of a container serialized as a list of `T`.
pub(crate) fn create_list_schema<T: JsonSchema>(
    title: &str,
    rust_type_path: &'static str,
    generator: &mut SchemaGenerator,
) -> Schema {
    Schema::Object(SchemaObject {
        instance_type: Some(InstanceType::Array.into()),
        array: Some(array_validation::<T>(generator)),
        metadata: Some(Box::new(Metadata {
            title: Some(title.to_string()),
            ..Default::default()
        })),
        extensions: make_extension_table::<T>(rust_type_path, generator),
        ..Default::default()
    })
}
