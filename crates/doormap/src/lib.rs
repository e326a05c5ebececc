// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persistent maps where every item can be found through several unique
//! doors.
//!
//! # Motivation
//!
//! A dictionary indexes values by one key. Often a record has several fields
//! that are each unique on their own: a user's id, their login and their
//! email address. Keeping one map per field means keeping several maps in
//! sync by hand.
//!
//! A [`DoorMap`] stores each record once, and is guarded by a list of
//! [`Door`]s. A door is a projection from a record to a key, together with
//! the promise that no two stored records share that key. Any record can be
//! found through any door.
//!
//! ```
//! use doormap::{Door, DoorMap};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct User {
//!     id: u32,
//!     login: String,
//!     email: String,
//! }
//!
//! let users = DoorMap::new([
//!     Door::named("id", |u: &User| u.id),
//!     Door::named("login", |u: &User| u.login.clone()),
//!     Door::named("email", |u: &User| u.email.clone()),
//! ]);
//!
//! let alice = User {
//!     id: 1,
//!     login: "alice".to_string(),
//!     email: "alice@example.com".to_string(),
//! };
//! let users = users.insert(alice.clone());
//!
//! // Bob can't take Alice's email address, so this insert is a no-op.
//! let users = users.insert(User {
//!     id: 2,
//!     login: "bob".to_string(),
//!     email: "alice@example.com".to_string(),
//! });
//! assert_eq!(users.len(), 1);
//!
//! // Alice can be found through any door.
//! assert_eq!(users.get_by(|u| u.login.clone(), "alice"), Some(&alice));
//! assert_eq!(users.get_by(|u| u.id, &1u32), Some(&alice));
//! ```
//!
//! # Persistence
//!
//! Maps are values. Every operation returns a new map and leaves the old one
//! as it was. Versions share their storage, so keeping old versions around is
//! cheap, and maps can be shared across threads without locking.
//!
//! # Insertion never fails
//!
//! [`DoorMap::insert`] silently ignores an item that collides with a stored
//! one on any door; the first item to claim a key keeps it. When the
//! collision matters, use [`DoorMap::try_insert`], which reports the
//! colliding items as an [`errors::DuplicateItem`].
//!
//! # Equality
//!
//! Two maps are equal if they hold the same items, whatever the order of
//! insertion and whatever their doors. This comparison is quadratic in the
//! number of items, since items are only required to implement `PartialEq`.
//!
//! Items whose `PartialEq` is not an equivalence relation (for example items
//! containing floating-point NaNs) are not supported. The map doesn't check
//! for them, and the results of operations on such items are unspecified.
//!
//! # Optional features
//!
//! - `serde`: serialization as a list of items, and `DoorMapSeed` for
//!   deserialization with caller-supplied doors.
//! - `schemars08`: JSON Schema support via `schemars` 0.8.
//! - `tracing`: events for rejected insertions and for duplicates dropped
//!   while deserializing.

#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod door;
pub mod door_map;
pub mod errors;
#[doc(hidden)]
pub mod internal;
mod support;

pub use door::{Door, Promise};
pub use door_map::DoorMap;
#[cfg(feature = "serde")]
pub use door_map::DoorMapSeed;
