// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A persistent map where items are unique through several doors.
//!
//! For more information, see [`DoorMap`].

pub(crate) mod imp;
mod iter;
#[cfg(feature = "schemars08")]
mod schemars_impls;
#[cfg(feature = "serde")]
mod serde_impls;

pub use imp::DoorMap;
pub use iter::Iter;
#[cfg(feature = "serde")]
pub use serde_impls::DoorMapSeed;
