// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Internal types used by tests. Not part of the stable API.

use alloc::string::String;
use core::fmt;

/// A broken invariant found by [`DoorMap::validate`].
///
/// [`DoorMap::validate`]: crate::DoorMap::validate
#[derive(Debug)]
pub enum ValidationError {
    /// Two stored items collide on a door.
    Collision {
        /// The index of the door, in the order the doors were supplied.
        door: usize,
        /// Positions of the two items, most-recent-first.
        items: (usize, usize),
    },
    /// Anything else.
    General(String),
}

impl ValidationError {
    pub(crate) fn general(msg: impl Into<String>) -> Self {
        ValidationError::General(msg.into())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collision { door, items: (a, b) } => {
                write!(f, "items at {} and {} collide on door {}", a, b, door)
            }
            Self::General(msg) => msg.fmt(f),
        }
    }
}

impl core::error::Error for ValidationError {}
