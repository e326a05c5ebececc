// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Uniqueness promises.
//!
//! A [`Door`] is a promise that some view of an item is unique across a
//! [`DoorMap`]. The usual way to build one is from a projection: a function
//! from an item to a key. Two items violate the promise if their keys are
//! equal.
//!
//! [`DoorMap`]: crate::DoorMap

use alloc::sync::Arc;
use core::fmt;
use derive_where::derive_where;

use crate::support::fmt_utils::DoorName;

/// Decides whether two items may not be stored side by side.
///
/// Implement this trait for uniqueness rules that aren't plain key equality,
/// then turn the implementation into a door with [`Door::from_promise`].
///
/// # Examples
///
/// ```
/// use doormap::{Door, DoorMap, Promise};
///
/// struct CaseInsensitive;
///
/// impl Promise<String> for CaseInsensitive {
///     fn violates(&self, a: &String, b: &String) -> bool {
///         a.eq_ignore_ascii_case(b)
///     }
/// }
///
/// let map = DoorMap::new([Door::from_promise(CaseInsensitive)])
///     .insert("Alice".to_string())
///     .insert("ALICE".to_string());
/// assert_eq!(map.len(), 1);
/// ```
pub trait Promise<T: ?Sized>: Send + Sync {
    /// Returns true if `a` and `b` break the promise, i.e. they may not both
    /// be stored.
    ///
    /// When inserting, `a` is the new item and `b` an item already stored.
    fn violates(&self, a: &T, b: &T) -> bool;
}

/// A uniqueness promise over items of type `T`.
///
/// Doors are cheap to clone. They are never compared with each other, only
/// invoked.
///
/// # Examples
///
/// ```
/// use doormap::Door;
///
/// struct User {
///     id: u32,
///     name: String,
///     email: String,
/// }
///
/// let by_id = Door::named("id", |u: &User| u.id);
/// // Composite keys come from projecting to a tuple.
/// let by_name_and_email =
///     Door::new(|u: &User| (u.name.clone(), u.email.clone()));
///
/// let a = User { id: 1, name: "a".into(), email: "a@x".into() };
/// let b = User { id: 1, name: "b".into(), email: "b@x".into() };
/// assert!(by_id.violates(&a, &b));
/// assert!(!by_name_and_email.violates(&a, &b));
/// ```
#[derive_where(Clone)]
pub struct Door<T> {
    name: Option<&'static str>,
    promise: Arc<dyn Promise<T>>,
}

impl<T> Door<T> {
    /// Creates a door from a projection. Two items violate the door if they
    /// project to equal keys.
    pub fn new<K, F>(project: F) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
        K: PartialEq,
    {
        Self::from_promise(ByKey(project))
    }

    /// Creates a door from a projection, with a name used in `Debug` output.
    pub fn named<K, F>(name: &'static str, project: F) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
        K: PartialEq,
    {
        Self::new(project).with_name(name)
    }

    /// Creates a door from an arbitrary [`Promise`].
    pub fn from_promise<P>(promise: P) -> Self
    where
        P: Promise<T> + 'static,
    {
        Self { name: None, promise: Arc::new(promise) }
    }

    /// Returns this door with the given name.
    pub fn with_name(self, name: &'static str) -> Self {
        Self { name: Some(name), ..self }
    }

    /// Returns the name of this door, if it has one.
    #[inline]
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Returns true if `a` and `b` may not be stored side by side.
    #[inline]
    pub fn violates(&self, a: &T, b: &T) -> bool {
        self.promise.violates(a, b)
    }
}

impl<T> fmt::Debug for Door<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Door").field(&DoorName(self.name)).finish()
    }
}

/// A promise that projected keys are unique.
struct ByKey<F>(F);

impl<T, K, F> Promise<T> for ByKey<F>
where
    F: Fn(&T) -> K + Send + Sync,
    K: PartialEq,
{
    #[inline]
    fn violates(&self, a: &T, b: &T) -> bool {
        (self.0)(a) == (self.0)(b)
    }
}
