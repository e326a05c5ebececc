// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt;

/// Debug impl for a static string without quotes.
pub(crate) struct StrDisplayAsDebug(pub(crate) &'static str);

impl fmt::Debug for StrDisplayAsDebug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Use the Display formatter to write the string without quotes.
        fmt::Display::fmt(&self.0, f)
    }
}

/// Debug impl for a door: its name if it has one, `_` otherwise.
pub(crate) struct DoorName(pub(crate) Option<&'static str>);

impl fmt::Debug for DoorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&StrDisplayAsDebug(self.0.unwrap_or("_")), f)
    }
}
