// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub(crate) mod cons_list;
pub(crate) mod fmt_utils;
pub(crate) mod list_diff;
#[cfg(feature = "schemars08")]
pub(crate) mod schemars_utils;
