// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device responses forwarded by the node.
//!
//! The node passes device answers through to its outbound messages without
//! reinterpreting them. These types keep the raw JSON object intact and add
//! typed accessors for the few fields the node itself reads.

mod meter;
mod sysinfo;

pub use meter::MeterReading;
pub use sysinfo::SysInfo;
