// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the node and its collaborators.
//!
//! # Types
//!
//! - [`ActionKind`] - One kind of telemetry or push event a node can forward
//! - [`ActionSet`] - The persisted selection of enabled [`ActionKind`]s
//! - [`PowerState`] - Last known relay state, used for status text

mod action;
mod power;

pub(crate) use action::CLEAR_EVENTS;
pub use action::{ActionKind, ActionSet};
pub use power::PowerState;
