// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relay power state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The on/off state of the plug's relay.
///
/// The node remembers the last state it saw in an info query and uses it to
/// label meter readings in the status indicator.
///
/// # Examples
///
/// ```
/// use plugflow::types::PowerState;
///
/// assert_eq!(PowerState::from(true), PowerState::On);
/// assert_eq!(PowerState::On.as_str(), "on");
/// assert_eq!(PowerState::Off.label(), "turned off");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    /// Relay is open.
    #[default]
    Off,
    /// Relay is closed.
    On,
}

impl PowerState {
    /// Returns the persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }

    /// Returns the human-readable label used in status text.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Off => "turned off",
            Self::On => "turned on",
        }
    }

    /// Returns `true` if the relay is on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "0" | "false" => Ok(Self::Off),
            "on" | "1" | "true" => Ok(Self::On),
            _ => Err(format!("invalid power state: {s}")),
        }
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}
