// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node-scoped state.

use serde::{Deserialize, Serialize};

use crate::types::{ActionKind, ActionSet, PowerState};

/// Mutable state owned by one node.
///
/// Inbound commands write the action set; info queries write the display
/// state. Serialized keys match the node context keys of the flow engine.
///
/// # Examples
///
/// ```
/// use plugflow::node::NodeState;
/// use plugflow::types::{ActionKind, ActionSet, PowerState};
///
/// let mut state = NodeState::default();
/// assert_eq!(state.display_state(), PowerState::Off);
///
/// state.set_actions(ActionSet::parse("getInUseEvents"));
/// assert!(state.is_enabled(ActionKind::InUseEvents));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeState {
    #[serde(rename = "action", default)]
    actions: ActionSet,
    #[serde(rename = "state", default, skip_serializing_if = "Option::is_none")]
    display: Option<PowerState>,
}

impl NodeState {
    /// Creates an empty state: nothing enabled, relay state unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the enabled action kinds.
    #[must_use]
    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    /// Replaces the enabled action kinds.
    pub fn set_actions(&mut self, actions: ActionSet) {
        self.actions = actions;
    }

    /// Returns `true` if `kind` is enabled.
    #[must_use]
    pub fn is_enabled(&self, kind: ActionKind) -> bool {
        self.actions.contains(kind)
    }

    /// Returns the last relay state seen, if any.
    #[must_use]
    pub fn display(&self) -> Option<PowerState> {
        self.display
    }

    /// Returns the relay state used to label meter readings.
    ///
    /// An unknown state is shown as off.
    #[must_use]
    pub fn display_state(&self) -> PowerState {
        self.display.unwrap_or_default()
    }

    /// Records the relay state from an info query.
    pub fn set_display(&mut self, state: PowerState) {
        self.display = Some(state);
    }
}
