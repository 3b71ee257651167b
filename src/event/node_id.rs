// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node instance.
///
/// Every event a node publishes carries its ID, so a host that routes many
/// nodes through one subscriber can tell them apart.
///
/// # Examples
///
/// ```
/// use plugflow::event::NodeId;
///
/// let id = NodeId::new();
/// assert_ne!(id, NodeId::new());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Creates a new unique node identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let uuid = self.0.to_string();
        write!(f, "NodeId({}...)", &uuid[..8])
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for NodeId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(NodeId::new(), NodeId::new());
    }

    #[test]
    fn debug_is_shortened() {
        let id = NodeId::new();
        let debug = format!("{id:?}");
        assert!(debug.starts_with("NodeId("));
        assert!(debug.ends_with("...)"));
    }

    #[test]
    fn from_uuid_round_trips() {
        let uuid = Uuid::new_v4();
        assert_eq!(NodeId::from(uuid).as_uuid(), uuid);
        assert_eq!(NodeId::from(uuid).to_string(), uuid.to_string());
    }
}
