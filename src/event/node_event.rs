// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node event types.

use serde::Serialize;

use crate::status::Status;

use super::{NodeId, OutboundMessage};

/// Everything a node hands back to its host.
///
/// A host forwards [`Message`](Self::Message) events to the next nodes in
/// the flow, shows [`Status`](Self::Status) events on the node, and logs
/// [`Error`](Self::Error) events in its debug sidebar.
///
/// # Examples
///
/// ```
/// use plugflow::event::{NodeEvent, NodeId};
/// use plugflow::status::Status;
///
/// let node_id = NodeId::new();
/// let event = NodeEvent::Status { node_id, status: Status::connected() };
///
/// assert_eq!(event.node_id(), node_id);
/// assert_eq!(event.as_status().map(|s| s.text.as_str()), Some("connected"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeEvent {
    /// An outbound flow message.
    Message {
        /// The emitting node.
        node_id: NodeId,
        /// The message.
        message: OutboundMessage,
    },

    /// The node's status indicator changed.
    Status {
        /// The emitting node.
        node_id: NodeId,
        /// The new indicator.
        status: Status,
    },

    /// The node reported an error.
    Error {
        /// The emitting node.
        node_id: NodeId,
        /// The rendered error.
        error: String,
    },
}

impl NodeEvent {
    /// Creates a message event.
    #[must_use]
    pub fn message(node_id: NodeId, message: OutboundMessage) -> Self {
        Self::Message { node_id, message }
    }

    /// Creates a status event.
    #[must_use]
    pub fn status(node_id: NodeId, status: Status) -> Self {
        Self::Status { node_id, status }
    }

    /// Creates an error event.
    #[must_use]
    pub fn error(node_id: NodeId, error: &crate::Error) -> Self {
        Self::Error {
            node_id,
            error: error.to_string(),
        }
    }

    /// Returns the node ID associated with this event.
    #[must_use]
    pub fn node_id(&self) -> NodeId {
        match self {
            Self::Message { node_id, .. }
            | Self::Status { node_id, .. }
            | Self::Error { node_id, .. } => *node_id,
        }
    }

    /// Returns the message, if this is a message event.
    #[must_use]
    pub fn as_message(&self) -> Option<&OutboundMessage> {
        match self {
            Self::Message { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns the status, if this is a status event.
    #[must_use]
    pub fn as_status(&self) -> Option<&Status> {
        match self {
            Self::Status { status, .. } => Some(status),
            _ => None,
        }
    }

    /// Returns the error text, if this is an error event.
    #[must_use]
    pub fn as_error(&self) -> Option<&str> {
        match self {
            Self::Error { error, .. } => Some(error),
            _ => None,
        }
    }
}
