// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Events a node publishes to its host.
//!
//! A node never calls into the flow engine directly. Outbound messages,
//! status changes and reported errors are published as [`NodeEvent`]s on an
//! [`EventBus`], which uses tokio's broadcast channel so the host (and any
//! number of observers) can subscribe.
//!
//! # Examples
//!
//! ```
//! use plugflow::event::{EventBus, NodeEvent, NodeId, OutboundMessage};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(NodeEvent::message(NodeId::new(), OutboundMessage::flag("online", true)));
//! assert!(rx.try_recv().is_ok());
//! ```

mod event_bus;
mod message;
mod node_event;
mod node_id;

pub use event_bus::EventBus;
pub use message::{OutboundMessage, TIMESTAMP_FIELD, timestamp_now};
pub use node_event::NodeEvent;
pub use node_id::NodeId;
