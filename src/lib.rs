// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `plugflow` - Flow-engine node for TP-Link style smart plugs.
//!
//! A [`SmartPlugNode`] bridges one network-controlled power outlet into a
//! flow-based automation engine. It turns the plug's push events and
//! periodic telemetry into outbound messages, and inbound messages into
//! device actions.
//!
//! # Supported Features
//!
//! - **Power control**: `true` / `false` payloads switch the relay
//! - **Telemetry**: system info and realtime energy readings, on demand or
//!   every poll interval
//! - **Push events**: power, in-use and online notifications, filtered by
//!   the enabled [`ActionSet`]
//! - **Status indicator**: a compact colored badge with the last reading
//! - **Discovery**: network scan and model lookup for configuration UIs
//!
//! # Integration
//!
//! The crate does not speak the plug's wire protocol. The host implements
//! [`PlugClient`] and [`PlugSession`](device::PlugSession) over a protocol
//! library, and consumes [`NodeEvent`]s from the node's event bus.
//!
//! # Quick Start
//!
//! ```ignore
//! use plugflow::{InboundMessage, NodeConfig, NodeEvent, SmartPlugNode};
//!
//! #[tokio::main]
//! async fn main() -> plugflow::Result<()> {
//!     let config = NodeConfig::new("192.168.1.40").with_name("Kettle");
//!     let node = SmartPlugNode::new(config, MyClient::new());
//!     let mut events = node.subscribe();
//!
//!     node.start()?;
//!     node.input(InboundMessage::new("getMeterEvents|getPowerUpdateEvents"));
//!
//!     while let Ok(event) = events.recv().await {
//!         match event {
//!             NodeEvent::Message { message, .. } => println!("{}", message.payload),
//!             NodeEvent::Status { status, .. } => println!("[{status}]"),
//!             NodeEvent::Error { error, .. } => eprintln!("{error}"),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod device;
pub mod discovery;
pub mod error;
pub mod event;
pub mod node;
pub mod response;
pub mod status;
pub mod subscription;
pub mod types;

pub use command::{Command, InboundMessage};
pub use device::{EnergyMeter, PlugClient, PlugSession};
pub use discovery::{DiscoveryOptions, discover_plugs, lookup_model};
pub use error::{ConfigError, DeviceError, Error, ParseError, Result};
pub use event::{EventBus, NodeEvent, NodeId, OutboundMessage};
pub use node::{ConnectionState, NodeConfig, NodeState, SmartPlugNode};
pub use response::{MeterReading, SysInfo};
pub use status::{Status, StatusFill, StatusShape};
pub use subscription::{CallbackRegistry, PushEvent, Subscribable, SubscriptionId};
pub use types::{ActionKind, ActionSet, PowerState};
