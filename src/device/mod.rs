// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device client capability.
//!
//! The wire protocol spoken by the plug is not part of this crate. A host
//! application plugs in a concrete client by implementing two traits:
//!
//! - [`PlugClient`] connects to a plug by address and runs network discovery.
//! - [`PlugSession`] is the established connection: info and power control,
//!   the energy meter through [`EnergyMeter`], and push events through
//!   [`Subscribable`].
//!
//! Every asynchronous operation returns a `Send` future so the node can run
//! each device call as its own task.
//!
//! # Implementing a client
//!
//! ```
//! use std::time::Duration;
//! use plugflow::device::{EnergyMeter, PlugClient, PlugSession};
//! use plugflow::discovery::{DeviceKind, DiscoveredDevice};
//! use plugflow::error::DeviceError;
//! use plugflow::response::{MeterReading, SysInfo};
//! use plugflow::subscription::{CallbackRegistry, PushEvent, Subscribable, SubscriptionId};
//! use plugflow::types::PowerState;
//! use tokio::sync::mpsc;
//!
//! struct LoopbackMeter;
//!
//! impl EnergyMeter for LoopbackMeter {
//!     async fn realtime(&self) -> Result<MeterReading, DeviceError> {
//!         Ok(MeterReading::new(0.0, 230.0, 0.0))
//!     }
//!
//!     async fn erase_stats(&self) -> Result<serde_json::Value, DeviceError> {
//!         Ok(serde_json::json!({"err_code": 0}))
//!     }
//! }
//!
//! struct LoopbackSession {
//!     meter: LoopbackMeter,
//!     callbacks: CallbackRegistry,
//! }
//!
//! impl Subscribable for LoopbackSession {
//!     fn subscribe<F>(&self, event: PushEvent, callback: F) -> SubscriptionId
//!     where
//!         F: Fn() + Send + Sync + 'static,
//!     {
//!         self.callbacks.subscribe(event, callback)
//!     }
//!
//!     fn unsubscribe(&self, id: SubscriptionId) -> bool {
//!         self.callbacks.unsubscribe(id)
//!     }
//! }
//!
//! impl PlugSession for LoopbackSession {
//!     type Meter = LoopbackMeter;
//!
//!     fn model(&self) -> &str {
//!         "loopback"
//!     }
//!
//!     fn start_polling(&self, _interval: Duration) {}
//!
//!     async fn sys_info(&self) -> Result<SysInfo, DeviceError> {
//!         Ok(SysInfo::default())
//!     }
//!
//!     async fn set_power_state(&self, _state: PowerState) -> Result<(), DeviceError> {
//!         Ok(())
//!     }
//!
//!     fn emeter(&self) -> &LoopbackMeter {
//!         &self.meter
//!     }
//! }
//!
//! struct LoopbackClient;
//!
//! impl PlugClient for LoopbackClient {
//!     type Session = LoopbackSession;
//!
//!     async fn connect(&self, _host: &str) -> Result<LoopbackSession, DeviceError> {
//!         Ok(LoopbackSession { meter: LoopbackMeter, callbacks: CallbackRegistry::new() })
//!     }
//!
//!     fn start_discovery(
//!         &self,
//!         _kind: DeviceKind,
//!     ) -> Result<mpsc::UnboundedReceiver<DiscoveredDevice>, DeviceError> {
//!         let (_tx, rx) = mpsc::unbounded_channel();
//!         Ok(rx)
//!     }
//!
//!     fn stop_discovery(&self) {}
//! }
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::discovery::{DeviceKind, DiscoveredDevice};
use crate::error::DeviceError;
use crate::response::{MeterReading, SysInfo};
use crate::subscription::Subscribable;
use crate::types::PowerState;

/// Energy-meter sub-capability of a plug session.
pub trait EnergyMeter: Send + Sync + 'static {
    /// Reads the realtime current, voltage and power.
    fn realtime(&self) -> impl Future<Output = Result<MeterReading, DeviceError>> + Send;

    /// Erases the accumulated usage statistics.
    ///
    /// The device's answer is returned unchanged.
    fn erase_stats(&self) -> impl Future<Output = Result<serde_json::Value, DeviceError>> + Send;
}

/// An established connection to one plug.
///
/// A node obtains exactly one session and keeps it for its whole lifetime.
/// It never closes or replaces it.
pub trait PlugSession: Subscribable + Send + Sync + 'static {
    /// Energy meter type exposed by this session.
    type Meter: EnergyMeter;

    /// Returns the device model identifier.
    fn model(&self) -> &str;

    /// Starts the client's own state polling, which drives push events.
    fn start_polling(&self, interval: Duration);

    /// Reads the device's system info.
    fn sys_info(&self) -> impl Future<Output = Result<SysInfo, DeviceError>> + Send;

    /// Switches the relay.
    fn set_power_state(
        &self,
        state: PowerState,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Returns the energy meter.
    fn emeter(&self) -> &Self::Meter;
}

/// Factory for plug sessions and network discovery.
pub trait PlugClient: Send + Sync + 'static {
    /// Session type produced by [`connect`](Self::connect).
    type Session: PlugSession;

    /// Connects to the plug at `host`.
    fn connect(&self, host: &str) -> impl Future<Output = Result<Self::Session, DeviceError>> + Send;

    /// Starts broadcasting discovery probes for devices of `kind`.
    ///
    /// Each answering device is sent on the returned channel, possibly more
    /// than once.
    ///
    /// # Errors
    ///
    /// Returns an error if the discovery socket cannot be opened.
    fn start_discovery(
        &self,
        kind: DeviceKind,
    ) -> Result<mpsc::UnboundedReceiver<DiscoveredDevice>, DeviceError>;

    /// Stops a discovery started with [`start_discovery`](Self::start_discovery).
    fn stop_discovery(&self);
}
