// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The smart plug node.
//!
//! A [`SmartPlugNode`] bridges one plug into a flow. It owns the single
//! session to the device and turns device activity into [`NodeEvent`]s:
//!
//! - **Connection**: one attempt at [`start`](SmartPlugNode::start), never
//!   retried. The outcome is shown in the status indicator.
//! - **Poller**: a timer that fires every configured interval. Without a
//!   session each tick reports the device as unreachable; with one it runs
//!   the info and meter queries the [`ActionSet`](crate::types::ActionSet)
//!   enables.
//! - **Push events**: the six session events are forwarded as flag messages
//!   when their action kind is enabled.
//! - **Commands**: every inbound message is turned into one
//!   [`Command`](crate::command::Command) and run against the session.
//!
//! Device calls run as their own tasks, so a slow plug never delays the
//! timer or other commands. Results are published in completion order.
//!
//! # Examples
//!
//! ```ignore
//! use plugflow::command::InboundMessage;
//! use plugflow::node::{NodeConfig, SmartPlugNode};
//!
//! let config: NodeConfig = serde_json::from_str(
//!     r#"{"name": "Kettle", "device": "192.168.1.40", "interval": "5000"}"#,
//! )?;
//! let node = SmartPlugNode::new(config, MyClient::new());
//!
//! let mut events = node.subscribe();
//! node.start()?;
//!
//! node.input(InboundMessage::new("getMeterEvents|getPowerUpdateEvents"));
//! node.input(InboundMessage::new(true));
//!
//! while let Ok(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//! ```

mod bridge;
mod config;
mod state;
mod telemetry;

pub use config::{DEFAULT_INTERVAL, NodeConfig};
pub use state::NodeState;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::command::{Command, InboundMessage};
use crate::device::{PlugClient, PlugSession};
use crate::error::Error;
use crate::event::{EventBus, NodeEvent, NodeId, OutboundMessage};
use crate::status::Status;
use crate::subscription::{Subscribable, SubscriptionId};
use crate::types::{ActionKind, ActionSet};

/// Connection state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// The node has not started, or has no device address.
    #[default]
    Uninitialized,
    /// The connection attempt is in flight.
    Connecting,
    /// A session exists.
    Connected,
    /// The connection attempt failed. The node stays without a session.
    Unreachable,
}

impl ConnectionState {
    /// Returns `true` if a session exists.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// A flow node bound to one smart plug.
///
/// Must be started from within a tokio runtime. Dropping the node stops the
/// poller; [`close`](Self::close) also releases the push-event
/// subscriptions.
pub struct SmartPlugNode<C: PlugClient> {
    inner: Arc<Inner<C>>,
    poller: Mutex<Option<JoinHandle<()>>>,
}

/// State shared with the tasks a node spawns.
struct Inner<C: PlugClient> {
    id: NodeId,
    config: NodeConfig,
    client: C,
    events: EventBus,
    state: Mutex<NodeState>,
    connection: Mutex<ConnectionState>,
    session: OnceLock<Arc<C::Session>>,
    subscriptions: Mutex<Vec<SubscriptionId>>,
    started: AtomicBool,
    closed: AtomicBool,
}

impl<C: PlugClient> SmartPlugNode<C> {
    /// Creates a node with its own event bus.
    ///
    /// Nothing happens until [`start`](Self::start) is called.
    #[must_use]
    pub fn new(config: NodeConfig, client: C) -> Self {
        Self::with_event_bus(config, client, EventBus::new())
    }

    /// Creates a node that publishes on a shared event bus.
    #[must_use]
    pub fn with_event_bus(config: NodeConfig, client: C, events: EventBus) -> Self {
        let inner = Inner {
            id: NodeId::new(),
            config,
            client,
            events,
            state: Mutex::new(NodeState::new()),
            connection: Mutex::new(ConnectionState::Uninitialized),
            session: OnceLock::new(),
            subscriptions: Mutex::new(Vec::new()),
            started: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        };
        Self {
            inner: Arc::new(inner),
            poller: Mutex::new(None),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the node ID.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.inner.id
    }

    /// Returns the node configuration.
    #[must_use]
    pub fn config(&self) -> &NodeConfig {
        &self.inner.config
    }

    /// Subscribes to the events this node publishes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<NodeEvent> {
        self.inner.events.subscribe()
    }

    /// Returns a snapshot of the node state.
    #[must_use]
    pub fn state(&self) -> NodeState {
        self.inner.state.lock().clone()
    }

    /// Returns the enabled action kinds.
    #[must_use]
    pub fn actions(&self) -> ActionSet {
        self.inner.state.lock().actions().clone()
    }

    /// Returns the connection state.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        *self.inner.connection.lock()
    }

    /// Returns `true` if the node holds a session.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner.session.get().is_some()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Starts the node: begins the connection attempt and the poller.
    ///
    /// Calling `start` again has no effect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfigured`] if the configuration has no device
    /// address. The node then shows "not configured" and stays idle.
    pub fn start(&self) -> crate::Result<()> {
        let inner = &self.inner;
        if inner.started.swap(true, Ordering::SeqCst) {
            tracing::debug!(node = %inner.id, "Node already started");
            return Ok(());
        }

        if !inner.config.is_configured() {
            tracing::warn!(
                node = %inner.id,
                name = %inner.config.name(),
                "No device address configured"
            );
            inner.publish_status(Status::not_configured());
            return Err(Error::NotConfigured);
        }

        tracing::info!(
            node = %inner.id,
            device = %inner.config.device(),
            interval = ?inner.config.interval(),
            "Starting smart plug node"
        );

        *inner.connection.lock() = ConnectionState::Connecting;
        inner.publish_status(Status::initializing());

        tokio::spawn(Inner::connect(Arc::clone(inner)));
        *self.poller.lock() = Some(Inner::spawn_poller(inner));

        Ok(())
    }

    /// Handles one inbound message.
    ///
    /// Results are published on the event bus. Messages to a node without a
    /// device address are ignored.
    pub fn input(&self, message: InboundMessage) {
        let inner = &self.inner;
        if !inner.config.is_configured() {
            tracing::debug!(node = %inner.id, "Ignoring input for unconfigured node");
            return;
        }
        inner.dispatch(&message);
    }

    /// Stops the poller and releases the push-event subscriptions.
    ///
    /// The session itself is kept; in-flight device calls still complete
    /// and publish their results.
    pub fn close(&self) {
        let inner = &self.inner;
        if inner.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Some(poller) = self.poller.lock().take() {
            poller.abort();
        }
        inner.release_subscriptions();

        tracing::info!(node = %inner.id, "Smart plug node closed");
    }
}

impl<C: PlugClient> Drop for SmartPlugNode<C> {
    fn drop(&mut self) {
        if let Some(poller) = self.poller.get_mut().take() {
            poller.abort();
        }
    }
}

impl<C: PlugClient> std::fmt::Debug for SmartPlugNode<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartPlugNode")
            .field("id", &self.inner.id)
            .field("config", &self.inner.config)
            .field("connection", &self.connection_state())
            .finish_non_exhaustive()
    }
}

impl<C: PlugClient> Inner<C> {
    // =========================================================================
    // Publishing
    // =========================================================================

    fn publish_status(&self, status: Status) {
        self.events.publish(NodeEvent::status(self.id, status));
    }

    fn publish_message(&self, message: OutboundMessage) {
        self.events.publish(NodeEvent::message(self.id, message));
    }

    fn report(&self, error: &Error) {
        tracing::warn!(node = %self.id, error = %error, "Node error");
        self.events.publish(NodeEvent::error(self.id, error));
    }

    /// Reports an error and marks the device as unreachable.
    fn report_unreachable(&self, error: &Error) {
        self.report(error);
        self.publish_status(Status::unreachable());
    }

    // =========================================================================
    // Connection
    // =========================================================================

    async fn connect(self: Arc<Self>) {
        let host = self.config.device();
        tracing::debug!(node = %self.id, host = %host, "Connecting to plug");

        let session = match self.client.connect(host).await {
            Ok(session) => Arc::new(session),
            Err(e) => {
                tracing::warn!(node = %self.id, host = %host, error = %e, "Connection failed");
                *self.connection.lock() = ConnectionState::Unreachable;
                self.report_unreachable(&Error::ConnectionFailed(e));
                return;
            }
        };

        session.start_polling(self.config.interval());
        if self.session.set(Arc::clone(&session)).is_err() {
            return;
        }
        *self.connection.lock() = ConnectionState::Connected;

        tracing::info!(node = %self.id, model = %session.model(), "Connected to plug");
        self.publish_status(Status::connected());

        if self.closed.load(Ordering::SeqCst) {
            tracing::debug!(node = %self.id, "Node closed while connecting, not subscribing");
            return;
        }
        self.subscribe_push_events(&session);
    }

    fn release_subscriptions(&self) {
        let ids = std::mem::take(&mut *self.subscriptions.lock());
        if let Some(session) = self.session.get() {
            for id in ids {
                session.unsubscribe(id);
            }
        }
    }

    // =========================================================================
    // Poller
    // =========================================================================

    fn spawn_poller(self: &Arc<Self>) -> JoinHandle<()> {
        let inner = Arc::clone(self);
        let period = inner.config.interval();

        tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                inner.tick();
            }
        })
    }

    fn tick(self: &Arc<Self>) {
        let Some(session) = self.session.get() else {
            self.report_unreachable(&Error::Unreachable);
            return;
        };

        let (info, meter) = {
            let state = self.state.lock();
            (
                state.is_enabled(ActionKind::InfoEvents),
                state.is_enabled(ActionKind::MeterEvents),
            )
        };
        tracing::trace!(node = %self.id, info, meter, "Poll tick");

        if info {
            self.spawn_info_query(session);
        }
        if meter {
            self.spawn_meter_query(session);
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    fn dispatch(self: &Arc<Self>, message: &InboundMessage) {
        let Some(session) = self.session.get() else {
            self.report_unreachable(&Error::Unreachable);
            return;
        };

        let command = match message.command() {
            Ok(command) => command,
            Err(e) => {
                self.report(&Error::InvalidPayload(e));
                return;
            }
        };
        tracing::debug!(node = %self.id, command = ?command, "Dispatching command");

        match command {
            Command::SetPower(power) => {
                let inner = Arc::clone(self);
                let session = Arc::clone(session);
                tokio::spawn(async move {
                    match session.set_power_state(power).await {
                        Ok(()) => inner.query_info(&session).await,
                        Err(e) => inner.report_unreachable(&Error::CommandFailed(e)),
                    }
                });
            }
            Command::GetInfo => self.spawn_info_query(session),
            Command::GetMeterInfo => self.spawn_meter_query(session),
            Command::ClearEvents => self.state.lock().set_actions(ActionSet::cleared()),
            Command::EraseStats => self.spawn_erase_stats(session),
            Command::UpdateActions(actions) => {
                tracing::debug!(node = %self.id, actions = %actions, "Updating enabled actions");
                self.state.lock().set_actions(actions);
            }
        }
    }
}
