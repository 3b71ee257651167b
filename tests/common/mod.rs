// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory plug shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use plugflow::device::{EnergyMeter, PlugClient, PlugSession};
use plugflow::discovery::{DeviceKind, DiscoveredDevice};
use plugflow::error::DeviceError;
use plugflow::event::NodeEvent;
use plugflow::response::{MeterReading, SysInfo};
use plugflow::subscription::{CallbackRegistry, PushEvent, Subscribable, SubscriptionId};
use plugflow::types::PowerState;
use serde_json::{Value, json};
use tokio::sync::{Notify, broadcast, mpsc};

/// Model reported by the fake plug.
pub const MODEL: &str = "HS110(EU)";

/// Observable state of one fake plug.
#[derive(Default)]
pub struct PlugState {
    pub refuse_connect: AtomicBool,
    pub hold_connect: AtomicBool,
    pub fail_telemetry: AtomicBool,
    pub fail_power: AtomicBool,
    pub fail_erase: AtomicBool,
    pub relay: Mutex<PowerState>,
    pub reading: Mutex<MeterReading>,
    pub connects: Mutex<Vec<String>>,
    pub polling: Mutex<Option<Duration>>,
    pub power_calls: Mutex<Vec<PowerState>>,
    pub info_calls: AtomicUsize,
    pub meter_calls: AtomicUsize,
    pub erase_calls: AtomicUsize,
    pub callbacks: CallbackRegistry,
    release: Notify,
}

/// Handle to a fake plug. Clones share the same device.
#[derive(Clone, Default)]
pub struct FakePlug(Arc<PlugState>);

impl FakePlug {
    pub fn new() -> Self {
        Self::default()
    }

    /// A plug that refuses every connection.
    pub fn unreachable() -> Self {
        let plug = Self::new();
        plug.refuse_connect.store(true, Ordering::SeqCst);
        plug
    }

    /// A plug whose connection attempt blocks until [`release`](Self::release).
    pub fn held() -> Self {
        let plug = Self::new();
        plug.hold_connect.store(true, Ordering::SeqCst);
        plug
    }

    pub fn client(&self) -> FakeClient {
        FakeClient(self.clone())
    }

    pub fn release(&self) {
        self.hold_connect.store(false, Ordering::SeqCst);
        self.release.notify_one();
    }

    pub fn set_reading(&self, reading: MeterReading) {
        *self.reading.lock() = reading;
    }

    /// Raises a push event the way a client's own polling would.
    pub fn push(&self, event: PushEvent) -> usize {
        self.callbacks.dispatch(event)
    }

    pub fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst)
    }

    pub fn meter_calls(&self) -> usize {
        self.meter_calls.load(Ordering::SeqCst)
    }

    pub fn erase_calls(&self) -> usize {
        self.erase_calls.load(Ordering::SeqCst)
    }
}

impl std::ops::Deref for FakePlug {
    type Target = PlugState;

    fn deref(&self) -> &PlugState {
        &self.0
    }
}

pub struct FakeClient(FakePlug);

impl PlugClient for FakeClient {
    type Session = FakeSession;

    async fn connect(&self, host: &str) -> Result<FakeSession, DeviceError> {
        let plug = &self.0;
        plug.connects.lock().push(host.to_string());

        if plug.hold_connect.load(Ordering::SeqCst) {
            plug.release.notified().await;
        }
        if plug.refuse_connect.load(Ordering::SeqCst) {
            return Err(DeviceError::Connection(format!("connect ECONNREFUSED {host}:9999")));
        }

        Ok(FakeSession {
            meter: FakeMeter(plug.clone()),
            plug: plug.clone(),
        })
    }

    fn start_discovery(
        &self,
        _kind: DeviceKind,
    ) -> Result<mpsc::UnboundedReceiver<DiscoveredDevice>, DeviceError> {
        let (_tx, rx) = mpsc::unbounded_channel();
        Ok(rx)
    }

    fn stop_discovery(&self) {}
}

pub struct FakeSession {
    plug: FakePlug,
    meter: FakeMeter,
}

impl Subscribable for FakeSession {
    fn subscribe<F>(&self, event: PushEvent, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.plug.callbacks.subscribe(event, callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.plug.callbacks.unsubscribe(id)
    }
}

impl PlugSession for FakeSession {
    type Meter = FakeMeter;

    fn model(&self) -> &str {
        MODEL
    }

    fn start_polling(&self, interval: Duration) {
        *self.plug.polling.lock() = Some(interval);
    }

    async fn sys_info(&self) -> Result<SysInfo, DeviceError> {
        self.plug.info_calls.fetch_add(1, Ordering::SeqCst);
        if self.plug.fail_telemetry.load(Ordering::SeqCst) {
            return Err(DeviceError::Timeout(5000));
        }

        let relay_state = u8::from(self.plug.relay.lock().is_on());
        let info = json!({
            "alias": "Kettle",
            "model": MODEL,
            "relay_state": relay_state,
            "led_off": 0,
        });
        Ok(serde_json::from_value(info).unwrap())
    }

    async fn set_power_state(&self, state: PowerState) -> Result<(), DeviceError> {
        self.plug.power_calls.lock().push(state);
        if self.plug.fail_power.load(Ordering::SeqCst) {
            return Err(DeviceError::Rejected("module not support".to_string()));
        }
        *self.plug.relay.lock() = state;
        Ok(())
    }

    fn emeter(&self) -> &FakeMeter {
        &self.meter
    }
}

pub struct FakeMeter(FakePlug);

impl EnergyMeter for FakeMeter {
    async fn realtime(&self) -> Result<MeterReading, DeviceError> {
        self.0.meter_calls.fetch_add(1, Ordering::SeqCst);
        if self.0.fail_telemetry.load(Ordering::SeqCst) {
            return Err(DeviceError::Timeout(5000));
        }
        Ok(self.0.reading.lock().clone())
    }

    async fn erase_stats(&self) -> Result<Value, DeviceError> {
        self.0.erase_calls.fetch_add(1, Ordering::SeqCst);
        if self.0.fail_erase.load(Ordering::SeqCst) {
            return Err(DeviceError::Rejected("erase failed".to_string()));
        }
        Ok(json!({"err_code": 0}))
    }
}

/// Lets every spawned task run to completion without moving the clock.
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

/// Advances the paused clock and lets the woken tasks run.
pub async fn advance(duration: Duration) {
    tokio::time::advance(duration).await;
    settle().await;
}

/// Returns every event published since the last drain.
pub fn drain(events: &mut broadcast::Receiver<NodeEvent>) -> Vec<NodeEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}

pub fn statuses(events: &[NodeEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(NodeEvent::as_status)
        .map(|status| status.text.clone())
        .collect()
}

pub fn errors(events: &[NodeEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(NodeEvent::as_error)
        .map(str::to_string)
        .collect()
}

pub fn payloads(events: &[NodeEvent]) -> Vec<Value> {
    events
        .iter()
        .filter_map(NodeEvent::as_message)
        .map(|message| message.payload.clone())
        .collect()
}
