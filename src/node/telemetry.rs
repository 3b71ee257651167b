// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Info, meter and erase-stats queries.

use std::sync::Arc;

use crate::device::{EnergyMeter, PlugClient, PlugSession};
use crate::error::Error;
use crate::event::OutboundMessage;
use crate::status::Status;

use super::Inner;

impl<C: PlugClient> Inner<C> {
    pub(super) fn spawn_info_query(self: &Arc<Self>, session: &Arc<C::Session>) {
        let inner = Arc::clone(self);
        let session = Arc::clone(session);
        tokio::spawn(async move { inner.query_info(&session).await });
    }

    pub(super) fn spawn_meter_query(self: &Arc<Self>, session: &Arc<C::Session>) {
        let inner = Arc::clone(self);
        let session = Arc::clone(session);
        tokio::spawn(async move { inner.query_meter(&session).await });
    }

    pub(super) fn spawn_erase_stats(self: &Arc<Self>, session: &Arc<C::Session>) {
        let inner = Arc::clone(self);
        let session = Arc::clone(session);
        tokio::spawn(async move { inner.erase_stats(&session).await });
    }

    /// Reads system info, records the relay state and publishes the info.
    pub(super) async fn query_info(&self, session: &C::Session) {
        let info = match session.sys_info().await {
            Ok(info) => info,
            Err(e) => {
                self.report_unreachable(&Error::TelemetryFailed(e));
                return;
            }
        };

        let power = info.power_state();
        self.state.lock().set_display(power);
        tracing::debug!(node = %self.id, power = %power, "Received system info");

        self.publish_status(Status::relay(power));
        self.publish_message(OutboundMessage::stamped(info.into_map()));
    }

    /// Reads the energy meter and publishes the reading.
    async fn query_meter(&self, session: &C::Session) {
        let reading = match session.emeter().realtime().await {
            Ok(reading) => reading,
            Err(e) => {
                self.report_unreachable(&Error::TelemetryFailed(e));
                return;
            }
        };

        let power = self.state.lock().display_state();
        tracing::debug!(
            node = %self.id,
            current = ?reading.current,
            voltage = ?reading.voltage,
            power = ?reading.power,
            "Received meter reading"
        );

        self.publish_status(Status::meter(power, &reading));
        self.publish_message(OutboundMessage::stamped(reading.into_map()));
    }

    /// Erases the meter statistics and forwards the device's answer as is.
    async fn erase_stats(&self, session: &C::Session) {
        match session.emeter().erase_stats().await {
            Ok(result) => {
                tracing::info!(node = %self.id, "Erased meter statistics");
                self.publish_message(OutboundMessage::raw(result));
            }
            Err(e) => self.report_unreachable(&Error::CommandFailed(e)),
        }
    }
}
