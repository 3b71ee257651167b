// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Push-event forwarding.

use std::sync::{Arc, Weak};

use crate::device::PlugClient;
use crate::event::OutboundMessage;
use crate::subscription::{PushEvent, Subscribable};

use super::Inner;

impl<C: PlugClient> Inner<C> {
    /// Subscribes once to every push event of the session.
    ///
    /// Callbacks hold a weak reference so the session's registry does not
    /// keep the node alive.
    pub(super) fn subscribe_push_events(self: &Arc<Self>, session: &C::Session) {
        let mut ids = Vec::with_capacity(PushEvent::ALL.len());

        for event in PushEvent::ALL {
            let node: Weak<Self> = Arc::downgrade(self);
            let id = session.subscribe(event, move || {
                if let Some(node) = node.upgrade() {
                    node.forward_push_event(event);
                }
            });
            ids.push(id);
        }

        tracing::debug!(node = %self.id, count = ids.len(), "Subscribed to push events");
        self.subscriptions.lock().extend(ids);
    }

    /// Publishes a flag message for `event` if its action kind is enabled.
    fn forward_push_event(&self, event: PushEvent) {
        let enabled = self.state.lock().is_enabled(event.required_action());
        if !enabled {
            tracing::trace!(node = %self.id, event = %event, "Dropping disabled push event");
            return;
        }

        tracing::debug!(node = %self.id, event = %event, "Forwarding push event");
        self.publish_message(OutboundMessage::flag(event.field(), event.value()));
    }
}
