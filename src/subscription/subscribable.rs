// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for sessions that raise push events.

use crate::subscription::{PushEvent, SubscriptionId};

/// Trait for types that deliver [`PushEvent`]s to callbacks.
///
/// Every [`PlugSession`](crate::device::PlugSession) is subscribable. The
/// simplest implementation delegates to an embedded
/// [`CallbackRegistry`](crate::subscription::CallbackRegistry).
///
/// # Examples
///
/// ```
/// use plugflow::subscription::{CallbackRegistry, PushEvent, Subscribable, SubscriptionId};
///
/// struct Session {
///     callbacks: CallbackRegistry,
/// }
///
/// impl Subscribable for Session {
///     fn subscribe<F>(&self, event: PushEvent, callback: F) -> SubscriptionId
///     where
///         F: Fn() + Send + Sync + 'static,
///     {
///         self.callbacks.subscribe(event, callback)
///     }
///
///     fn unsubscribe(&self, id: SubscriptionId) -> bool {
///         self.callbacks.unsubscribe(id)
///     }
/// }
/// ```
pub trait Subscribable {
    /// Registers a callback for one push event.
    ///
    /// The callback runs every time the event is raised until it is
    /// unsubscribed.
    fn subscribe<F>(&self, event: PushEvent, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
