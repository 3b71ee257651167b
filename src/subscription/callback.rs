// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for push-event subscriptions.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use super::PushEvent;

/// Unique identifier for a subscription.
///
/// IDs are unique within one registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a subscription ID with the given value.
    ///
    /// Session implementations that keep their own registry use this to mint
    /// IDs; the [`CallbackRegistry`] mints them itself.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type PushCallback = Arc<dyn Fn() + Send + Sync>;

/// Registry for push-event callbacks.
///
/// Device client implementations embed one registry per session and call
/// [`dispatch`](Self::dispatch) whenever the device raises an event.
///
/// # Thread Safety
///
/// The registry uses `parking_lot::RwLock` and can be shared between tasks.
/// Callbacks are cloned out of the lock before they run, so a callback may
/// subscribe or unsubscribe without deadlocking.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    callbacks: RwLock<HashMap<PushEvent, HashMap<SubscriptionId, PushCallback>>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            callbacks: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers a callback for one push event.
    pub fn subscribe<F>(&self, event: PushEvent, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.callbacks
            .write()
            .entry(event)
            .or_default()
            .insert(id, Arc::new(callback));
        id
    }

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks
            .write()
            .values_mut()
            .any(|by_id| by_id.remove(&id).is_some())
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.callbacks.write().clear();
    }

    /// Runs every callback registered for `event`.
    ///
    /// Returns the number of callbacks invoked.
    pub fn dispatch(&self, event: PushEvent) -> usize {
        let callbacks: Vec<PushCallback> = self
            .callbacks
            .read()
            .get(&event)
            .map(|by_id| by_id.values().cloned().collect())
            .unwrap_or_default();

        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    /// Returns the number of callbacks registered for `event`.
    #[must_use]
    pub fn subscriber_count(&self, event: PushEvent) -> usize {
        self.callbacks.read().get(&event).map_or(0, HashMap::len)
    }

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().values().map(HashMap::len).sum()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn subscription_id_display() {
        let id = SubscriptionId::new(42);
        assert_eq!(id.to_string(), "Sub(42)");
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.callback_count(), 0);
    }

    #[test]
    fn dispatch_only_reaches_matching_event() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        registry.subscribe(PushEvent::InUse, move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(registry.dispatch(PushEvent::NotInUse), 0);
        assert_eq!(registry.dispatch(PushEvent::InUse), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let id = registry.subscribe(PushEvent::PowerOn, move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        registry.dispatch(PushEvent::PowerOn);

        assert!(registry.unsubscribe(id));
        assert!(registry.is_empty());

        registry.dispatch(PushEvent::PowerOn);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_nonexistent() {
        let registry = CallbackRegistry::new();
        assert!(!registry.unsubscribe(SubscriptionId::new(999)));
    }

    #[test]
    fn multiple_callbacks_same_event() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let c1 = counter.clone();
        let c2 = counter.clone();

        registry.subscribe(PushEvent::DeviceOffline, move || {
            c1.fetch_add(1, Ordering::SeqCst);
        });
        registry.subscribe(PushEvent::DeviceOffline, move || {
            c2.fetch_add(10, Ordering::SeqCst);
        });

        assert_eq!(registry.subscriber_count(PushEvent::DeviceOffline), 2);
        assert_eq!(registry.dispatch(PushEvent::DeviceOffline), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn callback_may_unsubscribe_itself() {
        let registry = Arc::new(CallbackRegistry::new());
        let slot = Arc::new(parking_lot::Mutex::new(None::<SubscriptionId>));

        let registry_clone = Arc::clone(&registry);
        let slot_clone = Arc::clone(&slot);
        let id = registry.subscribe(PushEvent::PowerOff, move || {
            if let Some(id) = *slot_clone.lock() {
                registry_clone.unsubscribe(id);
            }
        });
        *slot.lock() = Some(id);

        registry.dispatch(PushEvent::PowerOff);
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_unique_ids() {
        let registry = CallbackRegistry::new();

        let id1 = registry.subscribe(PushEvent::PowerOn, || {});
        let id2 = registry.subscribe(PushEvent::PowerOn, || {});
        let id3 = registry.subscribe(PushEvent::InUse, || {});

        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_ne!(id1, id3);
    }

    #[test]
    fn registry_clear() {
        let registry = CallbackRegistry::new();
        for event in PushEvent::ALL {
            registry.subscribe(event, || {});
        }
        assert_eq!(registry.callback_count(), 6);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_debug() {
        let registry = CallbackRegistry::new();
        registry.subscribe(PushEvent::PowerOn, || {});

        let debug = format!("{registry:?}");
        assert!(debug.contains("CallbackRegistry"));
        assert!(debug.contains("callback_count"));
    }
}
