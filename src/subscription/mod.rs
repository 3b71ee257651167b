// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for device push events.
//!
//! Plugs notify their session about relay changes, load changes and
//! connectivity changes without being polled. This module describes those
//! notifications and how to subscribe to them.
//!
//! # Overview
//!
//! - [`PushEvent`] - The six notifications a plug session can raise
//! - [`SubscriptionId`] - A unique identifier for a subscription, used to unsubscribe
//! - [`CallbackRegistry`] - Ready-made registry session implementations can dispatch through
//! - [`Subscribable`] - Trait for sessions that accept subscriptions
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use plugflow::subscription::{CallbackRegistry, PushEvent};
//!
//! let registry = CallbackRegistry::new();
//! let count = Arc::new(AtomicU32::new(0));
//! let seen = Arc::clone(&count);
//!
//! let id = registry.subscribe(PushEvent::PowerOn, move || {
//!     seen.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! registry.dispatch(PushEvent::PowerOn);
//! registry.dispatch(PushEvent::PowerOff);
//! assert_eq!(count.load(Ordering::SeqCst), 1);
//!
//! assert!(registry.unsubscribe(id));
//! ```

mod callback;
mod push_event;
mod subscribable;

pub use callback::{CallbackRegistry, SubscriptionId};
pub use push_event::PushEvent;
pub use subscribable::Subscribable;
