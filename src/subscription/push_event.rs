// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Push notifications raised by a plug session.

use std::fmt;
use std::str::FromStr;

use crate::types::ActionKind;

/// A notification raised by the plug session itself.
///
/// Events come in pairs; each pair is forwarded under one payload field and
/// enabled by one [`ActionKind`].
///
/// # Examples
///
/// ```
/// use plugflow::subscription::PushEvent;
/// use plugflow::types::ActionKind;
///
/// let event: PushEvent = "not-in-use".parse().unwrap();
/// assert_eq!(event, PushEvent::NotInUse);
/// assert_eq!(event.field(), "inUse");
/// assert!(!event.value());
/// assert_eq!(event.required_action(), ActionKind::InUseEvents);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushEvent {
    /// The relay switched on.
    PowerOn,
    /// The relay switched off.
    PowerOff,
    /// The attached load started drawing power.
    InUse,
    /// The attached load stopped drawing power.
    NotInUse,
    /// The device answered again after being unreachable.
    DeviceOnline,
    /// The device stopped answering.
    DeviceOffline,
}

impl PushEvent {
    /// All push events.
    pub const ALL: [Self; 6] = [
        Self::PowerOn,
        Self::PowerOff,
        Self::InUse,
        Self::NotInUse,
        Self::DeviceOnline,
        Self::DeviceOffline,
    ];

    /// Returns the event name used by device clients.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PowerOn => "power-on",
            Self::PowerOff => "power-off",
            Self::InUse => "in-use",
            Self::NotInUse => "not-in-use",
            Self::DeviceOnline => "device-online",
            Self::DeviceOffline => "device-offline",
        }
    }

    /// Returns the payload field this event is reported under.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::PowerOn | Self::PowerOff => "powerOn",
            Self::InUse | Self::NotInUse => "inUse",
            Self::DeviceOnline | Self::DeviceOffline => "online",
        }
    }

    /// Returns the boolean value reported for this event.
    #[must_use]
    pub const fn value(&self) -> bool {
        matches!(self, Self::PowerOn | Self::InUse | Self::DeviceOnline)
    }

    /// Returns the action that must be enabled for this event to be forwarded.
    #[must_use]
    pub const fn required_action(&self) -> ActionKind {
        match self {
            Self::PowerOn | Self::PowerOff => ActionKind::PowerUpdateEvents,
            Self::InUse | Self::NotInUse => ActionKind::InUseEvents,
            Self::DeviceOnline | Self::DeviceOffline => ActionKind::OnlineEvents,
        }
    }
}

impl fmt::Display for PushEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PushEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| format!("unknown push event: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for event in PushEvent::ALL {
            assert_eq!(event.name().parse::<PushEvent>().unwrap(), event);
        }
        assert!("power-toggle".parse::<PushEvent>().is_err());
    }

    #[test]
    fn pairs_share_field_and_action() {
        let pairs = [
            (PushEvent::PowerOn, PushEvent::PowerOff),
            (PushEvent::InUse, PushEvent::NotInUse),
            (PushEvent::DeviceOnline, PushEvent::DeviceOffline),
        ];
        for (positive, negative) in pairs {
            assert_eq!(positive.field(), negative.field());
            assert_eq!(positive.required_action(), negative.required_action());
            assert!(positive.value());
            assert!(!negative.value());
        }
    }

    #[test]
    fn online_events_map_to_online_field() {
        assert_eq!(PushEvent::DeviceOffline.field(), "online");
        assert_eq!(
            PushEvent::DeviceOnline.required_action(),
            ActionKind::OnlineEvents
        );
    }
}
