// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node status indicator.
//!
//! The status indicator is the small colored badge a flow editor draws under
//! a node. It is a side channel, not a message: every connection transition
//! and every telemetry answer replaces it. All constructors here are pure.
//!
//! | Situation | Fill | Shape | Text |
//! |-----------|------|-------|------|
//! | Connecting | grey | dot | `initializing…` |
//! | No address configured | red | ring | `not configured` |
//! | Connected | green | dot | `connected` |
//! | No session / device error | red | ring | `not reachable` |
//! | Info: relay on | yellow | dot | `turned on` |
//! | Info: relay off | green | dot | `turned off` |
//! | Meter reading | yellow | dot | `turned on [12.4W: 229.4V@0.082A]` |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::response::MeterReading;
use crate::types::PowerState;

/// Decimal places shown for current, in Amperes.
const CURRENT_DECIMALS: usize = 3;
/// Decimal places shown for voltage, in Volts.
const VOLTAGE_DECIMALS: usize = 1;
/// Decimal places shown for power, in Watts.
const POWER_DECIMALS: usize = 2;

/// Fill color of the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFill {
    /// Transitional state.
    Grey,
    /// Healthy, relay off.
    Green,
    /// Relay on or drawing power.
    Yellow,
    /// Misconfigured or unreachable.
    Red,
}

/// Shape of the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusShape {
    /// Filled dot.
    Dot,
    /// Hollow ring, used for failures.
    Ring,
}

/// A status indicator value.
///
/// # Examples
///
/// ```
/// use plugflow::response::MeterReading;
/// use plugflow::status::{Status, StatusFill, StatusShape};
/// use plugflow::types::PowerState;
///
/// let status = Status::meter(PowerState::On, &MeterReading::new(0.0815, 229.43, 12.4));
/// assert_eq!(status.fill, StatusFill::Yellow);
/// assert_eq!(status.shape, StatusShape::Dot);
/// assert_eq!(status.text, "turned on [12.4W: 229.4V@0.082A]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Fill color.
    pub fill: StatusFill,
    /// Shape.
    pub shape: StatusShape,
    /// Short text shown next to the indicator.
    pub text: String,
}

impl Status {
    /// Creates a status indicator.
    #[must_use]
    pub fn new(fill: StatusFill, shape: StatusShape, text: impl Into<String>) -> Self {
        Self {
            fill,
            shape,
            text: text.into(),
        }
    }

    /// Shown while the initial connection attempt is pending.
    #[must_use]
    pub fn initializing() -> Self {
        Self::new(StatusFill::Grey, StatusShape::Dot, "initializing…")
    }

    /// Shown for the lifetime of a node without a device address.
    #[must_use]
    pub fn not_configured() -> Self {
        Self::new(StatusFill::Red, StatusShape::Ring, "not configured")
    }

    /// Shown once the session is established.
    #[must_use]
    pub fn connected() -> Self {
        Self::new(StatusFill::Green, StatusShape::Dot, "connected")
    }

    /// Shown when there is no session or the device failed a request.
    #[must_use]
    pub fn unreachable() -> Self {
        Self::new(StatusFill::Red, StatusShape::Ring, "not reachable")
    }

    /// Projects the relay state from an info query.
    #[must_use]
    pub fn relay(state: PowerState) -> Self {
        match state {
            PowerState::On => Self::new(StatusFill::Yellow, StatusShape::Dot, state.label()),
            PowerState::Off => Self::new(StatusFill::Green, StatusShape::Dot, state.label()),
        }
    }

    /// Projects a meter reading, labelled with the last known relay state.
    ///
    /// Missing quantities are shown as `0`.
    #[must_use]
    pub fn meter(state: PowerState, reading: &MeterReading) -> Self {
        let power = format_decimals(reading.power.unwrap_or_default(), POWER_DECIMALS);
        let voltage = format_decimals(reading.voltage.unwrap_or_default(), VOLTAGE_DECIMALS);
        let current = format_decimals(reading.current.unwrap_or_default(), CURRENT_DECIMALS);

        Self::new(
            StatusFill::Yellow,
            StatusShape::Dot,
            format!("{} [{power}W: {voltage}V@{current}A]", state.label()),
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Formats `value` with at most `max_decimals` decimals, dropping trailing
/// zeros and a trailing decimal point.
fn format_decimals(value: f64, max_decimals: usize) -> String {
    let mut text = format!("{value:.max_decimals$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_indicators() {
        assert_eq!(
            Status::initializing(),
            Status::new(StatusFill::Grey, StatusShape::Dot, "initializing…")
        );
        assert_eq!(Status::not_configured().shape, StatusShape::Ring);
        assert_eq!(Status::connected().fill, StatusFill::Green);
        assert_eq!(Status::unreachable().text, "not reachable");
    }

    #[test]
    fn relay_projection() {
        let on = Status::relay(PowerState::On);
        assert_eq!((on.fill, on.shape, on.text.as_str()), (StatusFill::Yellow, StatusShape::Dot, "turned on"));

        let off = Status::relay(PowerState::Off);
        assert_eq!((off.fill, off.text.as_str()), (StatusFill::Green, "turned off"));
    }

    #[test]
    fn meter_projection_uses_last_relay_state() {
        let reading = MeterReading::new(0.5, 230.0, 115.0);
        assert_eq!(
            Status::meter(PowerState::Off, &reading).text,
            "turned off [115W: 230V@0.5A]"
        );
    }

    #[test]
    fn meter_projection_with_missing_values() {
        let status = Status::meter(PowerState::On, &MeterReading::default());
        assert_eq!(status.text, "turned on [0W: 0V@0A]");
        assert_eq!(status.fill, StatusFill::Yellow);
    }

    #[test]
    fn format_decimals_trims() {
        assert_eq!(format_decimals(12.0, 2), "12");
        assert_eq!(format_decimals(12.5, 2), "12.5");
        assert_eq!(format_decimals(12.345_67, 2), "12.35");
        assert_eq!(format_decimals(229.96, 1), "230");
        assert_eq!(format_decimals(0.0004, 3), "0");
        assert_eq!(format_decimals(-0.0001, 3), "0");
        assert_eq!(format_decimals(0.0815, 3), "0.082");
        assert_eq!(format_decimals(100.0, 0), "100");
    }

    #[test]
    fn serializes_lowercase() {
        let value = serde_json::to_value(Status::unreachable()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"fill": "red", "shape": "ring", "text": "not reachable"})
        );
    }
}
