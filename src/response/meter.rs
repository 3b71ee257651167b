// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Realtime energy-meter response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Realtime energy-meter reading.
///
/// Current, voltage and power are read for the status indicator; the
/// reading is otherwise forwarded exactly as the device reported it,
/// including fields such as `total` or `err_code`.
///
/// # Examples
///
/// ```
/// use plugflow::response::MeterReading;
///
/// let reading: MeterReading = serde_json::from_str(r#"{
///     "current": 0.0815,
///     "voltage": 229.43,
///     "power": 12.4,
///     "total": 3.21
/// }"#).unwrap();
///
/// assert_eq!(reading.power, Some(12.4));
/// assert!(reading.extra.contains_key("total"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeterReading {
    /// Current in Amperes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,

    /// Voltage in Volts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage: Option<f64>,

    /// Power in Watts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,

    /// Every other field reported by the device.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MeterReading {
    /// Creates a reading with the three displayed quantities.
    #[must_use]
    pub fn new(current: f64, voltage: f64, power: f64) -> Self {
        Self {
            current: Some(current),
            voltage: Some(voltage),
            power: Some(power),
            extra: Map::new(),
        }
    }

    /// Returns `true` if the plug currently draws power.
    #[must_use]
    pub fn is_consuming(&self) -> bool {
        self.power.is_some_and(|watts| watts > 0.0)
    }

    /// Returns every field as a JSON object, in the device's shape.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        let mut fields = self.extra;
        let quantities = [
            ("current", self.current),
            ("voltage", self.voltage),
            ("power", self.power),
        ];
        for (key, value) in quantities {
            if let Some(number) = value.and_then(serde_json::Number::from_f64) {
                fields.insert(key.to_string(), Value::Number(number));
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_fields_round_trip() {
        let raw = json!({
            "current": 0.012,
            "voltage": 231.5,
            "power": 0.0,
            "total": 0.004,
            "err_code": 0
        });
        let reading: MeterReading = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(reading.current, Some(0.012));
        assert_eq!(reading.voltage, Some(231.5));
        assert!(!reading.is_consuming());
        assert_eq!(serde_json::to_value(&reading).unwrap(), raw);
    }

    #[test]
    fn missing_quantities_stay_absent() {
        let reading: MeterReading = serde_json::from_value(json!({"err_code": 0})).unwrap();
        assert_eq!(reading.power, None);
        assert_eq!(serde_json::to_value(&reading).unwrap(), json!({"err_code": 0}));
    }

    #[test]
    fn new_sets_quantities() {
        let reading = MeterReading::new(0.5, 230.0, 115.0);
        assert!(reading.is_consuming());
        assert!(reading.extra.is_empty());
    }

    #[test]
    fn into_map_keeps_device_fields() {
        let reading: MeterReading =
            serde_json::from_value(json!({"power": 5.5, "err_code": 0})).unwrap();
        let map = reading.into_map();

        assert_eq!(map.get("power"), Some(&json!(5.5)));
        assert_eq!(map.get("err_code"), Some(&json!(0)));
        assert!(!map.contains_key("current"));
    }
}
