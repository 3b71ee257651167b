// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! System info response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::PowerState;

/// Raw system info object reported by the plug.
///
/// Only `relay_state` is interpreted by the node; every other field is
/// forwarded untouched.
///
/// # Examples
///
/// ```
/// use plugflow::response::SysInfo;
/// use plugflow::types::PowerState;
///
/// let info: SysInfo = serde_json::from_str(r#"{
///     "alias": "Desk lamp",
///     "model": "HS110(EU)",
///     "relay_state": 1
/// }"#).unwrap();
///
/// assert_eq!(info.relay_state(), Some(1));
/// assert_eq!(info.power_state(), PowerState::On);
/// assert_eq!(info.model(), Some("HS110(EU)"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SysInfo(Map<String, Value>);

impl SysInfo {
    /// Wraps a raw JSON object.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the raw `relay_state` value, if present and numeric.
    #[must_use]
    pub fn relay_state(&self) -> Option<u64> {
        self.0.get("relay_state").and_then(Value::as_u64)
    }

    /// Returns the relay state. Anything other than `relay_state == 1` is off.
    #[must_use]
    pub fn power_state(&self) -> PowerState {
        PowerState::from(self.relay_state() == Some(1))
    }

    /// Returns the device model identifier.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.0.get("model").and_then(Value::as_str)
    }

    /// Returns the user-assigned device alias.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.0.get("alias").and_then(Value::as_str)
    }

    /// Returns a raw field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Consumes the response and returns the raw object.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for SysInfo {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info(value: Value) -> SysInfo {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn relay_state_one_is_on() {
        assert_eq!(info(json!({"relay_state": 1})).power_state(), PowerState::On);
    }

    #[test]
    fn relay_state_other_values_are_off() {
        assert_eq!(info(json!({"relay_state": 0})).power_state(), PowerState::Off);
        assert_eq!(info(json!({"relay_state": "1"})).power_state(), PowerState::Off);
        assert_eq!(info(json!({})).power_state(), PowerState::Off);
    }

    #[test]
    fn unknown_fields_are_preserved() {
        let raw = json!({"relay_state": 1, "sw_ver": "1.5.6", "led_off": 0});
        let sys = info(raw.clone());

        assert_eq!(sys.get("sw_ver"), Some(&json!("1.5.6")));
        assert_eq!(serde_json::to_value(&sys).unwrap(), raw);
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(serde_json::from_value::<SysInfo>(json!([1, 2])).is_err());
    }
}
