// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// Poll interval used when the configuration does not set one.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(10_000);

/// Configuration for a smart plug node.
///
/// The configuration is fixed once the node is created. A node with an empty
/// `device` address never connects.
///
/// The flow editor stores the interval as a string of milliseconds, so
/// deserialization accepts `"5000"` as well as `5000`. Only the leading
/// integer is read: `"2500ms"` is 2.5 seconds.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use plugflow::node::NodeConfig;
///
/// let config: NodeConfig = serde_json::from_str(
///     r#"{"name": "Desk lamp", "device": "192.168.1.40", "interval": "2500"}"#,
/// ).unwrap();
/// assert_eq!(config.interval(), Duration::from_millis(2500));
///
/// let config = NodeConfig::new("192.168.1.41").with_name("Heater");
/// assert!(config.is_configured());
///
/// assert!(serde_json::from_str::<NodeConfig>(r#"{"device": "x", "interval": "0"}"#).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNodeConfig")]
pub struct NodeConfig {
    name: String,
    device: String,
    #[serde(serialize_with = "serialize_millis")]
    interval: Duration,
}

impl NodeConfig {
    /// Creates a configuration for the plug at `device` with the default
    /// interval.
    #[must_use]
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            device: device.into(),
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the poll interval.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInterval`] if the interval is shorter
    /// than one millisecond.
    pub fn with_interval(mut self, interval: Duration) -> Result<Self, ConfigError> {
        if interval.as_millis() == 0 {
            return Err(ConfigError::InvalidInterval(format!("{interval:?}")));
        }
        self.interval = interval;
        Ok(self)
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the device address.
    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Returns the poll interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` if a device address is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.device.trim().is_empty()
    }
}

/// Configuration as stored by the flow editor.
#[derive(Deserialize)]
struct RawNodeConfig {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    device: Option<String>,
    #[serde(default)]
    interval: Value,
}

impl TryFrom<RawNodeConfig> for NodeConfig {
    type Error = ConfigError;

    fn try_from(raw: RawNodeConfig) -> Result<Self, Self::Error> {
        let interval = match raw.interval {
            Value::Null => DEFAULT_INTERVAL,
            value => Duration::from_millis(parse_interval(&value)?),
        };

        Ok(Self {
            name: raw.name.unwrap_or_default(),
            device: raw.device.unwrap_or_default(),
            interval,
        })
    }
}

/// Reads a positive millisecond count from a number or a numeric string.
fn parse_interval(value: &Value) -> Result<u64, ConfigError> {
    let invalid = || ConfigError::InvalidInterval(value.to_string());

    let millis = match value {
        Value::Number(number) => match number.as_u64() {
            Some(millis) => millis,
            None => number.as_f64().and_then(truncate_millis).ok_or_else(invalid)?,
        },
        Value::String(text) => leading_integer(text).ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };

    if millis == 0 {
        return Err(invalid());
    }
    Ok(millis)
}

/// Drops the fractional part of a millisecond count.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn truncate_millis(millis: f64) -> Option<u64> {
    (millis.is_finite() && millis >= 1.0 && millis < u64::MAX as f64)
        .then(|| millis.trunc() as u64)
}

/// Parses the leading run of digits after optional whitespace and `+`.
fn leading_integer(text: &str) -> Option<u64> {
    let text = text.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

fn serialize_millis<S>(interval: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(u64::try_from(interval.as_millis()).unwrap_or(u64::MAX))
}
