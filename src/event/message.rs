// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound flow messages.

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload field that carries the emission time.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Returns the current local time as an RFC 3339 string with offset,
/// e.g. `2024-05-01T14:03:07+02:00`.
#[must_use]
pub fn timestamp_now() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// A message a node sends to the next nodes in the flow.
///
/// Telemetry and push-event payloads are JSON objects stamped with a
/// `timestamp` field at the moment the message is built. Erase-stats
/// results are forwarded raw.
///
/// # Examples
///
/// ```
/// use plugflow::event::OutboundMessage;
/// use serde_json::{json, Map};
///
/// let mut fields = Map::new();
/// fields.insert("powerOn".to_string(), json!(true));
///
/// let msg = OutboundMessage::stamped(fields);
/// assert_eq!(msg.field("powerOn"), Some(&json!(true)));
/// assert!(msg.timestamp().is_some());
///
/// let raw = OutboundMessage::raw(json!({"err_code": 0}));
/// assert!(raw.timestamp().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// The message payload.
    pub payload: Value,
}

impl OutboundMessage {
    /// Builds a message from an object payload, adding the current time
    /// under [`TIMESTAMP_FIELD`]. An existing `timestamp` field is replaced.
    #[must_use]
    pub fn stamped(mut fields: Map<String, Value>) -> Self {
        fields.insert(TIMESTAMP_FIELD.to_string(), Value::String(timestamp_now()));
        Self {
            payload: Value::Object(fields),
        }
    }

    /// Builds a message with a single boolean field plus timestamp.
    #[must_use]
    pub fn flag(field: &str, value: bool) -> Self {
        let mut fields = Map::new();
        fields.insert(field.to_string(), Value::Bool(value));
        Self::stamped(fields)
    }

    /// Builds a message whose payload is passed through unchanged.
    #[must_use]
    pub fn raw(payload: Value) -> Self {
        Self { payload }
    }

    /// Returns the payload timestamp, if the message was stamped.
    #[must_use]
    pub fn timestamp(&self) -> Option<&str> {
        self.field(TIMESTAMP_FIELD).and_then(Value::as_str)
    }

    /// Returns a payload field, if the payload is an object.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.as_object().and_then(|fields| fields.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn timestamp_is_rfc3339() {
        let stamp = timestamp_now();
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok(), "{stamp}");
    }

    #[test]
    fn stamped_keeps_fields_and_adds_timestamp() {
        let mut fields = Map::new();
        fields.insert("relay_state".to_string(), json!(1));
        fields.insert("timestamp".to_string(), json!("stale"));

        let msg = OutboundMessage::stamped(fields);

        assert_eq!(msg.field("relay_state"), Some(&json!(1)));
        assert_ne!(msg.timestamp(), Some("stale"));
        assert!(msg.timestamp().is_some());
    }

    #[test]
    fn flag_has_two_fields() {
        let msg = OutboundMessage::flag("online", false);
        let fields = msg.payload.as_object().unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("online"), Some(&json!(false)));
    }

    #[test]
    fn raw_payload_is_untouched() {
        let msg = OutboundMessage::raw(json!("done"));
        assert_eq!(msg.payload, json!("done"));
        assert_eq!(msg.field("timestamp"), None);
    }
}
