// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inbound flow messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Command;
use crate::error::ParseError;

/// A message delivered to a node by the flow engine.
///
/// Only the `payload` is read. A message without one carries `null`, which
/// no command accepts.
///
/// # Examples
///
/// ```
/// use plugflow::command::{Command, InboundMessage};
/// use plugflow::types::PowerState;
///
/// let msg: InboundMessage = serde_json::from_str(r#"{"payload": true, "topic": "x"}"#).unwrap();
/// assert_eq!(msg.command().unwrap(), Command::SetPower(PowerState::On));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// The message payload.
    #[serde(default)]
    pub payload: Value,
}

impl InboundMessage {
    /// Creates a message with the given payload.
    #[must_use]
    pub fn new(payload: impl Into<Value>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Parses the payload into a command.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnsupportedType`] if the payload is neither a
    /// boolean nor a string.
    pub fn command(&self) -> Result<Command, ParseError> {
        Command::from_payload(&self.payload)
    }
}

impl From<Value> for InboundMessage {
    fn from(payload: Value) -> Self {
        Self { payload }
    }
}
