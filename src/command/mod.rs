// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inbound command definitions.
//!
//! Every message a node receives is turned into exactly one [`Command`]
//! based on its payload.
//!
//! # Payloads
//!
//! | Payload | Command | Effect |
//! |---------|---------|--------|
//! | `true` / `false` | [`Command::SetPower`] | Switch the relay, then report info |
//! | `"getInfo"` | [`Command::GetInfo`] | Report system info now |
//! | `"getMeterInfo"` | [`Command::GetMeterInfo`] | Report a meter reading now |
//! | `"clearEvents"` | [`Command::ClearEvents`] | Disable all periodic reports and push events |
//! | `"eraseStats"` | [`Command::EraseStats`] | Erase the meter statistics |
//! | any other string | [`Command::UpdateActions`] | Replace the enabled action kinds |
//!
//! Fixed commands are matched exactly and case-sensitively. Any other string
//! is read as a `|`-separated list of action tokens.
//!
//! # Examples
//!
//! ```
//! use plugflow::command::Command;
//! use plugflow::types::ActionKind;
//! use serde_json::json;
//!
//! let cmd = Command::from_payload(&json!("getInfoEvents|getInUseEvents")).unwrap();
//! let Command::UpdateActions(actions) = cmd else { unreachable!() };
//! assert!(actions.contains(ActionKind::InUseEvents));
//!
//! assert!(Command::from_payload(&json!(42)).is_err());
//! ```

mod inbound;

pub use inbound::InboundMessage;

use serde_json::Value;

use crate::error::ParseError;
use crate::types::{ActionSet, CLEAR_EVENTS, PowerState};

const GET_INFO: &str = "getInfo";
const GET_METER_INFO: &str = "getMeterInfo";
const ERASE_STATS: &str = "eraseStats";

/// A command carried by an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch the relay.
    SetPower(PowerState),
    /// Query system info immediately.
    GetInfo,
    /// Query the energy meter immediately.
    GetMeterInfo,
    /// Disable every action kind.
    ClearEvents,
    /// Erase the energy meter's accumulated statistics.
    EraseStats,
    /// Replace the enabled action kinds.
    UpdateActions(ActionSet),
}

impl Command {
    /// Parses a message payload.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnsupportedType`] for numbers, arrays, objects
    /// and `null`.
    pub fn from_payload(payload: &Value) -> Result<Self, ParseError> {
        match payload {
            Value::Bool(on) => Ok(Self::SetPower(PowerState::from(*on))),
            Value::String(text) => Ok(Self::from_text(text)),
            Value::Null => Err(ParseError::UnsupportedType("null")),
            Value::Number(_) => Err(ParseError::UnsupportedType("number")),
            Value::Array(_) => Err(ParseError::UnsupportedType("array")),
            Value::Object(_) => Err(ParseError::UnsupportedType("object")),
        }
    }

    fn from_text(text: &str) -> Self {
        match text {
            GET_INFO => Self::GetInfo,
            GET_METER_INFO => Self::GetMeterInfo,
            CLEAR_EVENTS => Self::ClearEvents,
            ERASE_STATS => Self::EraseStats,
            list => Self::UpdateActions(ActionSet::parse(list)),
        }
    }
}
