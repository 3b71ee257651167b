// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `plugflow` library.
//!
//! The hierarchy mirrors the places a node can fail: configuration
//! validation, inbound payload parsing, and the device client itself.
//! Every error a running node reports is published on its event bus as a
//! [`NodeEvent::Error`](crate::event::NodeEvent::Error); none of them stop
//! the node from handling later, unrelated work.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The node has no device address and never connects.
    #[error("not configured")]
    NotConfigured,

    /// The one-time connection attempt at startup was rejected.
    #[error("connection failed: {0}")]
    ConnectionFailed(#[source] DeviceError),

    /// No session exists when a tick or an inbound message needs one.
    #[error("not reachable")]
    Unreachable,

    /// The device rejected a power-state command.
    #[error("command failed: {0}")]
    CommandFailed(#[source] DeviceError),

    /// An info or meter query was rejected.
    #[error("telemetry query failed: {0}")]
    TelemetryFailed(#[source] DeviceError),

    /// The inbound payload could not be turned into a command.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] ParseError),

    /// A device lookup was requested without an address.
    #[error("missing device address")]
    MissingAddress,

    /// Network discovery could not be started.
    #[error("discovery failed: {0}")]
    Discovery(#[source] DeviceError),

    /// The node configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns `true` if this error leaves the node without a session for
    /// the rest of its lifetime.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::NotConfigured | Self::ConnectionFailed(_))
    }
}

/// Errors reported by a device client implementation.
///
/// The device protocol is opaque to this crate, so client implementations
/// map their own failures onto these variants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The device could not be reached or refused the connection.
    #[error("connection refused: {0}")]
    Connection(String),

    /// The device did not answer.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The device answered with an error.
    #[error("command rejected: {0}")]
    Rejected(String),

    /// The device answered with something that could not be decoded.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Errors related to parsing inbound payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The payload has a JSON type no command accepts.
    #[error("unsupported payload type: {0}")]
    UnsupportedType(&'static str),
}

/// Errors related to node configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The poll interval is not a positive integer.
    #[error("invalid poll interval: {0}")]
    InvalidInterval(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
