// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plug discovery for configuration front-ends.
//!
//! These helpers back the admin endpoints a flow editor uses while the user
//! configures a node: scanning the network for plugs, and looking up the
//! model of one address. They are independent of any running node.
//!
//! Each call builds its own short-lived client through the factory it is
//! given, so concurrent requests never share a client.
//!
//! # Examples
//!
//! ```ignore
//! use std::time::Duration;
//! use plugflow::discovery::{discover_plugs, lookup_model, DiscoveryOptions};
//!
//! let hosts = discover_plugs(MyClient::new, DiscoveryOptions::new()).await?;
//! for host in &hosts {
//!     let model = lookup_model(MyClient::new, host).await?;
//!     println!("{host}: {model}");
//! }
//! ```

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::device::{PlugClient, PlugSession};
use crate::error::Error;

/// Default discovery window.
const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Kind of device a discovery scan looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// Smart plugs and power strips.
    #[default]
    Plug,
    /// Smart bulbs.
    Bulb,
}

/// A device that answered a discovery probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredDevice {
    /// Network address of the device.
    pub host: String,
    /// Model identifier, if the announcement carried one.
    pub model: Option<String>,
}

impl DiscoveredDevice {
    /// Creates an announcement without a model.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            model: None,
        }
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Options for a discovery scan.
///
/// # Examples
///
/// ```
/// use plugflow::discovery::{DeviceKind, DiscoveryOptions};
/// use std::time::Duration;
///
/// let options = DiscoveryOptions::new().with_timeout(Duration::from_secs(3));
/// assert_eq!(options.timeout(), Duration::from_secs(3));
/// assert_eq!(options.kind(), DeviceKind::Plug);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    timeout: Option<Duration>,
    kind: DeviceKind,
}

impl DiscoveryOptions {
    /// Creates options with a 10 second window that looks for plugs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how long to listen for announcements.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the kind of device to look for.
    #[must_use]
    pub fn with_kind(mut self, kind: DeviceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the discovery window.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_DISCOVERY_TIMEOUT)
    }

    /// Returns the kind of device looked for.
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }
}

/// Scans the network and returns the addresses of the devices that answered.
///
/// Listens for the whole window, then stops discovery. Addresses are
/// returned in the order they were first seen, without duplicates.
///
/// # Errors
///
/// Returns [`Error::Discovery`] if the client cannot start discovery.
pub async fn discover_plugs<C, F>(
    make_client: F,
    options: DiscoveryOptions,
) -> Result<Vec<String>, Error>
where
    C: PlugClient,
    F: FnOnce() -> C,
{
    let client = make_client();
    let timeout = options.timeout();

    tracing::info!(
        kind = ?options.kind(),
        ?timeout,
        "Starting plug discovery"
    );

    let mut announcements = client
        .start_discovery(options.kind())
        .map_err(Error::Discovery)?;

    let deadline = Instant::now() + timeout;
    let mut seen = HashSet::new();
    let mut hosts = Vec::new();

    while let Ok(Some(device)) = tokio::time::timeout_at(deadline, announcements.recv()).await {
        if seen.insert(device.host.clone()) {
            tracing::debug!(host = %device.host, model = ?device.model, "Discovered device");
            hosts.push(device.host);
        }
    }

    client.stop_discovery();

    tracing::info!(count = hosts.len(), "Plug discovery completed");

    Ok(hosts)
}

/// Connects to one address and returns the device model.
///
/// # Errors
///
/// Returns [`Error::MissingAddress`] if `host` is blank, or
/// [`Error::ConnectionFailed`] if the device cannot be reached.
pub async fn lookup_model<C, F>(make_client: F, host: &str) -> Result<String, Error>
where
    C: PlugClient,
    F: FnOnce() -> C,
{
    let host = host.trim();
    if host.is_empty() {
        return Err(Error::MissingAddress);
    }

    let client = make_client();
    let session = client.connect(host).await.map_err(|e| {
        tracing::warn!(host = %host, error = %e, "Model lookup failed");
        Error::ConnectionFailed(e)
    })?;

    Ok(session.model().to_string())
}
