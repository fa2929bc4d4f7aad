// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adapter and device-list configuration.

use std::time::Duration;

use tracing::warn;

use crate::capabilities::BulbCapability;
use crate::error::ConfigError;
use crate::event::DeviceAddress;
use crate::scheduler::ReconcileConfig;

fn default_settle_delay_ms() -> u64 {
    1000
}

/// One configured bulb: where it lives and how to address it.
///
/// Discovery (or a static list) supplies `(ip_address, mac_id)` pairs; the
/// hub-facing device address is derived from the MAC.
///
/// # Examples
///
/// ```
/// use magichome_lib::manager::BulbEntry;
///
/// let entry = BulbEntry::new("192.168.1.40", "AA:BB:CC:DD:EE:FF")
///     .with_friendly_name("Kitchen strip");
/// assert_eq!(entry.address().unwrap().as_str(), "aabbccddeeff");
/// assert_eq!(entry.display_name(), "Kitchen strip");
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BulbEntry {
    /// IP address or hostname of the controller.
    pub ip_address: String,
    /// Hardware MAC identifier reported by discovery.
    pub mac_id: String,
    /// Optional display name for logs and the hub UI.
    #[serde(default)]
    pub friendly_name: Option<String>,
    /// Capability class, when known up front (skips the probe at attach).
    #[serde(default)]
    pub capability: Option<BulbCapability>,
}

impl BulbEntry {
    /// Creates an entry from an address pair.
    #[must_use]
    pub fn new(ip_address: impl Into<String>, mac_id: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            mac_id: mac_id.into(),
            friendly_name: None,
            capability: None,
        }
    }

    /// Sets a display name.
    #[must_use]
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    /// Sets the capability class, skipping the attach-time probe.
    #[must_use]
    pub fn with_capability(mut self, capability: BulbCapability) -> Self {
        self.capability = Some(capability);
        self
    }

    /// Derives the hub-facing device address from the MAC identifier.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidMac` for an unusable identifier.
    pub fn address(&self) -> Result<DeviceAddress, crate::error::ValueError> {
        DeviceAddress::from_mac(&self.mac_id)
    }

    /// Returns the display name, falling back to the IP address.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.friendly_name.as_deref().unwrap_or(&self.ip_address)
    }

    /// Validates this entry at its position in the device list.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEntry` describing what is wrong.
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.ip_address.trim().is_empty() {
            return Err(ConfigError::InvalidEntry {
                index,
                reason: "empty IP address".to_string(),
            });
        }
        if let Err(e) = self.address() {
            return Err(ConfigError::InvalidEntry {
                index,
                reason: e.to_string(),
            });
        }
        Ok(())
    }
}

/// Top-level adapter configuration.
///
/// Loaded from JSON or built programmatically. Reconciliation tuning is
/// carried as plain fields here and converted into a
/// [`ReconcileConfig`](crate::scheduler::ReconcileConfig) at manager
/// construction — there is no global mutable configuration.
///
/// # Examples
///
/// ```
/// use magichome_lib::manager::AdapterConfig;
///
/// let config = AdapterConfig::from_json(
///     r#"{
///         "settle_delay_ms": 500,
///         "devices": [
///             {"ip_address": "192.168.1.40", "mac_id": "AA:BB:CC:DD:EE:FF"}
///         ]
///     }"#,
/// )
/// .unwrap();
/// assert_eq!(config.devices.len(), 1);
/// assert_eq!(config.reconcile_config().settle_delay.as_millis(), 500);
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AdapterConfig {
    /// Settle delay between a write and its read-back, in milliseconds.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Refresh synchronously before translating each command.
    #[serde(default)]
    pub query_before_command: bool,
    /// The configured device list.
    #[serde(default)]
    pub devices: Vec<BulbEntry>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            query_before_command: false,
            devices: Vec::new(),
        }
    }
}

impl AdapterConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON. Individual device
    /// entries are *not* validated here; see
    /// [`valid_devices`](Self::valid_devices).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the reconciliation tuning for the scheduler.
    #[must_use]
    pub fn reconcile_config(&self) -> ReconcileConfig {
        let config =
            ReconcileConfig::default().with_settle_delay(Duration::from_millis(self.settle_delay_ms));
        if self.query_before_command {
            config.with_query_before_command()
        } else {
            config
        }
    }

    /// Returns the usable device entries with their derived addresses.
    ///
    /// Malformed entries are skipped with a warning; one bad entry never
    /// stops the others from attaching.
    #[must_use]
    pub fn valid_devices(&self) -> Vec<(DeviceAddress, &BulbEntry)> {
        self.devices
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry.validate(index) {
                Ok(()) => {
                    // Validation guarantees the address derives.
                    entry.address().ok().map(|address| (address, entry))
                }
                Err(e) => {
                    warn!(error = %e, "skipping malformed device entry");
                    None
                }
            })
            .collect()
    }
}
