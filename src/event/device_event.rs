// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device event types.

use crate::shadow::DeviceAttributes;

use super::DeviceAddress;

/// Events emitted by the bulb manager.
///
/// These events notify subscribers about device lifecycle, connectivity, and
/// attribute changes. Every event carries the device address so a hub
/// adapter can route it to the right node.
#[derive(Debug, Clone)]
pub enum DeviceEvent {
    /// A bulb was attached to the manager.
    DeviceAdded {
        /// The address of the attached device.
        address: DeviceAddress,
    },

    /// Device connectivity changed.
    ///
    /// Emitted when a refresh or write flips the connected flag, including
    /// from the periodic poll — the only mechanism that notices a bulb
    /// silently dropping off the network.
    ConnectionChanged {
        /// The address of the device.
        address: DeviceAddress,
        /// Whether the device is now reachable.
        connected: bool,
        /// Error message when connectivity was lost.
        error: Option<String>,
    },

    /// The shadow converged onto new hardware state.
    ///
    /// Emitted after every successful refresh that changed the hub-visible
    /// attributes.
    StateChanged {
        /// The address of the device.
        address: DeviceAddress,
        /// The complete new attribute snapshot.
        attributes: DeviceAttributes,
    },
}

impl DeviceEvent {
    /// Returns the device address associated with this event.
    #[must_use]
    pub fn address(&self) -> &DeviceAddress {
        match self {
            Self::DeviceAdded { address }
            | Self::ConnectionChanged { address, .. }
            | Self::StateChanged { address, .. } => address,
        }
    }

    /// Returns `true` if this is a connectivity event.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::ConnectionChanged { .. })
    }

    /// Returns `true` if this is an attribute change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Creates a device added event.
    #[must_use]
    pub fn device_added(address: DeviceAddress) -> Self {
        Self::DeviceAdded { address }
    }

    /// Creates a connected event.
    #[must_use]
    pub fn connected(address: DeviceAddress) -> Self {
        Self::ConnectionChanged {
            address,
            connected: true,
            error: None,
        }
    }

    /// Creates a disconnected event with the triggering error.
    #[must_use]
    pub fn disconnected(address: DeviceAddress, error: impl Into<String>) -> Self {
        Self::ConnectionChanged {
            address,
            connected: false,
            error: Some(error.into()),
        }
    }

    /// Creates a state changed event.
    #[must_use]
    pub fn state_changed(address: DeviceAddress, attributes: DeviceAttributes) -> Self {
        Self::StateChanged {
            address,
            attributes,
        }
    }
}
