// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stable device addressing.

use std::fmt;

use crate::error::ValueError;

/// Maximum address length accepted by the hub.
pub const MAX_ADDRESS_LEN: usize = 14;

/// Stable hub-facing address of one bulb, derived from its hardware MAC.
///
/// The MAC is lower-cased, separators are stripped, and the result is
/// truncated to the *last* [`MAX_ADDRESS_LEN`] characters to fit the hub's
/// addressing limit. The tail is kept because vendor prefixes repeat across
/// devices while the tail stays unique.
///
/// # Examples
///
/// ```
/// use magichome_lib::event::DeviceAddress;
///
/// let address = DeviceAddress::from_mac("AA:BB:CC:DD:EE:FF").unwrap();
/// assert_eq!(address.as_str(), "aabbccddeeff");
///
/// assert!(DeviceAddress::from_mac("::").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceAddress(String);

impl DeviceAddress {
    /// Derives an address from a hardware MAC identifier.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidMac` if the identifier contains no
    /// alphanumeric characters at all.
    pub fn from_mac(mac: &str) -> Result<Self, ValueError> {
        let normalized: String = mac
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if normalized.is_empty() {
            return Err(ValueError::InvalidMac(mac.to_string()));
        }

        // All characters are ASCII at this point, byte indexing is safe.
        let start = normalized.len().saturating_sub(MAX_ADDRESS_LEN);
        Ok(Self(normalized[start..].to_string()))
    }

    /// Returns the address string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DeviceAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
