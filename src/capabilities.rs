// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bulb capability classes.
//!
//! MagicHome controllers ship in three channel layouts: plain RGB, RGB plus a
//! single warm-white channel (RGBW), and RGB plus separate warm/cool white
//! channels (RGBWW, also sold as "CCT" bulbs). The capability class is fixed
//! at device-attach time, either from a [`BulbClient`](crate::BulbClient)
//! probe or from configuration, and determines which command translations are
//! legal for the device.
//!
//! Capability is a single enum rather than per-feature flags: the three
//! layouts are mutually exclusive hardware variants, and every translator
//! branch that touches a white channel checks the class explicitly.

use std::fmt;

/// The fixed set of channels a physical bulb model supports.
///
/// # Examples
///
/// ```
/// use magichome_lib::BulbCapability;
///
/// let cap = BulbCapability::Rgbww;
/// assert!(cap.has_warm_white());
/// assert!(cap.has_cool_white());
/// assert_eq!(cap.channel_count(), 5);
///
/// let plain = BulbCapability::RgbOnly;
/// assert!(!plain.has_warm_white());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulbCapability {
    /// Three color channels, no white channel.
    #[default]
    RgbOnly,
    /// Three color channels plus a warm-white channel.
    Rgbw,
    /// Three color channels plus warm-white and cool-white channels.
    Rgbww,
}

impl BulbCapability {
    /// Returns whether the bulb has a warm-white channel.
    #[must_use]
    pub const fn has_warm_white(&self) -> bool {
        matches!(self, Self::Rgbw | Self::Rgbww)
    }

    /// Returns whether the bulb has a cool-white channel.
    #[must_use]
    pub const fn has_cool_white(&self) -> bool {
        matches!(self, Self::Rgbww)
    }

    /// Returns whether the bulb has any white channel at all.
    #[must_use]
    pub const fn is_white_capable(&self) -> bool {
        self.has_warm_white()
    }

    /// Returns the number of controllable channels for this class.
    #[must_use]
    pub const fn channel_count(&self) -> u8 {
        match self {
            Self::RgbOnly => 3,
            Self::Rgbw => 4,
            Self::Rgbww => 5,
        }
    }

    /// Returns a short protocol-style name for logs and errors.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RgbOnly => "rgb",
            Self::Rgbw => "rgbw",
            Self::Rgbww => "rgbww",
        }
    }
}

impl fmt::Display for BulbCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
