// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bulb operating mode.
//!
//! The mode is read-only: hardware reports it in every state reply and it
//! determines which channels are semantically meaningful in that reply.
//! Effect modes (custom, preset, sunrise, sunset) are recognized so the hub
//! can display them, but this library never programs effects.

use std::fmt;

/// Operating mode reported by a bulb.
///
/// Hubs address the mode as a numeric index 0-8; see [`Mode::index`].
///
/// # Examples
///
/// ```
/// use magichome_lib::types::Mode;
///
/// assert_eq!(Mode::from_protocol("color"), Mode::Color);
/// assert_eq!(Mode::from_protocol("ww"), Mode::WarmWhite);
/// assert_eq!(Mode::from_protocol("gibberish"), Mode::Unknown);
/// assert_eq!(Mode::Color.index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// All channels off.
    Off,
    /// Solid RGB color.
    Color,
    /// Warm-white channel active.
    WarmWhite,
    /// Custom effect programmed into the controller.
    Custom,
    /// Built-in preset effect.
    Preset,
    /// Sunrise simulation effect.
    Sunrise,
    /// Sunset simulation effect.
    Sunset,
    /// Factory default state.
    Default,
    /// Anything the protocol did not identify.
    Unknown,
}

impl Mode {
    /// Maps a flux-led protocol mode string to a variant.
    ///
    /// Unrecognized strings map to [`Mode::Unknown`] rather than erroring;
    /// the mode is informational and must never block a state read.
    #[must_use]
    pub fn from_protocol(s: &str) -> Self {
        match s {
            "off" => Self::Off,
            "color" => Self::Color,
            "ww" => Self::WarmWhite,
            "custom" => Self::Custom,
            "preset" => Self::Preset,
            "sunrise" => Self::Sunrise,
            "sunset" => Self::Sunset,
            "default" => Self::Default,
            _ => Self::Unknown,
        }
    }

    /// Returns the hub-facing mode index (0-8).
    #[must_use]
    pub const fn index(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Color => 1,
            Self::WarmWhite => 2,
            Self::Custom => 3,
            Self::Preset => 4,
            Self::Sunrise => 5,
            Self::Sunset => 6,
            Self::Default => 7,
            Self::Unknown => 8,
        }
    }

    /// Returns `true` for effect modes this library recognizes but never
    /// manipulates.
    #[must_use]
    pub const fn is_effect(&self) -> bool {
        matches!(
            self,
            Self::Custom | Self::Preset | Self::Sunrise | Self::Sunset
        )
    }

    /// Returns the protocol-style name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Color => "color",
            Self::WarmWhite => "ww",
            Self::Custom => "custom",
            Self::Preset => "preset",
            Self::Sunrise => "sunrise",
            Self::Sunset => "sunset",
            Self::Default => "default",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_strings_round_trip() {
        for mode in [
            Mode::Off,
            Mode::Color,
            Mode::WarmWhite,
            Mode::Custom,
            Mode::Preset,
            Mode::Sunrise,
            Mode::Sunset,
            Mode::Default,
        ] {
            assert_eq!(Mode::from_protocol(mode.as_str()), mode);
        }
    }

    #[test]
    fn unrecognized_maps_to_unknown() {
        assert_eq!(Mode::from_protocol(""), Mode::Unknown);
        assert_eq!(Mode::from_protocol("disco"), Mode::Unknown);
    }

    #[test]
    fn indices_are_stable() {
        assert_eq!(Mode::Off.index(), 0);
        assert_eq!(Mode::Color.index(), 1);
        assert_eq!(Mode::WarmWhite.index(), 2);
        assert_eq!(Mode::Custom.index(), 3);
        assert_eq!(Mode::Preset.index(), 4);
        assert_eq!(Mode::Sunrise.index(), 5);
        assert_eq!(Mode::Sunset.index(), 6);
        assert_eq!(Mode::Default.index(), 7);
        assert_eq!(Mode::Unknown.index(), 8);
    }

    #[test]
    fn effect_modes() {
        assert!(Mode::Preset.is_effect());
        assert!(Mode::Sunrise.is_effect());
        assert!(!Mode::Color.is_effect());
        assert!(!Mode::Off.is_effect());
    }
}
