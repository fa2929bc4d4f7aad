// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Abstract command vocabulary and command translation.
//!
//! A [`Command`] is what the hub asks for; a [`WritePlan`] is what actually
//! goes over the wire for one specific bulb. [`translate`] maps between the
//! two as a pure function of the current shadow state, the last-on snapshot,
//! and the bulb's capability class — no I/O, no side effects, fully testable
//! without hardware.
//!
//! State queries are not commands: the manager refreshes a shadow directly,
//! so the vocabulary here is exactly the mutating surface.
//!
//! # Examples
//!
//! ```
//! use magichome_lib::command::{translate, Command, WritePlan};
//! use magichome_lib::state::ColorState;
//! use magichome_lib::BulbCapability;
//!
//! let current = ColorState::rgb(255, 0, 0);
//! let plan = translate(
//!     &Command::Off,
//!     &current,
//!     &current,
//!     BulbCapability::RgbOnly,
//! )
//! .unwrap();
//! assert_eq!(plan, WritePlan::PowerOff);
//! ```

mod translate;

pub use translate::{WritePlan, translate};

use crate::types::{Level, ManualChannel, NamedColor};

/// Direction of a relative brightness step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepDirection {
    /// Brighten by one step.
    Up,
    /// Dim by one step.
    Down,
}

/// One abstract command from the hub.
///
/// Every variant maps onto the hub's accepted command vocabulary; the
/// translator turns a command into a [`WritePlan`] for the target bulb's
/// capability class, or rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Turn on, optionally at a brightness level.
    ///
    /// Without a level the bulb is powered on with its channels untouched.
    /// Level 0 is equivalent to [`Command::Off`].
    On {
        /// Target brightness, if the hub supplied one.
        level: Option<Level>,
    },
    /// Turn off.
    Off,
    /// Turn on at full brightness (hub "fast on").
    FastOn,
    /// Turn off (hub "fast off").
    FastOff,
    /// Step brightness up or down by 3%.
    BrightnessStep(StepDirection),
    /// Replace exactly one channel, keeping the others.
    SetChannel {
        /// Which channel to replace.
        channel: ManualChannel,
        /// The new channel value.
        value: u8,
    },
    /// Overwrite the three color channels.
    SetRgb {
        /// Red channel value.
        red: u8,
        /// Green channel value.
        green: u8,
        /// Blue channel value.
        blue: u8,
    },
    /// Overwrite the color channels plus warm white.
    SetRgbw {
        /// Red channel value.
        red: u8,
        /// Green channel value.
        green: u8,
        /// Blue channel value.
        blue: u8,
        /// Warm-white channel value.
        white: u8,
    },
    /// Set a palette color, scaled by the current brightness.
    SetNamedColor(NamedColor),
    /// Set a device-native white temperature in Kelvin.
    SetTemperature {
        /// Requested temperature; validated against [2700, 6500].
        kelvin: u16,
    },
    /// Set the warm-white channel, holding cool white at its last value.
    SetWarmWhite {
        /// The new warm-white value.
        value: u8,
    },
    /// Set the cool-white channel, holding warm white at its last value.
    SetCoolWhite {
        /// The new cool-white value.
        value: u8,
    },
}

impl Command {
    /// Returns a short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::On { .. } => "on",
            Self::Off => "off",
            Self::FastOn => "fast-on",
            Self::FastOff => "fast-off",
            Self::BrightnessStep(StepDirection::Up) => "brightness-up",
            Self::BrightnessStep(StepDirection::Down) => "brightness-down",
            Self::SetChannel { .. } => "set-channel",
            Self::SetRgb { .. } => "set-rgb",
            Self::SetRgbw { .. } => "set-rgbw",
            Self::SetNamedColor(_) => "set-named-color",
            Self::SetTemperature { .. } => "set-temperature",
            Self::SetWarmWhite { .. } => "set-warm-white",
            Self::SetCoolWhite { .. } => "set-cool-white",
        }
    }

    /// Creates a plain on-command (no level).
    #[must_use]
    pub const fn on() -> Self {
        Self::On { level: None }
    }

    /// Creates an on-command at a specific level.
    #[must_use]
    pub const fn on_at(level: Level) -> Self {
        Self::On { level: Some(level) }
    }
}
