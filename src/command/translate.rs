// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pure command-to-write-plan translation.

use tracing::warn;

use crate::capabilities::BulbCapability;
use crate::error::CommandRejection;
use crate::state::ColorState;
use crate::types::{Kelvin, Level, ManualChannel};

use super::{Command, StepDirection};

/// Relative brightness step size in percent.
const BRIGHTNESS_STEP: i16 = 3;

/// A concrete plan of protocol writes for one command on one bulb.
///
/// Exactly one plan comes out of a successful translation. The shadow
/// executes it against the [`BulbClient`](crate::BulbClient) and follows any
/// channel write with a power-on if the bulb was believed off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePlan {
    /// Power on, channels untouched.
    PowerOn,
    /// Power off, channels untouched.
    PowerOff,
    /// Write the three color channels.
    Rgb {
        /// Red channel value.
        red: u8,
        /// Green channel value.
        green: u8,
        /// Blue channel value.
        blue: u8,
    },
    /// Write the color channels plus warm white.
    Rgbw {
        /// Red channel value.
        red: u8,
        /// Green channel value.
        green: u8,
        /// Blue channel value.
        blue: u8,
        /// Warm-white channel value.
        white: u8,
    },
    /// Write both white channels as a raw pair.
    WhitePair {
        /// Warm-white channel value.
        warm: u8,
        /// Cool-white channel value.
        cool: u8,
    },
    /// Write a device-native white temperature.
    Temperature {
        /// Validated temperature.
        kelvin: Kelvin,
        /// Write brightness (0-255).
        brightness: u8,
    },
}

impl WritePlan {
    /// Returns `true` if executing this plan changes channel values (as
    /// opposed to power state alone).
    #[must_use]
    pub const fn writes_channels(&self) -> bool {
        !matches!(self, Self::PowerOn | Self::PowerOff)
    }
}

/// Translates one abstract command into a write plan for one bulb.
///
/// Pure function of the command, the current shadow state, the last-on
/// snapshot, and the capability class. Never performs I/O.
///
/// # Errors
///
/// Returns [`CommandRejection`] when the command requires a channel the
/// capability class lacks or carries an out-of-range parameter. Rejected
/// commands must not be followed by any write.
pub fn translate(
    command: &Command,
    current: &ColorState,
    last_on: &ColorState,
    capability: BulbCapability,
) -> Result<WritePlan, CommandRejection> {
    match command {
        Command::On { level } => translate_on(*level, current, last_on, capability),
        Command::FastOn => translate_on(Some(Level::MAX), current, last_on, capability),
        Command::Off | Command::FastOff => Ok(WritePlan::PowerOff),
        Command::BrightnessStep(direction) => {
            translate_step(*direction, current, last_on, capability)
        }
        Command::SetChannel { channel, value } => {
            translate_channel(*channel, *value, current, capability)
        }
        Command::SetRgb { red, green, blue } => Ok(translate_rgb(*red, *green, *blue)),
        Command::SetRgbw {
            red,
            green,
            blue,
            white,
        } => Ok(translate_rgbw(*red, *green, *blue, *white, capability)),
        Command::SetNamedColor(color) => {
            let (red, green, blue) = color.rgb();
            // Scale by the current brightness fraction; a dark bulb gets the
            // full triple so the command is never an invisible all-zero write.
            let pct = match current.brightness() {
                0 => 100,
                pct => pct,
            };
            let scale = |ch: u8| -> u8 {
                // ch * pct / 100 <= 255.
                #[allow(clippy::cast_possible_truncation)]
                let scaled = (u16::from(ch) * u16::from(pct) / 100) as u8;
                scaled
            };
            Ok(translate_rgb(scale(red), scale(green), scale(blue)))
        }
        Command::SetTemperature { kelvin } => {
            let kelvin = Kelvin::new(*kelvin).map_err(|_| CommandRejection::OutOfRange {
                min: Kelvin::WARM.value(),
                max: Kelvin::COOL.value(),
                actual: *kelvin,
            })?;
            // A dark bulb gets full write brightness so the change is visible.
            let brightness = match current.max_channel() {
                0 => 255,
                value => value,
            };
            Ok(WritePlan::Temperature { kelvin, brightness })
        }
        Command::SetWarmWhite { value } => translate_warm_white(*value, current, capability),
        Command::SetCoolWhite { value } => translate_cool_white(*value, current, capability),
    }
}

/// Turn-on with optional level: pick a base color, scale it, route the
/// result to the channel family that still has light in it.
fn translate_on(
    level: Option<Level>,
    current: &ColorState,
    last_on: &ColorState,
    capability: BulbCapability,
) -> Result<WritePlan, CommandRejection> {
    let Some(level) = level else {
        return Ok(WritePlan::PowerOn);
    };
    if level.is_off() {
        return Ok(WritePlan::PowerOff);
    }

    // Base color: live state, else last-on snapshot, else full white. The
    // full-white fallback guarantees a non-zero scaling divisor.
    let base = if !current.is_off() {
        *current
    } else if !last_on.is_off() {
        *last_on
    } else {
        ColorState::full_white()
    };
    let scaled = base.scaled(level);

    if scaled.rgb_sum() > 0 {
        if capability.is_white_capable() {
            Ok(WritePlan::Rgbw {
                red: scaled.red,
                green: scaled.green,
                blue: scaled.blue,
                white: scaled.warm_white,
            })
        } else {
            Ok(WritePlan::Rgb {
                red: scaled.red,
                green: scaled.green,
                blue: scaled.blue,
            })
        }
    } else if scaled.warm_white > 0 && scaled.cool_white > 0 {
        Ok(WritePlan::WhitePair {
            warm: scaled.warm_white,
            cool: scaled.cool_white,
        })
    } else if scaled.warm_white > 0 {
        translate_warm_white(scaled.warm_white, current, capability)
    } else if scaled.cool_white > 0 {
        translate_cool_white(scaled.cool_white, current, capability)
    } else {
        // Scaling a non-zero base at level >= 1 keeps its brightest channel
        // non-zero, so there is nothing left to write here.
        Ok(WritePlan::PowerOn)
    }
}

fn translate_step(
    direction: StepDirection,
    current: &ColorState,
    last_on: &ColorState,
    capability: BulbCapability,
) -> Result<WritePlan, CommandRejection> {
    let step = match direction {
        StepDirection::Up => BRIGHTNESS_STEP,
        StepDirection::Down => -BRIGHTNESS_STEP,
    };
    let next = (i16::from(current.brightness()) + step).clamp(0, 100);
    if next == 0 {
        return Ok(WritePlan::PowerOff);
    }
    // In [1, 100] after the clamp.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let level = Level::clamped(next as u8);
    translate_on(Some(level), current, last_on, capability)
}

fn translate_channel(
    channel: ManualChannel,
    value: u8,
    current: &ColorState,
    capability: BulbCapability,
) -> Result<WritePlan, CommandRejection> {
    if channel == ManualChannel::White && !capability.is_white_capable() {
        return Err(CommandRejection::CapabilityMismatch {
            feature: "warm white channel".to_string(),
        });
    }

    let next = current.with_channel(channel, value);
    if next.is_off() {
        return Ok(WritePlan::PowerOff);
    }
    if capability.is_white_capable() && next.warm_white > 0 {
        Ok(WritePlan::Rgbw {
            red: next.red,
            green: next.green,
            blue: next.blue,
            white: next.warm_white,
        })
    } else {
        Ok(WritePlan::Rgb {
            red: next.red,
            green: next.green,
            blue: next.blue,
        })
    }
}

fn translate_rgb(red: u8, green: u8, blue: u8) -> WritePlan {
    if u16::from(red) + u16::from(green) + u16::from(blue) == 0 {
        WritePlan::PowerOff
    } else {
        WritePlan::Rgb { red, green, blue }
    }
}

fn translate_rgbw(red: u8, green: u8, blue: u8, white: u8, capability: BulbCapability) -> WritePlan {
    let sum = u16::from(red) + u16::from(green) + u16::from(blue) + u16::from(white);
    if sum == 0 {
        return WritePlan::PowerOff;
    }
    if capability.is_white_capable() {
        WritePlan::Rgbw {
            red,
            green,
            blue,
            white,
        }
    } else {
        // Degrade rather than reject: the color part of the request is still
        // expressible on this hardware.
        warn!(
            %capability,
            white,
            "RGBW command on a bulb without a white channel, writing RGB only"
        );
        WritePlan::Rgb { red, green, blue }
    }
}

/// The protocol resets whichever white channel a write omits, so the other
/// white channel is repeated from the shadow.
fn translate_warm_white(
    value: u8,
    current: &ColorState,
    capability: BulbCapability,
) -> Result<WritePlan, CommandRejection> {
    if !capability.has_warm_white() {
        return Err(CommandRejection::CapabilityMismatch {
            feature: "warm white channel".to_string(),
        });
    }
    if value == 0 {
        return Ok(WritePlan::PowerOff);
    }
    Ok(WritePlan::WhitePair {
        warm: value,
        cool: current.cool_white,
    })
}

fn translate_cool_white(
    value: u8,
    current: &ColorState,
    capability: BulbCapability,
) -> Result<WritePlan, CommandRejection> {
    if !capability.has_cool_white() {
        return Err(CommandRejection::CapabilityMismatch {
            feature: "cool white channel".to_string(),
        });
    }
    if value == 0 {
        return Ok(WritePlan::PowerOff);
    }
    Ok(WritePlan::WhitePair {
        warm: current.warm_white,
        cool: value,
    })
}
