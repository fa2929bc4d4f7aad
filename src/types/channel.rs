// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel selector for single-channel manual commands.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// One manually addressable channel.
///
/// Hubs issue single-channel set commands as `R`/`G`/`B`/`W`; the warm-white
/// channel is only legal on white-capable bulbs, which the translator
/// enforces. The cool-white channel is not manually addressable, matching
/// the hub command set.
///
/// # Examples
///
/// ```
/// use magichome_lib::types::ManualChannel;
///
/// let ch: ManualChannel = "R".parse().unwrap();
/// assert_eq!(ch, ManualChannel::Red);
/// assert!("X".parse::<ManualChannel>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManualChannel {
    /// Red channel.
    Red,
    /// Green channel.
    Green,
    /// Blue channel.
    Blue,
    /// Warm-white channel.
    White,
}

impl ManualChannel {
    /// Returns the hub command letter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "R",
            Self::Green => "G",
            Self::Blue => "B",
            Self::White => "W",
        }
    }
}

impl fmt::Display for ManualChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ManualChannel {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "R" => Ok(Self::Red),
            "G" => Ok(Self::Green),
            "B" => Ok(Self::Blue),
            "W" => Ok(Self::White),
            _ => Err(ValueError::InvalidChannel(s.to_string())),
        }
    }
}
