// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed color palette for named-color commands.
//!
//! Hubs address palette entries by index 0-11. The palette is fixed; changing
//! it would desynchronize the names and labels already provisioned in the hub
//! profile.

use std::fmt;

use crate::error::ValueError;

/// A palette entry addressable by the hub.
///
/// Each entry carries a base RGB triple; the translator scales the triple by
/// the device's current brightness before writing it.
///
/// # Examples
///
/// ```
/// use magichome_lib::types::NamedColor;
///
/// let color = NamedColor::from_index(5).unwrap();
/// assert_eq!(color, NamedColor::Blue);
/// assert_eq!(color.rgb(), (0, 0, 255));
///
/// assert!(NamedColor::from_index(12).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    /// Index 0.
    Red,
    /// Index 1.
    Orange,
    /// Index 2.
    Yellow,
    /// Index 3.
    Green,
    /// Index 4.
    Cyan,
    /// Index 5.
    Blue,
    /// Index 6.
    Purple,
    /// Index 7.
    Pink,
    /// Index 8.
    White,
    /// Index 9.
    ColdWhite,
    /// Index 10.
    WarmWhite,
    /// Index 11.
    Gold,
}

impl NamedColor {
    /// All palette entries in index order.
    pub const ALL: [Self; 12] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Cyan,
        Self::Blue,
        Self::Purple,
        Self::Pink,
        Self::White,
        Self::ColdWhite,
        Self::WarmWhite,
        Self::Gold,
    ];

    /// Looks up a palette entry by hub index (0-11).
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Returns the hub index of this entry.
    #[must_use]
    pub fn index(&self) -> u8 {
        // Palette is tiny, linear scan is fine.
        #[allow(clippy::cast_possible_truncation)]
        let index = Self::ALL
            .iter()
            .position(|c| c == self)
            .map_or(0, |i| i as u8);
        index
    }

    /// Returns the base RGB triple at full brightness.
    #[must_use]
    pub const fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Red => (255, 0, 0),
            Self::Orange => (255, 165, 0),
            Self::Yellow => (255, 255, 0),
            Self::Green => (0, 255, 0),
            Self::Cyan => (0, 255, 255),
            Self::Blue => (0, 0, 255),
            Self::Purple => (160, 32, 240),
            Self::Pink => (255, 192, 203),
            Self::White => (255, 255, 255),
            Self::ColdWhite => (201, 226, 255),
            Self::WarmWhite => (255, 147, 41),
            Self::Gold => (255, 215, 0),
        }
    }

    /// Returns the hub-profile label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Orange => "ORANGE",
            Self::Yellow => "YELLOW",
            Self::Green => "GREEN",
            Self::Cyan => "CYAN",
            Self::Blue => "BLUE",
            Self::Purple => "PURPLE",
            Self::Pink => "PINK",
            Self::White => "WHITE",
            Self::ColdWhite => "COLD_WHITE",
            Self::WarmWhite => "WARM_WHITE",
            Self::Gold => "GOLD",
        }
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<u8> for NamedColor {
    type Error = ValueError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(ValueError::UnknownColor(index))
    }
}
