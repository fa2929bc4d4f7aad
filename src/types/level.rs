// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness level type for on-commands.
//!
//! This module provides a type-safe representation of hub brightness levels,
//! ensuring values are always within the valid range of 0-100%.

use std::fmt;

use crate::error::ValueError;

/// Brightness level as a percentage (0-100).
///
/// Hubs address brightness as 0-100, where 0 is off and 100 is full
/// brightness. Channel values on the wire are 0-255; the translator scales
/// between the two.
///
/// # Examples
///
/// ```
/// use magichome_lib::types::Level;
///
/// let level = Level::new(75).unwrap();
/// assert_eq!(level.value(), 75);
///
/// let off = Level::MIN;
/// let full = Level::MAX;
/// assert_eq!(off.value(), 0);
/// assert_eq!(full.value(), 100);
///
/// // Invalid values return error
/// assert!(Level::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u8);

impl Level {
    /// Minimum level (0%).
    pub const MIN: Self = Self(0);

    /// Maximum level (100%).
    pub const MAX: Self = Self(100);

    /// Creates a new level.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a level, clamping to the valid range.
    ///
    /// Values above 100 are clamped to 100.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Returns the brightness percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` if this level means "off".
    #[must_use]
    pub const fn is_off(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Level {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_valid_values() {
        for v in 0..=100 {
            let level = Level::new(v).unwrap();
            assert_eq!(level.value(), v);
        }
    }

    #[test]
    fn level_invalid_value() {
        assert!(Level::new(101).is_err());
        assert!(Level::new(255).is_err());
    }

    #[test]
    fn level_clamped() {
        assert_eq!(Level::clamped(50).value(), 50);
        assert_eq!(Level::clamped(150).value(), 100);
        assert_eq!(Level::clamped(255).value(), 100);
    }

    #[test]
    fn level_is_off() {
        assert!(Level::MIN.is_off());
        assert!(!Level::new(1).unwrap().is_off());
    }

    #[test]
    fn level_display() {
        assert_eq!(Level::new(75).unwrap().to_string(), "75%");
    }

    #[test]
    fn level_ordering() {
        assert!(Level::MIN < Level::MAX);
        assert!(Level::new(50).unwrap() < Level::new(75).unwrap());
    }
}
