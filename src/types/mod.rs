// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for MagicHome bulb control.
//!
//! This module provides type-safe representations of values used in bulb
//! commands. Each type ensures values are within their valid ranges at
//! construction time, preventing runtime errors.
//!
//! # Types
//!
//! - [`Level`] - Hub brightness level (0-100%)
//! - [`Kelvin`] - White color temperature (2700-6500 K)
//! - [`Mode`] - Operating mode reported by the bulb
//! - [`NamedColor`] - Fixed 12-entry color palette
//! - [`ManualChannel`] - Single-channel selector (R/G/B/W)

mod channel;
mod kelvin;
mod level;
mod mode;
mod named_color;

pub use channel::ManualChannel;
pub use kelvin::Kelvin;
pub use level::Level;
pub use mode::Mode;
pub use named_color::NamedColor;
