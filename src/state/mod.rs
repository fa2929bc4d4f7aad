// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shadow state types.
//!
//! [`ColorState`] is the locally held best-known copy of a bulb's channel
//! state. It may be stale relative to hardware; the reconciliation scheduler
//! re-reads it after every mutation and on every poll tick.
//!
//! # Examples
//!
//! ```
//! use magichome_lib::state::ColorState;
//!
//! let state = ColorState::rgb(0, 128, 255);
//! assert_eq!(state.brightness(), 100);
//! assert_eq!(state.rgb_sum(), 383);
//! ```

mod color_state;

pub use color_state::ColorState;
