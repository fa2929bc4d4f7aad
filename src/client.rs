// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The bulb protocol seam.
//!
//! The low-level wire protocol to a MagicHome bulb lives outside this
//! library. Callers supply an implementation of [`BulbClient`] per physical
//! bulb; everything above it (shadowing, translation, reconciliation) is
//! protocol-agnostic. The trait is object-safe so a shadow can hold an
//! `Arc<dyn BulbClient>` regardless of the concrete transport.

use async_trait::async_trait;

use crate::capabilities::BulbCapability;
use crate::error::ProtocolError;
use crate::state::ColorState;
use crate::types::{Kelvin, Mode};

/// How many channels a state read should request.
///
/// State reads degrade through these modes in order: a five-channel read on
/// an older controller fails, so the reader falls back to four channels,
/// then three. The mode tells the client which reply layout to expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadMode {
    /// Five-channel read (RGB + warm white + cool white).
    Rgbww,
    /// Four-channel read (RGB + warm white).
    Rgbw,
    /// Three-channel read (RGB only).
    Rgb,
}

/// One state reply from a bulb.
///
/// Channels the requested [`ReadMode`] does not cover are normalized to zero
/// by the reader, not by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelReading {
    /// The channel values the bulb reported.
    pub channels: ColorState,
    /// The operating mode the bulb reported.
    pub mode: Mode,
}

/// Capability-typed handle to one physical bulb.
///
/// Implementations own the socket, framing, checksums, and timeouts of the
/// flux-led wire protocol; every method is a single protocol exchange. All
/// failures are reported as [`ProtocolError`] — the library treats any
/// failure as "state stale, device possibly gone", never as "device off".
#[async_trait]
pub trait BulbClient: Send + Sync {
    /// Probes the bulb for its capability class.
    ///
    /// Called once at attach time; the result is fixed for the lifetime of
    /// the device.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the probe exchange fails.
    async fn probe_capability(&self) -> Result<BulbCapability, ProtocolError>;

    /// Reads the current channel state and operating mode.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the read fails or the reply cannot be
    /// interpreted in the requested mode.
    async fn read_channels(&self, mode: ReadMode) -> Result<ChannelReading, ProtocolError>;

    /// Writes the three color channels.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the write fails.
    async fn write_rgb(&self, red: u8, green: u8, blue: u8) -> Result<(), ProtocolError>;

    /// Writes the three color channels plus the warm-white channel.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the write fails.
    async fn write_rgbw(
        &self,
        red: u8,
        green: u8,
        blue: u8,
        white: u8,
    ) -> Result<(), ProtocolError>;

    /// Writes both white channels as a raw pair.
    ///
    /// The protocol resets whichever white channel a write omits, so both
    /// values are always sent together.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the write fails.
    async fn write_white(&self, warm: u8, cool: u8) -> Result<(), ProtocolError>;

    /// Writes a device-native white temperature at the given brightness
    /// (0-255).
    ///
    /// The controller mixes its warm/cool channels itself; no raw channel
    /// values are involved.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the write fails.
    async fn write_temperature(&self, kelvin: Kelvin, brightness: u8)
    -> Result<(), ProtocolError>;

    /// Turns the bulb on without touching channel values.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the write fails.
    async fn turn_on(&self) -> Result<(), ProtocolError>;

    /// Turns the bulb off without touching channel values.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the write fails.
    async fn turn_off(&self) -> Result<(), ProtocolError>;
}
