// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scripted in-memory bulb used by the integration tests.
//!
//! Behaves like a real MagicHome controller as far as the library can tell:
//! writes land in an internal channel store, power-off makes state reads
//! report all-zero channels while the store survives for resume, and reads
//! can be failed per mode to exercise the degradation chain.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use magichome_lib::{
    BulbCapability, BulbClient, ChannelReading, ColorState, Kelvin, Mode, ProtocolError, ReadMode,
};

#[derive(Debug, Clone, Copy)]
struct Hardware {
    channels: ColorState,
    powered: bool,
    mode: Mode,
}

/// A fake bulb with scriptable reachability and per-mode read failures.
pub struct ScriptedBulb {
    capability: BulbCapability,
    hardware: Mutex<Hardware>,
    reachable: Mutex<bool>,
    fail_rgbww_reads: Mutex<bool>,
    fail_rgbw_reads: Mutex<bool>,
    reads: AtomicUsize,
    writes: Mutex<Vec<String>>,
}

impl ScriptedBulb {
    pub fn new(capability: BulbCapability) -> Self {
        Self {
            capability,
            hardware: Mutex::new(Hardware {
                channels: ColorState::default(),
                powered: false,
                mode: Mode::Off,
            }),
            reachable: Mutex::new(true),
            fail_rgbww_reads: Mutex::new(false),
            fail_rgbw_reads: Mutex::new(false),
            reads: AtomicUsize::new(0),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn powered_on(self, channels: ColorState) -> Self {
        {
            let mut hardware = self.hardware.lock();
            hardware.channels = channels;
            hardware.powered = true;
            hardware.mode = if channels.rgb_sum() > 0 {
                Mode::Color
            } else {
                Mode::WarmWhite
            };
        }
        self
    }

    pub fn set_reachable(&self, reachable: bool) {
        *self.reachable.lock() = reachable;
    }

    pub fn fail_reads_above_rgb(&self) {
        *self.fail_rgbww_reads.lock() = true;
        *self.fail_rgbw_reads.lock() = true;
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }

    fn check(&self) -> Result<(), ProtocolError> {
        if *self.reachable.lock() {
            Ok(())
        } else {
            Err(ProtocolError::ConnectionFailed(
                "no route to bulb".to_string(),
            ))
        }
    }

    fn record(&self, write: String) {
        self.writes.lock().push(write);
    }
}

#[async_trait]
impl BulbClient for ScriptedBulb {
    async fn probe_capability(&self) -> Result<BulbCapability, ProtocolError> {
        self.check()?;
        Ok(self.capability)
    }

    async fn read_channels(&self, mode: ReadMode) -> Result<ChannelReading, ProtocolError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if mode == ReadMode::Rgbww && *self.fail_rgbww_reads.lock() {
            return Err(ProtocolError::UnexpectedResponse(
                "short reply for five-channel read".to_string(),
            ));
        }
        if mode == ReadMode::Rgbw && *self.fail_rgbw_reads.lock() {
            return Err(ProtocolError::UnexpectedResponse(
                "short reply for four-channel read".to_string(),
            ));
        }

        let hardware = self.hardware.lock();
        if hardware.powered {
            Ok(ChannelReading {
                channels: hardware.channels,
                mode: hardware.mode,
            })
        } else {
            Ok(ChannelReading {
                channels: ColorState::default(),
                mode: Mode::Off,
            })
        }
    }

    async fn write_rgb(&self, red: u8, green: u8, blue: u8) -> Result<(), ProtocolError> {
        self.check()?;
        self.record(format!("rgb({red},{green},{blue})"));
        let mut hardware = self.hardware.lock();
        hardware.channels = ColorState::rgb(red, green, blue);
        hardware.mode = Mode::Color;
        Ok(())
    }

    async fn write_rgbw(
        &self,
        red: u8,
        green: u8,
        blue: u8,
        white: u8,
    ) -> Result<(), ProtocolError> {
        self.check()?;
        self.record(format!("rgbw({red},{green},{blue},{white})"));
        let mut hardware = self.hardware.lock();
        hardware.channels = ColorState::new(red, green, blue, white, 0);
        hardware.mode = if hardware.channels.rgb_sum() > 0 {
            Mode::Color
        } else {
            Mode::WarmWhite
        };
        Ok(())
    }

    async fn write_white(&self, warm: u8, cool: u8) -> Result<(), ProtocolError> {
        self.check()?;
        self.record(format!("white({warm},{cool})"));
        let mut hardware = self.hardware.lock();
        hardware.channels = ColorState::new(0, 0, 0, warm, cool);
        hardware.mode = Mode::WarmWhite;
        Ok(())
    }

    async fn write_temperature(
        &self,
        kelvin: Kelvin,
        brightness: u8,
    ) -> Result<(), ProtocolError> {
        self.check()?;
        self.record(format!("temp({},{brightness})", kelvin.value()));
        let mut hardware = self.hardware.lock();
        // The controller mixes the whites itself; approximate with warm only.
        hardware.channels = ColorState::new(0, 0, 0, brightness, 0);
        hardware.mode = Mode::WarmWhite;
        Ok(())
    }

    async fn turn_on(&self) -> Result<(), ProtocolError> {
        self.check()?;
        self.record("on".to_string());
        let mut hardware = self.hardware.lock();
        hardware.powered = true;
        if hardware.mode == Mode::Off {
            hardware.mode = Mode::Color;
        }
        Ok(())
    }

    async fn turn_off(&self) -> Result<(), ProtocolError> {
        self.check()?;
        self.record("off".to_string());
        self.hardware.lock().powered = false;
        Ok(())
    }
}
