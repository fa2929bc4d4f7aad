// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-bulb shadow state machine.
//!
//! A [`DeviceShadow`] is the library's best-known copy of one bulb: channel
//! values, operating mode, last-on snapshot, and connectivity. Every hub
//! command is mediated here — translated against the shadow, executed
//! against the [`BulbClient`], and followed by a scheduled re-read so the
//! shadow converges back onto hardware truth.
//!
//! The shadow never guesses after a write: channel state only changes on a
//! successful [`refresh`](DeviceShadow::refresh). A failed read or write
//! leaves the state stale and flips the connected flag; it never zeroes
//! anything, because "unreachable" and "off" are different facts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::capabilities::BulbCapability;
use crate::client::{BulbClient, ChannelReading, ReadMode};
use crate::command::{Command, WritePlan, translate};
use crate::error::{Error, ProtocolError, Result};
use crate::event::DeviceAddress;
use crate::state::ColorState;
use crate::types::Mode;

/// What a successfully executed command did to the bulb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Channel values were written.
    Written,
    /// The bulb was powered on without channel writes.
    PoweredOn,
    /// The bulb was powered off.
    PoweredOff,
}

/// Hub-visible attribute snapshot of one device.
///
/// Derived from the shadow on demand; the brightness is the derived channel
/// brightness and `mode_index` is the stable 0-8 mapping of [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct DeviceAttributes {
    /// Derived brightness (0-100).
    pub brightness: u8,
    /// Red channel (0-255).
    pub red: u8,
    /// Green channel (0-255).
    pub green: u8,
    /// Blue channel (0-255).
    pub blue: u8,
    /// Warm-white channel (0-255).
    pub warm_white: u8,
    /// Cool-white channel (0-255).
    pub cool_white: u8,
    /// Whether the last protocol exchange succeeded.
    pub connected: bool,
    /// Operating mode index (0-8).
    pub mode_index: u8,
}

/// The per-bulb state machine.
///
/// Owns exactly one [`ColorState`], one last-on snapshot, one capability
/// class and one [`Mode`], keyed by a stable [`DeviceAddress`]. Created at
/// attach time and kept for the whole hub session; connection loss is
/// reported through the connected flag, never by removal.
pub struct DeviceShadow {
    address: DeviceAddress,
    client: Arc<dyn BulbClient>,
    capability: BulbCapability,
    state: ColorState,
    last_on: ColorState,
    mode: Mode,
    connected: bool,
    last_refresh: Option<DateTime<Utc>>,
}

impl DeviceShadow {
    /// Creates a shadow for a freshly attached bulb.
    ///
    /// The shadow starts disconnected with all channels zero and
    /// [`Mode::Unknown`]; the first refresh fills in reality.
    #[must_use]
    pub fn new(
        address: DeviceAddress,
        capability: BulbCapability,
        client: Arc<dyn BulbClient>,
    ) -> Self {
        Self {
            address,
            client,
            capability,
            state: ColorState::default(),
            last_on: ColorState::default(),
            mode: Mode::Unknown,
            connected: false,
            last_refresh: None,
        }
    }

    /// Returns the device address.
    #[must_use]
    pub fn address(&self) -> &DeviceAddress {
        &self.address
    }

    /// Returns the capability class fixed at attach time.
    #[must_use]
    pub fn capability(&self) -> BulbCapability {
        self.capability
    }

    /// Returns the current shadow channel state.
    #[must_use]
    pub fn state(&self) -> ColorState {
        self.state
    }

    /// Returns the last non-zero state seen by a refresh.
    #[must_use]
    pub fn last_on(&self) -> ColorState {
        self.last_on
    }

    /// Returns the operating mode from the latest successful read.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns whether the last protocol exchange succeeded.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Returns when the shadow last converged onto hardware state.
    #[must_use]
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    /// Returns the hub-visible attribute snapshot.
    #[must_use]
    pub fn attributes(&self) -> DeviceAttributes {
        DeviceAttributes {
            brightness: self.state.brightness(),
            red: self.state.red,
            green: self.state.green,
            blue: self.state.blue,
            warm_white: self.state.warm_white,
            cool_white: self.state.cool_white,
            connected: self.connected,
            mode_index: self.mode.index(),
        }
    }

    /// Re-reads hardware state into the shadow.
    ///
    /// Reads degrade through [`ReadMode::Rgbww`] → [`ReadMode::Rgbw`] →
    /// [`ReadMode::Rgb`]; channels a degraded mode cannot see are forced to
    /// zero. A fallback is not an error — only all three modes failing is.
    ///
    /// On success the channel state, mode and (for non-zero states) the
    /// last-on snapshot are replaced and the connected flag is set. On
    /// failure nothing is mutated except the connected flag: the state is
    /// stale, not off.
    ///
    /// # Errors
    ///
    /// Returns the final `ProtocolError` when every read mode fails.
    pub async fn refresh(&mut self) -> std::result::Result<(), ProtocolError> {
        let reading = match self.read_with_fallback().await {
            Ok(reading) => reading,
            Err(e) => {
                warn!(address = %self.address, error = %e, "state read failed, shadow stale");
                self.connected = false;
                return Err(e);
            }
        };

        self.state = reading.channels;
        self.mode = reading.mode;
        if !self.state.is_off() {
            self.last_on = self.state;
        }
        self.connected = true;
        self.last_refresh = Some(Utc::now());
        debug!(
            address = %self.address,
            mode = %self.mode,
            brightness = self.state.brightness(),
            "shadow refreshed"
        );
        Ok(())
    }

    async fn read_with_fallback(&self) -> std::result::Result<ChannelReading, ProtocolError> {
        match self.client.read_channels(ReadMode::Rgbww).await {
            Ok(reading) => Ok(reading),
            Err(e) => {
                debug!(address = %self.address, error = %e, "RGBWW read failed, degrading to RGBW");
                match self.client.read_channels(ReadMode::Rgbw).await {
                    Ok(mut reading) => {
                        reading.channels.cool_white = 0;
                        Ok(reading)
                    }
                    Err(e) => {
                        debug!(address = %self.address, error = %e, "RGBW read failed, degrading to RGB");
                        let mut reading = self.client.read_channels(ReadMode::Rgb).await?;
                        reading.channels.warm_white = 0;
                        reading.channels.cool_white = 0;
                        Ok(reading)
                    }
                }
            }
        }
    }

    /// Translates and executes one hub command.
    ///
    /// Rejections come back as [`Error::Rejected`] before anything touches
    /// the wire. Successful execution returns what was done; the caller is
    /// responsible for scheduling the settle-delay reconciliation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`] for translator rejections and
    /// [`Error::Protocol`] for failed writes (which also clear the
    /// connected flag).
    pub async fn apply(&mut self, command: &Command) -> Result<CommandOutcome> {
        let plan = translate(command, &self.state, &self.last_on, self.capability)?;
        debug!(address = %self.address, command = command.name(), ?plan, "executing command");
        let outcome = self.execute(plan).await.map_err(|e| {
            warn!(
                address = %self.address,
                command = command.name(),
                error = %e,
                "command write failed"
            );
            Error::Protocol(e)
        })?;
        Ok(outcome)
    }

    /// Executes a write plan, powering the bulb on after a channel write if
    /// the shadow believed it was off.
    async fn execute(
        &mut self,
        plan: WritePlan,
    ) -> std::result::Result<CommandOutcome, ProtocolError> {
        let was_off = self.state.is_off();

        let result = match plan {
            WritePlan::PowerOn => self.client.turn_on().await,
            WritePlan::PowerOff => self.client.turn_off().await,
            WritePlan::Rgb { red, green, blue } => self.client.write_rgb(red, green, blue).await,
            WritePlan::Rgbw {
                red,
                green,
                blue,
                white,
            } => self.client.write_rgbw(red, green, blue, white).await,
            WritePlan::WhitePair { warm, cool } => self.client.write_white(warm, cool).await,
            WritePlan::Temperature { kelvin, brightness } => {
                self.client.write_temperature(kelvin, brightness).await
            }
        };

        if let Err(e) = result {
            self.connected = false;
            return Err(e);
        }

        if plan.writes_channels() && was_off {
            if let Err(e) = self.client.turn_on().await {
                self.connected = false;
                return Err(e);
            }
        }

        Ok(match plan {
            WritePlan::PowerOn => CommandOutcome::PoweredOn,
            WritePlan::PowerOff => CommandOutcome::PoweredOff,
            _ => CommandOutcome::Written,
        })
    }
}

impl std::fmt::Debug for DeviceShadow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceShadow")
            .field("address", &self.address)
            .field("capability", &self.capability)
            .field("state", &self.state)
            .field("mode", &self.mode)
            .field("connected", &self.connected)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandRejection;
    use crate::types::{Kelvin, Level, ManualChannel};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Scriptable in-memory bulb.
    #[derive(Default)]
    struct MockBulb {
        reading: Mutex<Option<ChannelReading>>,
        fail_rgbww: Mutex<bool>,
        fail_rgbw: Mutex<bool>,
        writes: Mutex<Vec<String>>,
    }

    impl MockBulb {
        fn with_reading(channels: ColorState, mode: Mode) -> Self {
            Self {
                reading: Mutex::new(Some(ChannelReading { channels, mode })),
                ..Self::default()
            }
        }

        fn writes(&self) -> Vec<String> {
            self.writes.lock().clone()
        }
    }

    fn read_error() -> ProtocolError {
        ProtocolError::ConnectionFailed("no route to bulb".to_string())
    }

    #[async_trait]
    impl BulbClient for MockBulb {
        async fn probe_capability(&self) -> std::result::Result<BulbCapability, ProtocolError> {
            Ok(BulbCapability::Rgbww)
        }

        async fn read_channels(
            &self,
            mode: ReadMode,
        ) -> std::result::Result<ChannelReading, ProtocolError> {
            if mode == ReadMode::Rgbww && *self.fail_rgbww.lock() {
                return Err(read_error());
            }
            if mode == ReadMode::Rgbw && *self.fail_rgbw.lock() {
                return Err(read_error());
            }
            self.reading.lock().ok_or_else(read_error)
        }

        async fn write_rgb(
            &self,
            red: u8,
            green: u8,
            blue: u8,
        ) -> std::result::Result<(), ProtocolError> {
            self.writes.lock().push(format!("rgb({red},{green},{blue})"));
            Ok(())
        }

        async fn write_rgbw(
            &self,
            red: u8,
            green: u8,
            blue: u8,
            white: u8,
        ) -> std::result::Result<(), ProtocolError> {
            self.writes
                .lock()
                .push(format!("rgbw({red},{green},{blue},{white})"));
            Ok(())
        }

        async fn write_white(&self, warm: u8, cool: u8) -> std::result::Result<(), ProtocolError> {
            self.writes.lock().push(format!("white({warm},{cool})"));
            Ok(())
        }

        async fn write_temperature(
            &self,
            kelvin: Kelvin,
            brightness: u8,
        ) -> std::result::Result<(), ProtocolError> {
            self.writes
                .lock()
                .push(format!("temp({},{brightness})", kelvin.value()));
            Ok(())
        }

        async fn turn_on(&self) -> std::result::Result<(), ProtocolError> {
            self.writes.lock().push("on".to_string());
            Ok(())
        }

        async fn turn_off(&self) -> std::result::Result<(), ProtocolError> {
            self.writes.lock().push("off".to_string());
            Ok(())
        }
    }

    fn address() -> DeviceAddress {
        DeviceAddress::from_mac("AA:BB:CC:DD:EE:FF").unwrap()
    }

    fn shadow_with(client: Arc<MockBulb>, capability: BulbCapability) -> DeviceShadow {
        DeviceShadow::new(address(), capability, client)
    }

    #[tokio::test]
    async fn refresh_updates_state_mode_and_last_on() {
        let client = Arc::new(MockBulb::with_reading(
            ColorState::rgb(200, 10, 0),
            Mode::Color,
        ));
        let mut shadow = shadow_with(Arc::clone(&client), BulbCapability::Rgbww);

        shadow.refresh().await.unwrap();

        assert_eq!(shadow.state(), ColorState::rgb(200, 10, 0));
        assert_eq!(shadow.mode(), Mode::Color);
        assert_eq!(shadow.last_on(), ColorState::rgb(200, 10, 0));
        assert!(shadow.is_connected());
        assert!(shadow.last_refresh().is_some());
    }

    #[tokio::test]
    async fn refresh_with_zero_state_keeps_last_on() {
        let client = Arc::new(MockBulb::with_reading(
            ColorState::rgb(200, 10, 0),
            Mode::Color,
        ));
        let mut shadow = shadow_with(Arc::clone(&client), BulbCapability::Rgbww);
        shadow.refresh().await.unwrap();

        *client.reading.lock() = Some(ChannelReading {
            channels: ColorState::default(),
            mode: Mode::Off,
        });
        shadow.refresh().await.unwrap();

        assert!(shadow.state().is_off());
        assert_eq!(shadow.mode(), Mode::Off);
        // The restore target survives the off-read.
        assert_eq!(shadow.last_on(), ColorState::rgb(200, 10, 0));
    }

    #[tokio::test]
    async fn refresh_failure_leaves_state_and_mode_untouched() {
        let client = Arc::new(MockBulb::with_reading(
            ColorState::rgb(0, 0, 99),
            Mode::Color,
        ));
        let mut shadow = shadow_with(Arc::clone(&client), BulbCapability::Rgbww);
        shadow.refresh().await.unwrap();

        *client.reading.lock() = None;
        let err = shadow.refresh().await.unwrap_err();
        assert!(matches!(err, ProtocolError::ConnectionFailed(_)));

        // Stale, not off.
        assert_eq!(shadow.state(), ColorState::rgb(0, 0, 99));
        assert_eq!(shadow.mode(), Mode::Color);
        assert!(!shadow.is_connected());
    }

    #[tokio::test]
    async fn refresh_degrades_to_rgbw_and_forces_cool_white() {
        let client = Arc::new(MockBulb::with_reading(
            ColorState::new(10, 20, 30, 40, 99),
            Mode::Color,
        ));
        *client.fail_rgbww.lock() = true;
        let mut shadow = shadow_with(Arc::clone(&client), BulbCapability::Rgbw);

        shadow.refresh().await.unwrap();

        // The degraded read cannot see cool white.
        assert_eq!(shadow.state(), ColorState::new(10, 20, 30, 40, 0));
        assert!(shadow.is_connected());
    }

    #[tokio::test]
    async fn refresh_degrades_to_rgb_and_forces_both_whites() {
        let client = Arc::new(MockBulb::with_reading(
            ColorState::new(10, 20, 30, 40, 99),
            Mode::Color,
        ));
        *client.fail_rgbww.lock() = true;
        *client.fail_rgbw.lock() = true;
        let mut shadow = shadow_with(Arc::clone(&client), BulbCapability::RgbOnly);

        shadow.refresh().await.unwrap();

        assert_eq!(shadow.state(), ColorState::new(10, 20, 30, 0, 0));
        assert!(shadow.is_connected());
    }

    #[tokio::test]
    async fn apply_off_issues_device_off_and_keeps_shadow() {
        let client = Arc::new(MockBulb::with_reading(
            ColorState::rgb(255, 0, 0),
            Mode::Color,
        ));
        let mut shadow = shadow_with(Arc::clone(&client), BulbCapability::RgbOnly);
        shadow.refresh().await.unwrap();

        let outcome = shadow.apply(&Command::Off).await.unwrap();

        assert_eq!(outcome, CommandOutcome::PoweredOff);
        assert_eq!(client.writes(), vec!["off"]);
        // Shadow is only updated by the scheduled refresh.
        assert_eq!(shadow.state(), ColorState::rgb(255, 0, 0));
    }

    #[tokio::test]
    async fn apply_channel_write_from_off_also_powers_on() {
        let client = Arc::new(MockBulb::with_reading(ColorState::default(), Mode::Off));
        let mut shadow = shadow_with(Arc::clone(&client), BulbCapability::RgbOnly);
        shadow.refresh().await.unwrap();

        let outcome = shadow
            .apply(&Command::SetRgb {
                red: 10,
                green: 0,
                blue: 0,
            })
            .await
            .unwrap();

        assert_eq!(outcome, CommandOutcome::Written);
        assert_eq!(client.writes(), vec!["rgb(10,0,0)", "on"]);
    }

    #[tokio::test]
    async fn apply_channel_write_while_on_skips_power_on() {
        let client = Arc::new(MockBulb::with_reading(ColorState::rgb(50, 0, 0), Mode::Color));
        let mut shadow = shadow_with(Arc::clone(&client), BulbCapability::RgbOnly);
        shadow.refresh().await.unwrap();

        shadow
            .apply(&Command::SetRgb {
                red: 10,
                green: 20,
                blue: 30,
            })
            .await
            .unwrap();

        assert_eq!(client.writes(), vec!["rgb(10,20,30)"]);
    }

    #[tokio::test]
    async fn apply_rejected_command_performs_no_write() {
        let client = Arc::new(MockBulb::with_reading(ColorState::rgb(50, 0, 0), Mode::Color));
        let mut shadow = shadow_with(Arc::clone(&client), BulbCapability::RgbOnly);
        shadow.refresh().await.unwrap();

        let err = shadow
            .apply(&Command::SetChannel {
                channel: ManualChannel::White,
                value: 100,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Rejected(CommandRejection::CapabilityMismatch { .. })
        ));
        assert!(client.writes().is_empty());
        assert!(shadow.is_connected());
    }

    #[tokio::test]
    async fn apply_on_at_level_restores_spec_scenario() {
        // RGBWW bulb, dark, last-on full red: on(50) writes r=127 and powers on.
        let client = Arc::new(MockBulb::with_reading(ColorState::rgb(255, 0, 0), Mode::Color));
        let mut shadow = shadow_with(Arc::clone(&client), BulbCapability::Rgbww);
        shadow.refresh().await.unwrap();

        *client.reading.lock() = Some(ChannelReading {
            channels: ColorState::default(),
            mode: Mode::Off,
        });
        shadow.refresh().await.unwrap();
        client.writes.lock().clear();

        shadow
            .apply(&Command::on_at(Level::new(50).unwrap()))
            .await
            .unwrap();

        assert_eq!(client.writes(), vec!["rgbw(127,0,0,0)", "on"]);
    }

    #[tokio::test]
    async fn write_failure_marks_disconnected() {
        struct FailingBulb;

        #[async_trait]
        impl BulbClient for FailingBulb {
            async fn probe_capability(
                &self,
            ) -> std::result::Result<BulbCapability, ProtocolError> {
                Ok(BulbCapability::RgbOnly)
            }
            async fn read_channels(
                &self,
                _mode: ReadMode,
            ) -> std::result::Result<ChannelReading, ProtocolError> {
                Ok(ChannelReading {
                    channels: ColorState::rgb(1, 2, 3),
                    mode: Mode::Color,
                })
            }
            async fn write_rgb(
                &self,
                _red: u8,
                _green: u8,
                _blue: u8,
            ) -> std::result::Result<(), ProtocolError> {
                Err(ProtocolError::Timeout(5000))
            }
            async fn write_rgbw(
                &self,
                _red: u8,
                _green: u8,
                _blue: u8,
                _white: u8,
            ) -> std::result::Result<(), ProtocolError> {
                Err(ProtocolError::Timeout(5000))
            }
            async fn write_white(
                &self,
                _warm: u8,
                _cool: u8,
            ) -> std::result::Result<(), ProtocolError> {
                Err(ProtocolError::Timeout(5000))
            }
            async fn write_temperature(
                &self,
                _kelvin: Kelvin,
                _brightness: u8,
            ) -> std::result::Result<(), ProtocolError> {
                Err(ProtocolError::Timeout(5000))
            }
            async fn turn_on(&self) -> std::result::Result<(), ProtocolError> {
                Ok(())
            }
            async fn turn_off(&self) -> std::result::Result<(), ProtocolError> {
                Ok(())
            }
        }

        let mut shadow = DeviceShadow::new(
            address(),
            BulbCapability::RgbOnly,
            Arc::new(FailingBulb),
        );
        shadow.refresh().await.unwrap();
        assert!(shadow.is_connected());

        let err = shadow
            .apply(&Command::SetRgb {
                red: 9,
                green: 9,
                blue: 9,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Protocol(ProtocolError::Timeout(_))));
        assert!(!shadow.is_connected());
        // State is stale, not cleared.
        assert_eq!(shadow.state(), ColorState::rgb(1, 2, 3));
    }

    #[tokio::test]
    async fn attributes_reflect_shadow() {
        let client = Arc::new(MockBulb::with_reading(
            ColorState::new(255, 10, 0, 5, 0),
            Mode::Color,
        ));
        let mut shadow = shadow_with(Arc::clone(&client), BulbCapability::Rgbww);
        shadow.refresh().await.unwrap();

        let attrs = shadow.attributes();
        assert_eq!(attrs.brightness, 100);
        assert_eq!(attrs.red, 255);
        assert_eq!(attrs.green, 10);
        assert_eq!(attrs.warm_white, 5);
        assert!(attrs.connected);
        assert_eq!(attrs.mode_index, 1);
    }
}
