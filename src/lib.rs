// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `MagicHome` Lib - a Rust library exposing MagicHome/flux-led LED bulbs as
//! addressable devices inside a home-automation hub.
//!
//! The library owns the middle of the stack: per-bulb shadow state, command
//! translation across capability classes (RGB, RGBW, RGBWW/CCT), and the
//! settle-delay reconciliation that keeps shadows converged onto hardware.
//! The wire protocol to the bulb and the hub integration protocol are
//! collaborators behind traits, not part of this crate.
//!
//! # Supported Features
//!
//! - **Power control**: on/off, fast-on/fast-off, on-at-level with
//!   resume-previous-color
//! - **Color control**: absolute RGB/RGBW, single-channel sets, a fixed
//!   12-entry named palette, warm/cool white, white temperature (2700-6500 K)
//! - **Brightness**: derived 0-100 brightness, relative 3% stepping
//! - **Reconciliation**: coalesced settle-delay read-back after every
//!   mutation plus hub-driven polling, with per-device connectivity tracking
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use magichome_lib::manager::{BulbEntry, BulbManager};
//! use magichome_lib::{BulbClient, Command};
//!
//! # async fn example(client: Arc<dyn BulbClient>) -> magichome_lib::Result<()> {
//! let manager = BulbManager::new();
//!
//! // Discovery supplies (ip, mac) pairs; the client is the wire-protocol
//! // handle for that bulb.
//! let entry = BulbEntry::new("192.168.1.40", "AA:BB:CC:DD:EE:FF");
//! let address = manager.attach(&entry, client).await?;
//!
//! // Hub commands are translated per capability class.
//! manager.handle_command(&address, Command::FastOn).await?;
//! manager
//!     .handle_command(&address, Command::SetRgb { red: 255, green: 80, blue: 0 })
//!     .await?;
//!
//! // The settle-delay refresh converges the shadow; attributes are what
//! // the hub displays.
//! let attributes = manager.attributes(&address).await.unwrap();
//! println!("brightness: {}", attributes.brightness);
//! # Ok(())
//! # }
//! ```
//!
//! # Watching Devices
//!
//! ```no_run
//! use magichome_lib::manager::BulbManager;
//! use magichome_lib::event::DeviceEvent;
//!
//! # fn example() {
//! let manager = BulbManager::new();
//! let mut events = manager.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(event) = events.recv().await {
//!         match event {
//!             DeviceEvent::StateChanged { address, attributes } => {
//!                 println!("{address}: brightness {}", attributes.brightness);
//!             }
//!             DeviceEvent::ConnectionChanged { address, connected, .. } => {
//!                 println!("{address}: connected {connected}");
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//! # }
//! ```

mod capabilities;
mod client;
pub mod command;
pub mod error;
pub mod event;
pub mod manager;
pub mod scheduler;
pub mod shadow;
pub mod state;
pub mod types;

pub use capabilities::BulbCapability;
pub use client::{BulbClient, ChannelReading, ReadMode};
pub use command::{Command, StepDirection, WritePlan, translate};
pub use error::{CommandRejection, ConfigError, Error, ProtocolError, Result, ValueError};
pub use event::{DeviceAddress, DeviceEvent, EventBus, MAX_ADDRESS_LEN};
pub use manager::{AdapterConfig, BulbEntry, BulbManager};
pub use scheduler::{ReconcileConfig, ReconciliationScheduler};
pub use shadow::{CommandOutcome, DeviceAttributes, DeviceShadow};
pub use state::ColorState;
pub use types::{Kelvin, Level, ManualChannel, Mode, NamedColor};
