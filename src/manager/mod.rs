// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device manager for coordinating multiple MagicHome bulbs.
//!
//! This module is the surface a hub adapter consumes. The [`BulbManager`]
//! keeps one [`DeviceShadow`](crate::shadow::DeviceShadow) per attached
//! bulb, runs every hub command through the translator, schedules the
//! settle-delay reconciliation after each mutation, and broadcasts
//! [`DeviceEvent`](crate::event::DeviceEvent)s for attribute and
//! connectivity changes.
//!
//! # Overview
//!
//! - **Attachment**: discovery or static config supplies
//!   [`BulbEntry`] values; [`BulbManager::attach`] derives the stable
//!   device address, fixes the capability class, and takes an initial
//!   state reading.
//! - **Commands**: [`BulbManager::handle_command`] mediates the hub's
//!   command vocabulary per device.
//! - **Reconciliation**: the hub's long-poll tick drives
//!   [`BulbManager::poll_all`], the only mechanism that detects silently
//!   dropped devices.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use magichome_lib::manager::{AdapterConfig, BulbManager};
//! use magichome_lib::BulbClient;
//!
//! # async fn example(clients: Vec<Arc<dyn BulbClient>>) -> magichome_lib::Result<()> {
//! let config = AdapterConfig::from_json(
//!     r#"{"devices": [{"ip_address": "192.168.1.40", "mac_id": "AA:BB:CC:DD:EE:FF"}]}"#,
//! )?;
//! let manager = BulbManager::with_config(config.reconcile_config());
//!
//! for ((_address, entry), client) in config.valid_devices().into_iter().zip(clients) {
//!     manager.attach(entry, client).await?;
//! }
//!
//! // Hub long-poll tick:
//! manager.poll_all().await;
//! # Ok(())
//! # }
//! ```

mod bulb_config;
mod bulb_manager;

pub use bulb_config::{AdapterConfig, BulbEntry};
pub use bulb_manager::BulbManager;
