// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for device state changes.
//!
//! This module provides a pub/sub event system for notifying subscribers
//! about device attachment, connectivity, and attribute changes. The
//! [`EventBus`] uses tokio's broadcast channel so multiple subscribers can
//! receive the same events.
//!
//! # Examples
//!
//! ```
//! use magichome_lib::event::{DeviceAddress, DeviceEvent, EventBus};
//!
//! let bus = EventBus::new();
//!
//! // Subscribe to events
//! let mut rx = bus.subscribe();
//!
//! // Publish an event
//! let address = DeviceAddress::from_mac("AA:BB:CC:DD:EE:FF").unwrap();
//! bus.publish(DeviceEvent::DeviceAdded { address });
//! ```

mod address;
mod device_event;
mod event_bus;

pub use address::{DeviceAddress, MAX_ADDRESS_LEN};
pub use device_event::DeviceEvent;
pub use event_bus::EventBus;
