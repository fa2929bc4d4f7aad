// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device manager tying shadows, scheduler and events together.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::capabilities::BulbCapability;
use crate::client::BulbClient;
use crate::command::Command;
use crate::error::{Error, Result};
use crate::event::{DeviceAddress, DeviceEvent, EventBus};
use crate::scheduler::{ReconcileConfig, ReconciliationScheduler};
use crate::shadow::{CommandOutcome, DeviceAttributes, DeviceShadow};

use super::BulbEntry;

type ShadowMap = HashMap<DeviceAddress, Arc<Mutex<DeviceShadow>>>;

/// Coordinates every attached bulb: one shadow per device, a shared
/// reconciliation scheduler, and an event bus for hub-facing updates.
///
/// Each shadow sits behind its own mutex, so one bulb's slow or failing
/// network path never blocks another's. The outer map lock is only held for
/// lookups, never across protocol I/O.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use magichome_lib::manager::{BulbEntry, BulbManager};
/// use magichome_lib::{BulbClient, Command};
///
/// # async fn example(client: Arc<dyn BulbClient>) -> magichome_lib::Result<()> {
/// let manager = BulbManager::new();
///
/// let entry = BulbEntry::new("192.168.1.40", "AA:BB:CC:DD:EE:FF");
/// let address = manager.attach(&entry, client).await?;
///
/// manager.handle_command(&address, Command::FastOn).await?;
/// # Ok(())
/// # }
/// ```
pub struct BulbManager {
    shadows: Arc<RwLock<ShadowMap>>,
    scheduler: Arc<ReconciliationScheduler>,
    event_bus: EventBus,
}

impl BulbManager {
    /// Creates a manager with default reconciliation tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ReconcileConfig::default())
    }

    /// Creates a manager with explicit reconciliation tuning.
    #[must_use]
    pub fn with_config(config: ReconcileConfig) -> Self {
        Self {
            shadows: Arc::new(RwLock::new(HashMap::new())),
            scheduler: Arc::new(ReconciliationScheduler::new(config)),
            event_bus: EventBus::new(),
        }
    }

    /// Subscribes to device events.
    #[must_use]
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<DeviceEvent> {
        self.event_bus.subscribe()
    }

    /// Attaches one bulb and takes an initial state reading.
    ///
    /// The capability class comes from the entry when configured, otherwise
    /// from a [`BulbClient::probe_capability`] call. An unreachable bulb
    /// still attaches — it starts disconnected and the periodic poll keeps
    /// retrying.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Value`] for an unusable MAC identifier and
    /// [`Error::Protocol`] when the capability probe itself fails.
    pub async fn attach(
        &self,
        entry: &BulbEntry,
        client: Arc<dyn BulbClient>,
    ) -> Result<DeviceAddress> {
        let address = entry.address()?;

        let capability = match entry.capability {
            Some(capability) => capability,
            None => client.probe_capability().await.map_err(Error::Protocol)?,
        };

        let mut shadow = DeviceShadow::new(address.clone(), capability, client);
        if let Err(e) = shadow.refresh().await {
            warn!(
                %address,
                name = entry.display_name(),
                error = %e,
                "bulb unreachable at attach, will retry on poll"
            );
        }
        let connected = shadow.is_connected();

        self.shadows
            .write()
            .await
            .insert(address.clone(), Arc::new(Mutex::new(shadow)));

        info!(%address, name = entry.display_name(), %capability, connected, "attached bulb");
        self.event_bus
            .publish(DeviceEvent::device_added(address.clone()));
        if connected {
            self.event_bus
                .publish(DeviceEvent::connected(address.clone()));
        }

        Ok(address)
    }

    /// Returns all attached device addresses.
    pub async fn addresses(&self) -> Vec<DeviceAddress> {
        self.shadows.read().await.keys().cloned().collect()
    }

    /// Returns the number of attached devices.
    pub async fn device_count(&self) -> usize {
        self.shadows.read().await.len()
    }

    /// Returns the capability class of a device.
    pub async fn capability(&self, address: &DeviceAddress) -> Option<BulbCapability> {
        match self.shadows.read().await.get(address) {
            Some(shadow) => Some(shadow.lock().await.capability()),
            None => None,
        }
    }

    /// Returns the hub-visible attribute snapshot of a device.
    pub async fn attributes(&self, address: &DeviceAddress) -> Option<DeviceAttributes> {
        match self.shadows.read().await.get(address) {
            Some(shadow) => Some(shadow.lock().await.attributes()),
            None => None,
        }
    }

    /// Returns whether a device's last protocol exchange succeeded.
    pub async fn is_connected(&self, address: &DeviceAddress) -> bool {
        match self.shadows.read().await.get(address) {
            Some(shadow) => shadow.lock().await.is_connected(),
            None => false,
        }
    }

    /// Translates and executes one hub command against one device.
    ///
    /// With `query_before_command` enabled the shadow is refreshed
    /// synchronously first, so scaling math runs on the freshest state; a
    /// failed pre-query only leaves the shadow stale and the command still
    /// runs. Every successfully executed command schedules exactly one
    /// settle-delay reconciliation, coalesced per device. Rejected and
    /// failed commands schedule nothing — the periodic poll is the retry
    /// mechanism.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`], [`Error::Rejected`] for
    /// translator rejections, or [`Error::Protocol`] for failed writes.
    pub async fn handle_command(
        &self,
        address: &DeviceAddress,
        command: Command,
    ) -> Result<CommandOutcome> {
        let shadow_arc = self.get(address).await?;
        let mut shadow = shadow_arc.lock().await;

        if self.scheduler.config().query_before_command {
            if let Err(e) = shadow.refresh().await {
                debug!(%address, error = %e, "pre-command query failed, using stale shadow");
            }
        }

        let was_connected = shadow.is_connected();
        let result = shadow.apply(&command).await;
        let now_connected = shadow.is_connected();
        drop(shadow);

        match result {
            Ok(outcome) => {
                self.schedule_refresh(address.clone());
                Ok(outcome)
            }
            Err(e) => {
                if was_connected && !now_connected {
                    self.event_bus
                        .publish(DeviceEvent::disconnected(address.clone(), e.to_string()));
                }
                Err(e)
            }
        }
    }

    /// Refreshes one device immediately (the hub's `query` command).
    ///
    /// A failed read leaves the previous attribute values in place with the
    /// connected flag cleared; the caller always gets a snapshot back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] for an unknown address.
    pub async fn query(&self, address: &DeviceAddress) -> Result<DeviceAttributes> {
        let shadow_arc = self.get(address).await?;
        self.scheduler.cancel(address);
        Ok(Self::refresh_shadow(&shadow_arc, &self.event_bus).await)
    }

    /// Refreshes every shadow once (the hub's periodic poll tick).
    ///
    /// Refreshes run concurrently, one task per device; the call returns
    /// when all of them finished. This is the only mechanism that notices a
    /// device silently dropping off the network.
    pub async fn poll_all(&self) {
        let snapshot: Vec<Arc<Mutex<DeviceShadow>>> =
            self.shadows.read().await.values().cloned().collect();

        let mut tasks = Vec::with_capacity(snapshot.len());
        for shadow in snapshot {
            let event_bus = self.event_bus.clone();
            tasks.push(tokio::spawn(async move {
                Self::refresh_shadow(&shadow, &event_bus).await;
            }));
        }
        for task in tasks {
            // A panicked refresh task only affects its own device.
            let _ = task.await;
        }
    }

    /// Schedules the settle-delay reconciliation for one device.
    fn schedule_refresh(&self, address: DeviceAddress) {
        let shadows = Arc::clone(&self.shadows);
        let event_bus = self.event_bus.clone();
        let target = address.clone();
        self.scheduler.schedule(address, async move {
            let shadow_arc = shadows.read().await.get(&target).cloned();
            if let Some(shadow_arc) = shadow_arc {
                Self::refresh_shadow(&shadow_arc, &event_bus).await;
            }
        });
    }

    /// Refreshes a shadow and publishes the resulting events.
    async fn refresh_shadow(
        shadow_arc: &Arc<Mutex<DeviceShadow>>,
        event_bus: &EventBus,
    ) -> DeviceAttributes {
        let mut shadow = shadow_arc.lock().await;
        let address = shadow.address().clone();
        let before = shadow.attributes();
        let result = shadow.refresh().await;
        let after = shadow.attributes();
        drop(shadow);

        match result {
            Ok(()) => {
                if !before.connected {
                    event_bus.publish(DeviceEvent::connected(address.clone()));
                }
                if after != before {
                    event_bus.publish(DeviceEvent::state_changed(address, after));
                }
            }
            Err(e) => {
                if before.connected {
                    event_bus.publish(DeviceEvent::disconnected(address, e.to_string()));
                }
            }
        }
        after
    }

    async fn get(&self, address: &DeviceAddress) -> Result<Arc<Mutex<DeviceShadow>>> {
        self.shadows
            .read()
            .await
            .get(address)
            .cloned()
            .ok_or(Error::DeviceNotFound)
    }
}

impl Default for BulbManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BulbManager {
    fn clone(&self) -> Self {
        Self {
            shadows: Arc::clone(&self.shadows),
            scheduler: Arc::clone(&self.scheduler),
            event_bus: self.event_bus.clone(),
        }
    }
}

impl std::fmt::Debug for BulbManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulbManager")
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}
