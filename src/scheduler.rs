// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Settle-delay reconciliation scheduling.
//!
//! A bulb takes a moment to apply a channel write; reading it back
//! immediately returns mid-transition garbage. After every successful
//! mutation the manager therefore schedules a refresh to run once the settle
//! delay has elapsed.
//!
//! Scheduling is keyed by device address and *coalesces*: scheduling a
//! refresh for a device that already has one pending replaces the pending
//! one instead of stacking overlapping reads. A refresh is an idempotent
//! re-read, so the latest scheduled read is always sufficient.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::event::DeviceAddress;

/// Default settle delay between a write and its read-back.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Reconciliation tuning, fixed at construction time.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use magichome_lib::scheduler::ReconcileConfig;
///
/// let config = ReconcileConfig::default()
///     .with_settle_delay(Duration::from_millis(500))
///     .with_query_before_command();
/// assert_eq!(config.settle_delay, Duration::from_millis(500));
/// assert!(config.query_before_command);
/// ```
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// How long to wait after a write before trusting a read-back.
    pub settle_delay: Duration,
    /// Refresh synchronously before translating each command, so scaling
    /// math runs on the freshest possible state.
    pub query_before_command: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            query_before_command: false,
        }
    }
}

impl ReconcileConfig {
    /// Sets the settle delay.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Enables the synchronous refresh before each command.
    #[must_use]
    pub fn with_query_before_command(mut self) -> Self {
        self.query_before_command = true;
        self
    }
}

/// Schedules at most one pending refresh per device.
///
/// The scheduler owns only timing and coalescing; what a refresh *does* is
/// the future handed to [`schedule`](Self::schedule), so the mechanism stays
/// independent of shadow bookkeeping and fully testable.
#[derive(Debug)]
pub struct ReconciliationScheduler {
    config: ReconcileConfig,
    pending: Mutex<HashMap<DeviceAddress, JoinHandle<()>>>,
}

impl ReconciliationScheduler {
    /// Creates a scheduler with the given configuration.
    #[must_use]
    pub fn new(config: ReconcileConfig) -> Self {
        Self {
            config,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the reconciliation configuration.
    #[must_use]
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Schedules `refresh` to run after the settle delay.
    ///
    /// If the device already has a refresh pending, the pending one is
    /// aborted and replaced — rapid command sequences produce one read, not
    /// a pile-up.
    pub fn schedule<F>(&self, address: DeviceAddress, refresh: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.config.settle_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            refresh.await;
        });

        let mut pending = self.pending.lock();
        pending.retain(|_, task| !task.is_finished());
        if let Some(previous) = pending.insert(address.clone(), handle) {
            previous.abort();
            debug!(%address, "replaced pending reconciliation");
        } else {
            debug!(%address, ?delay, "scheduled reconciliation");
        }
    }

    /// Cancels the pending refresh for one device, if any.
    pub fn cancel(&self, address: &DeviceAddress) {
        if let Some(task) = self.pending.lock().remove(address) {
            task.abort();
        }
    }

    /// Cancels every pending refresh.
    pub fn cancel_all(&self) {
        for (_, task) in self.pending.lock().drain() {
            task.abort();
        }
    }

    /// Returns how many devices currently have a refresh pending.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        let mut pending = self.pending.lock();
        pending.retain(|_, task| !task.is_finished());
        pending.len()
    }
}

impl Drop for ReconciliationScheduler {
    fn drop(&mut self) {
        for (_, task) in self.pending.get_mut().drain() {
            task.abort();
        }
    }
}
