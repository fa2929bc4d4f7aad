// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the MagicHome adapter library.
//!
//! This module provides a comprehensive error hierarchy for handling failures
//! across the library: value validation, bulb protocol communication, command
//! rejection, and configuration loading.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when mediating
/// between a home-automation hub and MagicHome bulbs.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during protocol communication with a bulb.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A command was rejected before any write was performed.
    #[error("command rejected: {0}")]
    Rejected(#[from] CommandRejection),

    /// Error occurred while loading adapter configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Device was not found in the manager.
    #[error("device not found")]
    DeviceNotFound,
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// An unknown palette color index was provided.
    #[error("unknown color index: {0}")]
    UnknownColor(u8),

    /// An invalid channel selector string was provided.
    #[error("invalid channel selector: {0}")]
    InvalidChannel(String),

    /// A hardware MAC identifier could not be turned into a device address.
    #[error("invalid MAC identifier: {0}")]
    InvalidMac(String),
}

/// Errors related to protocol communication with a bulb.
///
/// The wire protocol itself lives behind the [`BulbClient`](crate::BulbClient)
/// trait; implementations use these variants to report failures.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Underlying socket I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection to the bulb failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The bulb returned a state reply the client could not interpret.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Reasons a command is rejected without touching the bulb.
///
/// Rejections are a distinguishable outcome of command translation, not a
/// protocol failure: no write is performed and no reconciliation is
/// scheduled for a rejected command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandRejection {
    /// Command requires a channel the bulb's capability class lacks.
    #[error("bulb does not support {feature}")]
    CapabilityMismatch {
        /// The feature the command needed.
        feature: String,
    },

    /// A parameter is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// Command requires a value that was not supplied.
    #[error("required value missing")]
    MissingValue,
}

/// Errors related to adapter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A device-list entry is malformed.
    ///
    /// Malformed entries are skipped during loading; this variant is only
    /// returned when an entry is validated individually.
    #[error("invalid device entry {index}: {reason}")]
    InvalidEntry {
        /// Position of the entry in the device list.
        index: usize,
        /// Description of what is wrong with it.
        reason: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
