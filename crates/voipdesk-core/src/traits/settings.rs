// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable key-value settings used to restore credentials between sessions.

use serde_json::Value;

use crate::error::VoipdeskError;

/// A JSON key-value store.
///
/// Only the settings screen writes here; the facade reads it in
/// `ensure_ready`. The gateway never touches it.
pub trait SettingsStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<Value>, VoipdeskError>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: Value) -> Result<(), VoipdeskError>;

    /// Removes the value stored under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), VoipdeskError>;
}
