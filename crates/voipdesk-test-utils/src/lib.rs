// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for voipdesk integration tests.
//!
//! Provides in-memory collaborators and an end-to-end harness so tests run
//! without a real VOIP API or a settings file.
//!
//! # Components
//!
//! - [`MemorySettingsStore`] - `SettingsStore` backed by a map
//! - [`ScriptedBridge`] - `Bridge` that records calls and answers from a script
//! - [`RecordingSurface`] - `DownloadSurface` that records accepted downloads
//! - [`TestHarness`] - wiremock server, gateway, bridge host and facade wired together

pub mod harness;
pub mod mocks;

pub use harness::TestHarness;
pub use mocks::{MemorySettingsStore, RecordingSurface, ScriptedBridge};
