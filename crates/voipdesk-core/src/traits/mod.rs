// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits at the seams between the console's contexts.
//!
//! Async traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod bridge;
pub mod settings;
pub mod surface;

pub use bridge::Bridge;
pub use settings::SettingsStore;
pub use surface::DownloadSurface;
