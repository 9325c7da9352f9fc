// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The message bridge between the presentation and host contexts.
//!
//! The presentation side holds a [`BridgeClient`] and can only name
//! operations from the fixed catalog ([`voipdesk_core::BridgeCall`]). The host
//! side runs a [`BridgeHost`] that owns the gateway. Calls and results cross as
//! serialized JSON text, so neither side ever holds a reference into the
//! other's state.

pub mod client;
pub mod frame;
pub mod host;

pub use client::BridgeClient;
pub use frame::{BridgeInbox, Frame, channel};
pub use host::BridgeHost;
