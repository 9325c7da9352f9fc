// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Presentation-side client for the voipdesk console.
//!
//! - [`ConsoleClient`]: the facade over the bridge (`ensure_ready`, verb
//!   calls with envelope unwrapping, settings persistence).
//! - [`JsonFileStore`]: the durable settings store.
//! - [`ApiResponse`]: the remote API's nested status envelope.
//! - [`VoipApi`]: typed users, hunt groups, queues, calls and audio.

pub mod api;
pub mod facade;
pub mod filters;
pub mod models;
pub mod response;
pub mod store;

pub use api::{CallWindow, VoipApi, recording_file_name};
pub use facade::ConsoleClient;
pub use filters::{CallFilter, user_matches};
pub use models::{
    Availability, CallParty, CallQueue, CallRecord, HuntGroup, NewPlaylist, Playlist,
    QueueSettings, Sound, SoundUpload, User, UserStatus,
};
pub use response::ApiResponse;
pub use store::{JsonFileStore, default_settings_path};
