// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background work for the voipdesk console.
//!
//! - [`Poller`]: interval polling where only the newest response wins.
//! - [`fan_out`]: one concurrent fetch per subject, failures isolated.
//! - [`UploadQueue`]: strictly sequential sound uploads.
//! - [`UserBoard`] and [`AudioLibrary`]: the views the CLI renders.

pub mod board;
pub mod fanout;
pub mod library;
pub mod poller;
pub mod tick;
pub mod upload;

pub use board::{BoardRow, UserBoard};
pub use fanout::{AvailabilityRecord, StatusRecord, SubjectRecord, fan_out};
pub use library::AudioLibrary;
pub use poller::{Poller, Snapshot};
pub use tick::TickGate;
pub use upload::{ItemEdit, SoundSink, UploadItem, UploadQueue, UploadStatus, UploadSummary};
