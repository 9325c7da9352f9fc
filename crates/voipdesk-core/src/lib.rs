// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the voipdesk console.
//!
//! This crate provides the error type, the shared data model (credential
//! bundle, result envelope, bridge operation catalog) and the collaborator
//! traits used by the gateway, bridge, client and orchestration crates.

pub mod catalog;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use catalog::BridgeCall;
pub use credentials::{CREDENTIALS_KEY, CredentialBundle};
pub use envelope::ResultEnvelope;
pub use error::VoipdeskError;
pub use types::{ApiRequest, AppFeatures, FEATURES_KEY, RequestOptions, Verb};

pub use traits::{Bridge, DownloadSurface, SettingsStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_matches_envelope_text() {
        let rejected = VoipdeskError::Rejected {
            status: 404,
            message: "User not found".into(),
        };
        assert_eq!(rejected.to_string(), "User not found");
        assert_eq!(VoipdeskError::SurfaceUnavailable.to_string(), "No window available");
        assert!(VoipdeskError::transport("timeout").is_transport());
        assert!(!VoipdeskError::Remote("x".into()).is_transport());
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_bridge<T: Bridge>() {}
        fn _assert_settings<T: SettingsStore>() {}
        fn _assert_surface<T: DownloadSurface>() {}
    }
}
