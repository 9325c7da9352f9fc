// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The credential bundle attached to every outbound API call.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Settings-store key holding the serialized [`CredentialBundle`].
pub const CREDENTIALS_KEY: &str = "api_auth_settings";

/// Endpoint base plus the four identity values sent as `X-Auth-*` headers.
///
/// The bundle is replaced as a whole; there are deliberately no setters.
/// The password is only readable through [`CredentialBundle::auth_password`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialBundle {
    pub api_url: String,
    pub auth_for: String,
    pub auth_reseller: String,
    #[serde(
        serialize_with = "serialize_secret",
        deserialize_with = "deserialize_secret"
    )]
    auth_password: SecretString,
    pub auth_user: String,
}

impl CredentialBundle {
    pub fn new(
        api_url: impl Into<String>,
        auth_for: impl Into<String>,
        auth_reseller: impl Into<String>,
        auth_password: impl Into<String>,
        auth_user: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            auth_for: auth_for.into(),
            auth_reseller: auth_reseller.into(),
            auth_password: SecretString::from(auth_password.into()),
            auth_user: auth_user.into(),
        }
    }

    pub fn auth_password(&self) -> &str {
        self.auth_password.expose_secret()
    }

    /// The four header pairs in wire order.
    pub fn auth_headers(&self) -> [(&'static str, &str); 4] {
        [
            ("X-Auth-For", self.auth_for.as_str()),
            ("X-Auth-Reseller", self.auth_reseller.as_str()),
            ("X-Auth-Password", self.auth_password()),
            ("X-Auth-User", self.auth_user.as_str()),
        ]
    }
}

impl Clone for CredentialBundle {
    fn clone(&self) -> Self {
        Self {
            api_url: self.api_url.clone(),
            auth_for: self.auth_for.clone(),
            auth_reseller: self.auth_reseller.clone(),
            auth_password: SecretString::from(self.auth_password().to_owned()),
            auth_user: self.auth_user.clone(),
        }
    }
}

impl PartialEq for CredentialBundle {
    fn eq(&self, other: &Self) -> bool {
        self.api_url == other.api_url
            && self.auth_for == other.auth_for
            && self.auth_reseller == other.auth_reseller
            && self.auth_password() == other.auth_password()
            && self.auth_user == other.auth_user
    }
}

impl Eq for CredentialBundle {}

impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("api_url", &self.api_url)
            .field("auth_for", &self.auth_for)
            .field("auth_reseller", &self.auth_reseller)
            .field("auth_password", &"[REDACTED]")
            .field("auth_user", &self.auth_user)
            .finish()
    }
}

fn serialize_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

fn deserialize_secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}
