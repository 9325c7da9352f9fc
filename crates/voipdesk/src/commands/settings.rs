// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `voipdesk configure`: store or clear API credentials.

use clap::Args;
use voipdesk_core::{AppFeatures, CredentialBundle, VoipdeskError};

use crate::console::Console;
use crate::render::Output;

#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// Base URL of the VOIP API, e.g. https://voip.example.net.
    #[arg(long, required_unless_present = "clear")]
    pub api_url: Option<String>,

    /// Tenant the operator acts for (X-Auth-For).
    #[arg(long, required_unless_present = "clear")]
    pub auth_for: Option<String>,

    /// Reseller account (X-Auth-Reseller).
    #[arg(long, required_unless_present = "clear")]
    pub auth_reseller: Option<String>,

    /// API user (X-Auth-User).
    #[arg(long, required_unless_present = "clear")]
    pub auth_user: Option<String>,

    /// API password. Prompted for when omitted.
    #[arg(long)]
    pub password: Option<String>,

    /// Allow downloading call recordings.
    #[arg(long)]
    pub enable_recording_download: bool,

    /// Remove the stored settings instead.
    #[arg(long, conflicts_with_all = ["api_url", "auth_for", "auth_reseller", "auth_user", "password"])]
    pub clear: bool,
}

pub async fn run_configure(
    console: &Console,
    out: Output,
    args: ConfigureArgs,
) -> Result<(), VoipdeskError> {
    if args.clear {
        console.client().clear_settings()?;
        println!("{}", out.ok("API settings removed"));
        return Ok(());
    }

    let api_url = required(args.api_url, "--api-url")?;
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        return Err(VoipdeskError::InvalidInput(
            "API URL must start with http:// or https://".to_string(),
        ));
    }
    let password = match args.password {
        Some(password) => password,
        None => rpassword::prompt_password("API password: ")?,
    };
    if password.is_empty() {
        return Err(VoipdeskError::InvalidInput("API password is required".to_string()));
    }

    let bundle = CredentialBundle::new(
        api_url.trim_end_matches('/'),
        required(args.auth_for, "--auth-for")?,
        required(args.auth_reseller, "--auth-reseller")?,
        password,
        required(args.auth_user, "--auth-user")?,
    );
    let features = AppFeatures {
        enable_call_recording_download: args.enable_recording_download,
    };
    console.client().save_settings(bundle, features).await?;
    println!("{}", out.ok("API settings saved"));
    Ok(())
}

fn required(value: Option<String>, flag: &str) -> Result<String, VoipdeskError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| VoipdeskError::InvalidInput(format!("{flag} is required")))
}
