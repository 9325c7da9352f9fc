// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Call history and recording download.

use clap::Args;
use voipdesk_client::{CallFilter, CallParty, CallRecord, CallWindow};
use voipdesk_core::VoipdeskError;

use crate::console::Console;
use crate::render::{Output, print_json, table};

#[derive(Args, Debug)]
pub struct CallsArgs {
    /// How far back to look.
    #[arg(long, default_value_t = 48)]
    pub hours: i64,

    /// Substring of either party's number or nickname.
    #[arg(long)]
    pub search: Option<String>,

    /// Call type, e.g. inbound or outbound.
    #[arg(long = "type")]
    pub call_type: Option<String>,

    /// Call status (falls back to the disposition).
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub answered: Option<bool>,
}

impl CallsArgs {
    fn filter(&self) -> CallFilter {
        CallFilter {
            search: self.search.clone(),
            call_type: self.call_type.clone(),
            status: self.status.clone(),
            answered: self.answered,
        }
    }
}

pub async fn run_calls(console: &Console, out: Output, args: CallsArgs) -> Result<(), VoipdeskError> {
    if args.hours <= 0 {
        return Err(VoipdeskError::InvalidInput("--hours must be positive".to_string()));
    }
    let calls = console.api.list_calls(CallWindow::last_hours(args.hours)).await?;
    let shown = args.filter().apply(&calls);

    if out.json {
        print_json(&shown);
        return Ok(());
    }
    let rows: Vec<Vec<String>> = shown.iter().map(|c| call_row(c, out)).collect();
    println!(
        "{}",
        table(&["STARTED", "TYPE", "FROM", "TO", "DURATION", "REC", "STATUS"], &rows)
    );
    println!("{} of {} calls", shown.len(), calls.len());
    Ok(())
}

fn call_row(call: &CallRecord, out: Output) -> Vec<String> {
    vec![
        call.started_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
        call.call_type.clone(),
        party(call.from.as_ref()),
        party(call.to.as_ref()),
        call.duration_label(),
        if call.has_recording { "yes" } else { "" }.to_string(),
        out.status_badge(call.effective_status().unwrap_or("-")),
    ]
}

fn party(party: Option<&CallParty>) -> String {
    match party {
        Some(CallParty {
            number,
            nickname: Some(nick),
        }) if !nick.is_empty() => format!("{nick} <{number}>"),
        Some(p) => p.number.clone(),
        None => String::new(),
    }
}

/// Downloads a call's recording into the configured directory.
pub async fn run_recording(console: &Console, out: Output, call_uuid: &str) -> Result<(), VoipdeskError> {
    let filename = console.api.download_recording(call_uuid).await?;
    for result in console.surface.finish().await {
        let path = result?;
        if out.json {
            print_json(&serde_json::json!({"call": call_uuid, "file": path}));
        } else {
            println!("{}", out.ok(&format!("{filename} saved to {}", path.display())));
        }
    }
    Ok(())
}
