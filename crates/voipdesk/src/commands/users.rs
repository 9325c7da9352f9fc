// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `voipdesk users` and the live `voipdesk watch` board.

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use voipdesk_client::{User, user_matches};
use voipdesk_config::model::PollingConfig;
use voipdesk_core::VoipdeskError;
use voipdesk_orchestration::{BoardRow, UserBoard};

use crate::console::Console;
use crate::render::{Output, print_json, table};

pub async fn run_users(
    console: &Console,
    out: Output,
    search: Option<&str>,
) -> Result<(), VoipdeskError> {
    let users: Vec<User> = console
        .api
        .list_users()
        .await?
        .into_iter()
        .filter(|u| search.is_none_or(|s| user_matches(u, s)))
        .collect();

    if out.json {
        print_json(&users);
        return Ok(());
    }
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| {
            vec![
                u.extension.to_string(),
                u.display_name.clone(),
                u.user_name.clone(),
                u.timezone.clone().unwrap_or_default(),
                u.country_code.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!("{}", table(&["EXT", "NAME", "USERNAME", "TIMEZONE", "COUNTRY"], &rows));
    Ok(())
}

/// Redraws the board on every accepted poll until `cancel` fires.
pub async fn run_watch(
    console: &Console,
    out: Output,
    polling: &PollingConfig,
    cancel: &CancellationToken,
) -> Result<(), VoipdeskError> {
    let board = UserBoard::start(console.api.clone(), polling, cancel).await?;
    let mut statuses = board.status_updates();
    let mut availability = board.availability_updates();
    if !out.json {
        println!(
            "{}",
            out.heading(&format!("watching {} users, Ctrl+C to stop", board.users().len()))
        );
    }

    loop {
        let changed = tokio::select! {
            _ = cancel.cancelled() => break,
            changed = statuses.changed() => changed,
            changed = next_change(availability.as_mut()) => changed,
        };
        if changed.is_err() {
            debug!("board poller closed");
            break;
        }
        print_board(&board.rows(), out);
    }

    board.shutdown().await;
    Ok(())
}

async fn next_change<T>(rx: Option<&mut watch::Receiver<T>>) -> Result<(), watch::error::RecvError> {
    match rx {
        Some(rx) => rx.changed().await,
        None => std::future::pending().await,
    }
}

fn print_board(rows: &[BoardRow], out: Output) {
    if out.json {
        match serde_json::to_string(rows) {
            Ok(line) => println!("{line}"),
            Err(e) => debug!(error = %e, "board row serialization failed"),
        }
        return;
    }
    let rendered: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            let reachability = if r.available { "available" } else { "unavailable" };
            vec![
                r.extension.to_string(),
                r.display_name.clone(),
                format!("{} ({reachability})", out.status_badge(&r.status)),
            ]
        })
        .collect();
    println!();
    println!("{}", chrono::Local::now().format("%H:%M:%S"));
    println!("{}", table(&["EXT", "NAME", "STATE"], &rendered));
}
