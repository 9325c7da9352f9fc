// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sounds and playlists.

use std::path::PathBuf;

use clap::Args;
use tracing::warn;
use voipdesk_client::NewPlaylist;
use voipdesk_config::model::UploadConfig;
use voipdesk_core::VoipdeskError;
use voipdesk_orchestration::{AudioLibrary, UploadStatus, UploadSummary};

use crate::console::Console;
use crate::render::{Output, print_json, table};

pub async fn run_sounds(console: &Console, out: Output) -> Result<(), VoipdeskError> {
    let sounds = console.api.list_sounds().await?;
    if out.json {
        print_json(&sounds);
        return Ok(());
    }
    let rows: Vec<Vec<String>> = sounds
        .iter()
        .map(|s| {
            vec![
                s.uuid.clone(),
                s.name.clone(),
                s.tag.clone(),
                s.audio_type.to_string(),
                s.file_name.clone(),
            ]
        })
        .collect();
    println!("{}", table(&["UUID", "NAME", "TAG", "TYPE", "FILE"], &rows));
    Ok(())
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Audio files to upload, in order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Tag for every file (defaults to upload.default_tag).
    #[arg(long)]
    pub tag: Option<String>,

    /// Audio type for every file (defaults to upload.default_audio_type).
    #[arg(long)]
    pub audio_type: Option<u32>,
}

/// Uploads the files one at a time. Returns whether every file succeeded.
pub async fn run_upload(
    console: &Console,
    out: Output,
    defaults: &UploadConfig,
    args: UploadArgs,
) -> Result<bool, VoipdeskError> {
    let defaults = UploadConfig {
        default_tag: args.tag.unwrap_or_else(|| defaults.default_tag.clone()),
        default_audio_type: args.audio_type.unwrap_or(defaults.default_audio_type),
    };
    let library = AudioLibrary::new(console.api.clone(), defaults);
    library.queue().enqueue_paths(&args.files)?;

    let summary = library.upload_all().await?;
    print_summary(&summary, out);
    Ok(summary.failed() == 0)
}

fn print_summary(summary: &UploadSummary, out: Output) {
    if out.json {
        print_json(summary);
        return;
    }
    for item in &summary.items {
        match item.status {
            UploadStatus::Success => println!("{}", out.ok(&item.file_name)),
            _ => println!(
                "{}",
                out.fail(&format!(
                    "{}: {}",
                    item.file_name,
                    item.error.as_deref().unwrap_or("Upload failed")
                ))
            ),
        }
    }
    println!("{} uploaded, {} failed", summary.succeeded(), summary.failed());
}

pub async fn run_delete_sound(console: &Console, out: Output, sound_uuid: &str) -> Result<(), VoipdeskError> {
    console.api.delete_sound(sound_uuid).await?;
    println!("{}", out.ok(&format!("deleted sound {sound_uuid}")));
    Ok(())
}

pub async fn run_playlists(console: &Console, out: Output, upload: &UploadConfig) -> Result<(), VoipdeskError> {
    let library = AudioLibrary::new(console.api.clone(), upload.clone());
    let playlists = library.refresh_playlists().await?;
    if out.json {
        print_json(&playlists);
        return Ok(());
    }
    if let Err(e) = library.refresh_sounds().await {
        warn!(error = %e, "sound names unavailable");
    }

    let rows: Vec<Vec<String>> = playlists
        .iter()
        .map(|p| {
            let sounds: Vec<String> = p.sounds.iter().map(|s| library.sound_name(s)).collect();
            vec![
                p.name.clone(),
                out.yes_no(p.random),
                out.yes_no(p.is_default),
                sounds.join(", "),
            ]
        })
        .collect();
    println!("{}", table(&["PLAYLIST", "RANDOM", "DEFAULT", "SOUNDS"], &rows));
    Ok(())
}

#[derive(Args, Debug)]
pub struct CreatePlaylistArgs {
    pub name: String,

    /// Play sounds in random order.
    #[arg(long)]
    pub random: bool,

    /// Make this the default playlist.
    #[arg(long = "default")]
    pub is_default: bool,

    /// Sound uuid; repeat for several.
    #[arg(long = "sound")]
    pub sounds: Vec<String>,
}

pub async fn run_create_playlist(
    console: &Console,
    out: Output,
    args: CreatePlaylistArgs,
) -> Result<(), VoipdeskError> {
    let playlist = NewPlaylist {
        name: args.name,
        random: args.random,
        is_default: args.is_default,
        sounds: args.sounds,
    };
    console.api.create_playlist(&playlist).await?;
    println!("{}", out.ok(&format!("created playlist {}", playlist.name.trim())));
    Ok(())
}
