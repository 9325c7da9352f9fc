// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! voipdesk - operator console for a hosted VOIP platform.
//!
//! This is the binary entry point. Each run starts the host side (gateway
//! and bridge host) and the presentation side (facade and typed API) in one
//! process, executes one command, then drains and stops.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;
mod console;
mod render;
mod shutdown;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use voipdesk_config::{ConfigError, VoipdeskConfig};
use voipdesk_core::VoipdeskError;

use crate::commands::audio::{CreatePlaylistArgs, UploadArgs};
use crate::commands::calls::CallsArgs;
use crate::commands::routing::QueueUpdateArgs;
use crate::commands::settings::ConfigureArgs;
use crate::commands::{audio, calls, routing, settings, users};
use crate::console::{Console, init_tracing};
use crate::render::Output;

/// voipdesk - operator console for a hosted VOIP platform.
#[derive(Parser, Debug)]
#[command(name = "voipdesk", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colours.
    #[arg(long, global = true)]
    plain: bool,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Store (or clear) API credentials and feature switches.
    Configure(ConfigureArgs),
    /// List users.
    Users {
        /// Filter on name, extension, username, timezone or country.
        #[arg(long)]
        search: Option<String>,
    },
    /// Live board of user status and availability.
    Watch,
    /// List hunt groups and their members.
    HuntGroups,
    /// Add a user to a hunt group, or remove them if already a member.
    HuntGroupToggle {
        /// Group uuid or name.
        group: String,
        /// User uuid, username or extension.
        user: String,
    },
    /// List call queues.
    Queues,
    /// Change a call queue's settings.
    QueueUpdate(QueueUpdateArgs),
    /// Call history.
    Calls(CallsArgs),
    /// Download a call recording.
    Recording {
        call_uuid: String,
    },
    /// List sounds.
    Sounds,
    /// Upload audio files one after another.
    Upload(UploadArgs),
    /// Delete a sound.
    DeleteSound {
        sound_uuid: String,
    },
    /// List playlists.
    Playlists,
    /// Create a playlist.
    CreatePlaylist(CreatePlaylistArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            voipdesk_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.console.log_level);

    let out = Output::detect(cli.plain, cli.json);
    let cancel = CancellationToken::new();
    let console = match Console::start(&config, &cancel) {
        Ok(console) => console,
        Err(e) => {
            eprintln!("{}", out.error(&e.to_string()));
            return ExitCode::FAILURE;
        }
    };

    let result = run(cli.command, &console, &config, out, &cancel).await;
    console.shutdown().await;
    cancel.cancel();

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}", out.error(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<VoipdeskConfig, Vec<ConfigError>> {
    match path {
        Some(path) => voipdesk_config::load_and_validate_path(path),
        None => voipdesk_config::load_and_validate(),
    }
}

/// Runs one command. `Ok(false)` means it finished but reported failures.
async fn run(
    command: Commands,
    console: &Console,
    config: &VoipdeskConfig,
    out: Output,
    cancel: &CancellationToken,
) -> Result<bool, VoipdeskError> {
    match command {
        Commands::Configure(args) => settings::run_configure(console, out, args).await?,
        Commands::Users { search } => users::run_users(console, out, search.as_deref()).await?,
        Commands::Watch => {
            shutdown::install_signal_handler(cancel.clone());
            users::run_watch(console, out, &config.polling, cancel).await?
        }
        Commands::HuntGroups => routing::run_hunt_groups(console, out).await?,
        Commands::HuntGroupToggle { group, user } => {
            routing::run_hunt_group_toggle(console, out, &group, &user).await?
        }
        Commands::Queues => routing::run_queues(console, out).await?,
        Commands::QueueUpdate(args) => routing::run_queue_update(console, out, args).await?,
        Commands::Calls(args) => calls::run_calls(console, out, args).await?,
        Commands::Recording { call_uuid } => calls::run_recording(console, out, &call_uuid).await?,
        Commands::Sounds => audio::run_sounds(console, out).await?,
        Commands::Upload(args) => return audio::run_upload(console, out, &config.upload, args).await,
        Commands::DeleteSound { sound_uuid } => {
            audio::run_delete_sound(console, out, &sound_uuid).await?
        }
        Commands::Playlists => audio::run_playlists(console, out, &config.upload).await?,
        Commands::CreatePlaylist(args) => audio::run_create_playlist(console, out, args).await?,
    }
    Ok(true)
}
