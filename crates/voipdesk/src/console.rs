// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process wiring: the host side (gateway, bridge host, download surface)
//! and the presentation side (facade, typed API) joined by the bridge channel.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use voipdesk_bridge::{BridgeHost, channel};
use voipdesk_client::{ConsoleClient, JsonFileStore, VoipApi, default_settings_path};
use voipdesk_config::VoipdeskConfig;
use voipdesk_core::VoipdeskError;
use voipdesk_gateway::{ApiGateway, FileDownloadSurface, Gateway, RetryPolicy, RetryingGateway};

pub struct Console {
    pub api: VoipApi,
    pub surface: Arc<FileDownloadSurface>,
    host: Arc<BridgeHost>,
    cancel: CancellationToken,
    serve: JoinHandle<()>,
}

impl Console {
    pub fn start(config: &VoipdeskConfig, cancel: &CancellationToken) -> Result<Self, VoipdeskError> {
        let gateway = Gateway::new(&config.gateway)?;
        let gateway: Arc<dyn ApiGateway> = if config.retry.enabled {
            info!(max_attempts = config.retry.max_attempts, "gateway retries enabled");
            Arc::new(RetryingGateway::new(gateway, RetryPolicy::from(&config.retry)))
        } else {
            Arc::new(gateway)
        };

        let host = Arc::new(BridgeHost::new(gateway));
        let surface = Arc::new(FileDownloadSurface::new(
            config.console.download_dir.as_str(),
            config.gateway.timeout(),
        )?);
        host.attach_surface(surface.clone());

        let cancel = cancel.child_token();
        let (bridge, inbox) = channel(config.bridge.channel_capacity);
        let serve = tokio::spawn(Arc::clone(&host).serve(inbox, cancel.clone()));

        let settings_path = settings_path(config)?;
        debug!(path = %settings_path.display(), "using settings file");
        let store = Arc::new(JsonFileStore::new(settings_path));
        let client = Arc::new(ConsoleClient::new(Arc::new(bridge), store));

        Ok(Self {
            api: VoipApi::new(client),
            surface,
            host,
            cancel,
            serve,
        })
    }

    pub fn client(&self) -> &Arc<ConsoleClient> {
        self.api.client()
    }

    /// Waits for pending downloads, then stops the bridge host.
    pub async fn shutdown(self) {
        for result in self.surface.finish().await {
            if let Err(e) = result {
                warn!(error = %e, "download did not complete");
            }
        }
        self.host.detach_surface();
        self.cancel.cancel();
        if let Err(e) = self.serve.await {
            warn!(error = %e, "bridge host ended abnormally");
        }
    }
}

fn settings_path(config: &VoipdeskConfig) -> Result<PathBuf, VoipdeskError> {
    config
        .console
        .settings_path
        .as_ref()
        .map(PathBuf::from)
        .or_else(default_settings_path)
        .ok_or_else(|| {
            VoipdeskError::Config(
                "no config directory on this platform; set console.settings_path".to_string(),
            )
        })
}

/// Initializes the tracing subscriber with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("voipdesk={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
