// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interval polling with tick discipline.
//!
//! The first fetch starts immediately, then one per period. Every fetch runs
//! on its own task, so a slow request never delays the next tick; results go
//! through a [`TickGate`] so only a response newer than the current snapshot
//! replaces it. A failed fetch is logged and leaves the snapshot as it was.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use voipdesk_core::VoipdeskError;

use crate::tick::TickGate;

/// The latest accepted result. `tick` is 0 until the first fetch succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub tick: u64,
    pub items: Vec<T>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            tick: 0,
            items: Vec::new(),
        }
    }
}

/// Handle to a running poll loop. Dropping it stops the loop.
pub struct Poller<T> {
    name: &'static str,
    snapshot: watch::Receiver<Snapshot<T>>,
    gate: Arc<TickGate>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl<T: Clone + Send + Sync + 'static> Poller<T> {
    /// Starts polling `fetch` every `period` until `cancel` (or [`Poller::stop`]) fires.
    ///
    /// A zero `period` is rejected with [`VoipdeskError::InvalidInput`].
    pub fn spawn<F, Fut>(
        name: &'static str,
        period: Duration,
        cancel: &CancellationToken,
        fetch: F,
    ) -> Result<Self, VoipdeskError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>, VoipdeskError>> + Send + 'static,
    {
        if period.is_zero() {
            return Err(VoipdeskError::InvalidInput(format!(
                "poller `{name}` needs a non-zero period"
            )));
        }
        let (tx, snapshot) = watch::channel(Snapshot::default());
        let gate = Arc::new(TickGate::new());
        let cancel = cancel.child_token();

        let handle = tokio::spawn(poll_loop(
            name,
            period,
            Arc::new(fetch),
            Arc::new(tx),
            Arc::clone(&gate),
            cancel.clone(),
        ));
        info!(poller = name, period_secs = period.as_secs_f64(), "poller started");

        Ok(Self {
            name,
            snapshot,
            gate,
            cancel,
            handle: Some(handle),
        })
    }

    pub fn latest(&self) -> Snapshot<T> {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshot.clone()
    }

    pub fn last_accepted_tick(&self) -> u64 {
        self.gate.last_accepted()
    }

    /// Stops scheduling. Fetches still in flight finish, but their results are dropped.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stops and waits for the scheduling loop to exit.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
        {
            warn!(poller = self.name, error = %e, "poll loop ended abnormally");
        }
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_loop<T, F, Fut>(
    name: &'static str,
    period: Duration,
    fetch: Arc<F>,
    tx: Arc<watch::Sender<Snapshot<T>>>,
    gate: Arc<TickGate>,
    cancel: CancellationToken,
) where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>, VoipdeskError>> + Send + 'static,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                let tick = gate.issue();
                let fut = fetch();
                let tx = Arc::clone(&tx);
                let gate = Arc::clone(&gate);
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    let result = fut.await;
                    if cancel.is_cancelled() {
                        debug!(poller = name, tick, "result arrived after stop, dropped");
                        return;
                    }
                    match result {
                        Ok(items) => {
                            let published = gate.accept_with(tick, || {
                                tx.send_replace(Snapshot { tick, items });
                            });
                            if published.is_none() {
                                debug!(poller = name, tick, "stale result discarded");
                            }
                        }
                        Err(e) => warn!(poller = name, tick, error = %e, "poll failed, keeping previous snapshot"),
                    }
                });
            }
        }
    }
    info!(poller = name, "poller stopped");
}
