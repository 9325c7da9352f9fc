// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Monotonic tick tagging for overlapping fetches.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Issues increasing tick ids and accepts a result only if it is newer than
/// the last accepted one. A slow tick that finishes after a faster, later
/// tick is therefore dropped instead of overwriting fresher state.
#[derive(Debug, Default)]
pub struct TickGate {
    next: AtomicU64,
    accepted: Mutex<u64>,
}

impl TickGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id for a new fetch. Ids start at 1.
    pub fn issue(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// The newest tick accepted so far, 0 when none.
    pub fn last_accepted(&self) -> u64 {
        *self.accepted.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn accept(&self, tick: u64) -> bool {
        self.accept_with(tick, || ()).is_some()
    }

    /// Accepts `tick` and runs `publish` while no other tick can be accepted.
    /// Returns `None` without running `publish` when `tick` is stale.
    pub fn accept_with<R>(&self, tick: u64, publish: impl FnOnce() -> R) -> Option<R> {
        let mut accepted = self.accepted.lock().unwrap_or_else(|p| p.into_inner());
        if tick <= *accepted {
            return None;
        }
        *accepted = tick;
        Some(publish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_increase_from_one() {
        let gate = TickGate::new();
        assert_eq!(gate.issue(), 1);
        assert_eq!(gate.issue(), 2);
        assert_eq!(gate.last_accepted(), 0);
    }

    #[test]
    fn late_tick_is_rejected() {
        let gate = TickGate::new();
        let first = gate.issue();
        let second = gate.issue();
        assert!(gate.accept(second));
        assert!(!gate.accept(first));
        assert_eq!(gate.last_accepted(), second);
    }

    #[test]
    fn same_tick_is_accepted_once() {
        let gate = TickGate::new();
        let tick = gate.issue();
        assert_eq!(gate.accept_with(tick, || "published"), Some("published"));
        assert_eq!(gate.accept_with(tick, || "again"), None);
    }

    #[test]
    fn skipped_ticks_do_not_block_newer_ones() {
        let gate = TickGate::new();
        let _failed = gate.issue();
        let ok = gate.issue();
        assert!(gate.accept(ok));
    }
}
