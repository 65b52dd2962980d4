// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Polling loop that re-runs the fetch cycle on a fixed interval.
//!
//! The loop runs in a background task and publishes each completed cycle as
//! a [`Snapshot`] through a watch channel, replacing the previous one. At
//! most one cycle is in flight at a time, and every snapshot carries a
//! strictly increasing sequence number. Dropping the [`Poller`] handle
//! cancels the task, including a cycle that is waiting on a hung endpoint.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::card::{CardOutcome, DisplayCard, SkippedEndpoint, EXPLORER_ADDRESS_PREFIX};
use crate::endpoint::Endpoint;
use crate::fetcher::{fetch_cycle, StatusSource};

/// Default polling period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// What to do with a tick that fires while a cycle is still running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlapPolicy {
    /// Drop the late tick and wait a full period after the overrunning
    /// cycle completes.
    #[default]
    Skip,
    /// Start the next cycle as soon as the running one completes.
    Queue,
}

impl OverlapPolicy {
    fn missed_tick_behavior(self) -> MissedTickBehavior {
        match self {
            Self::Skip => MissedTickBehavior::Skip,
            Self::Queue => MissedTickBehavior::Delay,
        }
    }
}

/// Configuration for the polling loop.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Time between cycle starts.
    pub interval: Duration,
    /// Behavior when a cycle outlasts the interval.
    pub overlap: OverlapPolicy,
    /// Prefix for card explorer links.
    pub explorer_prefix: String,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            overlap: OverlapPolicy::default(),
            explorer_prefix: EXPLORER_ADDRESS_PREFIX.to_string(),
        }
    }
}

/// One published polling cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Cycle number, starting at 1. Zero marks the initial empty snapshot.
    pub sequence: u64,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// One entry per endpoint, in table order.
    pub outcomes: Vec<CardOutcome>,
}

impl Snapshot {
    /// Cards to render, in table order.
    #[must_use]
    pub fn cards(&self) -> Vec<&DisplayCard> {
        self.outcomes.iter().filter_map(CardOutcome::card).collect()
    }

    #[must_use]
    pub fn skipped(&self) -> Vec<&SkippedEndpoint> {
        self.outcomes.iter().filter_map(CardOutcome::skipped).collect()
    }

    /// Whether no cycle has completed yet.
    #[must_use]
    pub fn is_initial(&self) -> bool {
        self.sequence == 0
    }

    /// Whether this snapshot supersedes the cycle numbered `sequence`.
    #[must_use]
    pub fn is_newer_than(&self, sequence: u64) -> bool {
        self.sequence > sequence
    }

    /// Wall-clock duration of the cycle.
    #[must_use]
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

/// Handle to a running polling loop.
///
/// The loop stops when the handle is dropped or [`Poller::shutdown`] is
/// called.
pub struct Poller {
    snapshot_rx: watch::Receiver<Snapshot>,
    cancel_token: CancellationToken,
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("cancel_token", &self.cancel_token)
            .finish_non_exhaustive()
    }
}

impl Poller {
    /// Spawn the polling loop on the current tokio runtime.
    ///
    /// The first cycle starts immediately.
    #[must_use]
    pub fn spawn<S: StatusSource>(source: S, endpoints: Vec<Endpoint>, config: PollerConfig) -> Self {
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::default());
        let cancel_token = CancellationToken::new();

        let task_cancel = cancel_token.clone();
        let source = Arc::new(source);

        info!(
            "Starting status poller for {} endpoints every {} ms",
            endpoints.len(),
            config.interval.as_millis()
        );

        tokio::spawn(async move {
            poll_loop(source, endpoints, config, snapshot_tx, task_cancel).await;
        });

        Self {
            snapshot_rx,
            cancel_token,
        }
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn latest(&self) -> Snapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Sequence number of the latest published snapshot.
    #[must_use]
    pub fn latest_sequence(&self) -> u64 {
        self.snapshot_rx.borrow().sequence
    }

    /// Receiver that is notified on every publish.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_rx.clone()
    }

    /// Stop the loop. Already published snapshots stay readable.
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.cancel_token.is_cancelled()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

async fn poll_loop<S: StatusSource>(
    source: Arc<S>,
    endpoints: Vec<Endpoint>,
    config: PollerConfig,
    snapshot_tx: watch::Sender<Snapshot>,
    cancel_token: CancellationToken,
) {
    let mut interval = tokio::time::interval(config.interval);
    interval.set_missed_tick_behavior(config.overlap.missed_tick_behavior());
    let mut sequence = 0u64;

    loop {
        let tick_at = tokio::select! {
            tick_at = interval.tick() => tick_at,
            () = cancel_token.cancelled() => {
                info!("Status poller cancelled");
                return;
            }
        };

        let started_at = Utc::now();
        let report = tokio::select! {
            report = fetch_cycle(source.as_ref(), &endpoints, &config.explorer_prefix) => report,
            () = cancel_token.cancelled() => {
                info!("Status poller cancelled during fetch cycle");
                return;
            }
        };

        // The interval still yields a tick that fell due during the cycle;
        // restarting it drops that tick.
        if config.overlap == OverlapPolicy::Skip && tick_at.elapsed() >= config.interval {
            debug!("Fetch cycle outlasted the {} ms interval, skipping late tick", config.interval.as_millis());
            interval.reset();
        }

        sequence += 1;
        let snapshot = Snapshot {
            sequence,
            started_at: Some(started_at),
            completed_at: Some(Utc::now()),
            outcomes: report.outcomes,
        };
        debug!(
            "Publishing snapshot #{} with {} cards",
            snapshot.sequence,
            snapshot.cards().len()
        );

        if snapshot_tx.send(snapshot).is_err() {
            info!("All snapshot receivers dropped, stopping status poller");
            return;
        }
    }
}
