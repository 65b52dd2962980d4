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

//! Headless modes: a single fetch cycle, or continuous polling to stdout.

use std::io::Write;

use agent_status_client::{
    fetch_cycle, DisplayCard, FetchError, HttpStatusSource, Poller, SkippedEndpoint, Snapshot,
};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum HeadlessError {
    #[error("failed to create status source: {0}")]
    Source(#[from] FetchError),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// One JSON line per published snapshot.
#[derive(Debug, Serialize)]
pub struct SnapshotLine<'a> {
    pub sequence: u64,
    pub completed_at: Option<DateTime<Utc>>,
    pub cards: Vec<&'a DisplayCard>,
    pub skipped: Vec<&'a SkippedEndpoint>,
}

impl<'a> From<&'a Snapshot> for SnapshotLine<'a> {
    fn from(snapshot: &'a Snapshot) -> Self {
        Self {
            sequence: snapshot.sequence,
            completed_at: snapshot.completed_at,
            cards: snapshot.cards(),
            skipped: snapshot.skipped(),
        }
    }
}

/// Run one fetch cycle and print the visible cards as a JSON array.
pub fn run_once(runtime: &tokio::runtime::Runtime, config: &AppConfig) -> Result<(), HeadlessError> {
    let source = HttpStatusSource::new(config.request_timeout())?;
    let endpoints = config.endpoint_table();

    let report = runtime.block_on(fetch_cycle(&source, &endpoints, &config.explorer_url_prefix));
    for skipped in report.skipped() {
        warn!("Agent {} ({}) skipped: {}", skipped.ordinal, skipped.endpoint, skipped.reason);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &report.cards())?;
    writeln!(out)?;
    Ok(())
}

/// Poll until Ctrl-C, printing each snapshot as a JSON line.
pub fn run_watch(runtime: &tokio::runtime::Runtime, config: &AppConfig) -> Result<(), HeadlessError> {
    let source = HttpStatusSource::new(config.request_timeout())?;
    let endpoints = config.endpoint_table();
    let poller_config = config.poller_config();

    runtime.block_on(async move {
        let poller = Poller::spawn(source, endpoints, poller_config);
        let mut snapshots = poller.subscribe();

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let line = {
                        let snapshot = snapshots.borrow_and_update();
                        serde_json::to_string(&SnapshotLine::from(&*snapshot))?
                    };
                    let stdout = std::io::stdout();
                    let mut out = stdout.lock();
                    writeln!(out, "{line}")?;
                    out.flush()?;
                }
                _ = &mut ctrl_c => {
                    info!("Interrupted, stopping");
                    break;
                }
            }
        }

        poller.shutdown();
        Ok::<(), HeadlessError>(())
    })
}
