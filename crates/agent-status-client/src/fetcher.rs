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

//! Status fetcher: one pass over the endpoint table.
//!
//! Endpoints are requested one at a time in table order. A failure for one
//! endpoint is logged and recorded as [`CardOutcome::Skipped`]; it never
//! aborts the rest of the cycle.

use std::future::Future;
use std::time::Duration;

use log::{debug, warn};

use crate::card::{CardOutcome, DisplayCard, SkippedEndpoint};
use crate::endpoint::Endpoint;
use crate::protocol::{FetchError, RemoteStatus};

/// Source of agent status documents.
///
/// [`HttpStatusSource`] is the production implementation; tests substitute
/// scripted sources.
pub trait StatusSource: Send + Sync + 'static {
    /// Fetch and decode the status served at `endpoint`.
    fn fetch(
        &self,
        endpoint: &Endpoint,
    ) -> impl Future<Output = Result<RemoteStatus, FetchError>> + Send;
}

/// Fetches status documents over HTTP with a plain GET.
#[derive(Debug, Clone)]
pub struct HttpStatusSource {
    client: reqwest::Client,
}

impl HttpStatusSource {
    /// Create a source. `timeout` of `None` waits on each request for as long
    /// as the server keeps the connection open.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl StatusSource for HttpStatusSource {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<RemoteStatus, FetchError> {
        let response = self.client.get(endpoint.as_str()).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.bytes().await?;
        RemoteStatus::from_slice(&body)
    }
}

/// Outcome of one complete pass over the endpoint table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// One entry per endpoint, in table order.
    pub outcomes: Vec<CardOutcome>,
}

impl CycleReport {
    /// Cards for the endpoints that answered, in table order.
    #[must_use]
    pub fn cards(&self) -> Vec<DisplayCard> {
        self.outcomes.iter().filter_map(CardOutcome::card).cloned().collect()
    }

    /// Endpoints that produced no card.
    #[must_use]
    pub fn skipped(&self) -> Vec<&SkippedEndpoint> {
        self.outcomes.iter().filter_map(CardOutcome::skipped).collect()
    }

    #[must_use]
    pub fn ready_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.card().is_some()).count()
    }
}

/// Poll every endpoint once, sequentially, and map the answers into cards.
///
/// Completes only after every endpoint has been attempted.
pub async fn fetch_cycle<S: StatusSource>(
    source: &S,
    endpoints: &[Endpoint],
    explorer_prefix: &str,
) -> CycleReport {
    let mut outcomes = Vec::with_capacity(endpoints.len());

    for (index, endpoint) in endpoints.iter().enumerate() {
        let outcome = match source.fetch(endpoint).await {
            Ok(status) => CardOutcome::Ready(DisplayCard::from_status(index, &status, explorer_prefix)),
            Err(e) => {
                warn!("[Agent {}] Failed to fetch status from {}: {}", index + 1, endpoint, e);
                CardOutcome::Skipped(SkippedEndpoint {
                    ordinal: index + 1,
                    endpoint: endpoint.clone(),
                    reason: e.to_string(),
                })
            }
        };
        outcomes.push(outcome);
    }

    let report = CycleReport { outcomes };
    debug!(
        "Fetch cycle complete: {}/{} endpoints answered",
        report.ready_count(),
        endpoints.len()
    );
    report
}
