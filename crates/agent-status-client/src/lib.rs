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

//! Client library for liquidation agent status endpoints.
//!
//! Agents expose their current on-chain address and state-machine round over
//! HTTP. This crate polls a table of such endpoints and turns the answers
//! into display cards for the dashboard. It is split into layers that can be
//! used on their own:
//!
//! - **Endpoint table**: the fixed list of status providers
//! - **Protocol**: decoding of the `{ "state": { "address", "round" } }` body
//! - **Cards**: mapping of a decoded status into a [`DisplayCard`]
//! - **Fetcher**: one sequential pass over the table ([`fetch_cycle`])
//! - **Poller**: a background loop re-running the fetcher on an interval
//!
//! # Quick Start
//!
//! ```no_run
//! use agent_status_client::{default_endpoints, HttpStatusSource, Poller, PollerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = HttpStatusSource::new(None).expect("http client");
//!     let poller = Poller::spawn(source, default_endpoints(), PollerConfig::default());
//!
//!     let mut snapshots = poller.subscribe();
//!     while snapshots.changed().await.is_ok() {
//!         for card in snapshots.borrow().cards() {
//!             println!("{}: {} ({})", card.name, card.status, card.address);
//!         }
//!     }
//! }
//! ```
//!
//! # Single Cycle
//!
//! ```no_run
//! use agent_status_client::{fetch_cycle, default_endpoints, HttpStatusSource, EXPLORER_ADDRESS_PREFIX};
//!
//! # async fn example() {
//! let source = HttpStatusSource::new(None).expect("http client");
//! let report = fetch_cycle(&source, &default_endpoints(), EXPLORER_ADDRESS_PREFIX).await;
//! println!("{} of {} agents answered", report.ready_count(), report.outcomes.len());
//! # }
//! ```

pub mod card;
pub mod endpoint;
pub mod fetcher;
pub mod poller;
pub mod protocol;

pub use card::{
    explorer_link, truncate_address, CardOutcome, DisplayCard, SkippedEndpoint,
    EXPLORER_ADDRESS_PREFIX, MAX_ADDRESS_CHARS,
};
pub use endpoint::{default_endpoints, Endpoint, DEFAULT_ENDPOINTS};
pub use fetcher::{fetch_cycle, CycleReport, HttpStatusSource, StatusSource};
pub use poller::{OverlapPolicy, Poller, PollerConfig, Snapshot, DEFAULT_POLL_INTERVAL};
pub use protocol::{round_label, AgentRound, FetchError, RemoteStatus, RoundPhase};
