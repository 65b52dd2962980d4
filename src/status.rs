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

//! Per-endpoint health and diagnostics derived from published snapshots.

use std::collections::VecDeque;

use agent_status_client::{CardOutcome, Endpoint, Snapshot};
use chrono::{DateTime, Utc};

const MAX_DIAGNOSTICS: usize = 50;

/// Last known outcome for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointHealth {
    /// No cycle has completed yet.
    Unknown,
    Answering,
    Skipped,
}

/// Diagnostic message with timestamp
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub timestamp: DateTime<Utc>,
    pub level: DiagnosticLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

/// Health and counters for one endpoint
#[derive(Debug, Clone)]
pub struct EndpointStatus {
    /// 1-based position in the endpoint table
    pub ordinal: usize,

    pub endpoint: Endpoint,

    pub health: EndpointHealth,

    /// Reason of the last skipped cycle (cleared when the endpoint answers)
    pub last_error: Option<String>,

    pub success_count: u64,

    pub failure_count: u64,

    pub last_success_at: Option<DateTime<Utc>>,
}

impl EndpointStatus {
    fn new(ordinal: usize, endpoint: Endpoint) -> Self {
        Self {
            ordinal,
            endpoint,
            health: EndpointHealth::Unknown,
            last_error: None,
            success_count: 0,
            failure_count: 0,
            last_success_at: None,
        }
    }
}

/// Dashboard status tracking all endpoints and diagnostics
#[derive(Debug)]
pub struct SystemStatus {
    pub endpoints: Vec<EndpointStatus>,

    /// Sequence of the last snapshot folded in
    pub last_sequence: u64,
    pub last_cycle_at: Option<DateTime<Utc>>,
    pub cycles_observed: u64,

    // Diagnostic messages (keep last 50)
    pub diagnostics: VecDeque<DiagnosticMessage>,

    // Performance metrics
    pub last_cycle_duration_ms: f64,
    pub average_cycle_duration_ms: f64,
}

impl SystemStatus {
    pub fn new(endpoints: &[Endpoint]) -> Self {
        Self {
            endpoints: endpoints
                .iter()
                .enumerate()
                .map(|(index, endpoint)| EndpointStatus::new(index + 1, endpoint.clone()))
                .collect(),
            last_sequence: 0,
            last_cycle_at: None,
            cycles_observed: 0,
            diagnostics: VecDeque::with_capacity(MAX_DIAGNOSTICS),
            last_cycle_duration_ms: 0.0,
            average_cycle_duration_ms: 0.0,
        }
    }

    /// Fold a published snapshot into the status.
    ///
    /// Snapshots that are not newer than the last one seen are ignored, so
    /// re-reading the same snapshot every frame is harmless. Returns whether
    /// the snapshot was applied.
    pub fn record_snapshot(&mut self, snapshot: &Snapshot) -> bool {
        if !snapshot.is_newer_than(self.last_sequence) {
            return false;
        }

        let answering_before = self.answering_count();
        let mut messages = Vec::new();
        for outcome in &snapshot.outcomes {
            let Some(status) = outcome
                .ordinal()
                .checked_sub(1)
                .and_then(|index| self.endpoints.get_mut(index))
            else {
                continue;
            };

            match outcome {
                CardOutcome::Ready(_) => {
                    if status.health == EndpointHealth::Skipped {
                        messages.push((
                            DiagnosticLevel::Info,
                            format!("[Agent {}] {} is answering again", status.ordinal, status.endpoint),
                        ));
                    }
                    status.health = EndpointHealth::Answering;
                    status.last_error = None;
                    status.success_count += 1;
                    status.last_success_at = snapshot.completed_at;
                }
                CardOutcome::Skipped(skipped) => {
                    // Only report transitions, not every failing cycle.
                    if status.health != EndpointHealth::Skipped {
                        messages.push((
                            DiagnosticLevel::Warning,
                            format!("[Agent {}] {} skipped: {}", status.ordinal, status.endpoint, skipped.reason),
                        ));
                    }
                    status.health = EndpointHealth::Skipped;
                    status.last_error = Some(skipped.reason.clone());
                    status.failure_count += 1;
                }
            }
        }

        for (level, message) in messages {
            self.add_diagnostic(level, message);
        }

        if answering_before > 0 && !snapshot.outcomes.is_empty() && self.answering_count() == 0 {
            self.add_diagnostic(
                DiagnosticLevel::Error,
                format!("No agents answered cycle #{}", snapshot.sequence),
            );
        }

        if snapshot.sequence > self.last_sequence + 1 && self.last_sequence > 0 {
            self.add_diagnostic(
                DiagnosticLevel::Info,
                format!(
                    "Missed {} cycles between #{} and #{}",
                    snapshot.sequence - self.last_sequence - 1,
                    self.last_sequence,
                    snapshot.sequence
                ),
            );
        }

        self.last_sequence = snapshot.sequence;
        self.last_cycle_at = snapshot.completed_at;
        self.cycles_observed += 1;

        if let Some(duration) = snapshot.duration() {
            #[allow(clippy::cast_precision_loss, reason = "cycle durations are far below 2^52 microseconds")]
            let millis = duration.num_microseconds().unwrap_or(i64::MAX) as f64 / 1000.0;
            self.update_performance(millis);
        }

        true
    }

    /// Add a diagnostic message
    pub fn add_diagnostic(&mut self, level: DiagnosticLevel, message: String) {
        self.diagnostics.push_back(DiagnosticMessage {
            timestamp: Utc::now(),
            level,
            message,
        });

        while self.diagnostics.len() > MAX_DIAGNOSTICS {
            self.diagnostics.pop_front();
        }
    }

    /// Update performance metrics
    fn update_performance(&mut self, duration_ms: f64) {
        self.last_cycle_duration_ms = duration_ms;

        // Simple moving average
        const ALPHA: f64 = 0.1;
        if self.average_cycle_duration_ms == 0.0 {
            self.average_cycle_duration_ms = duration_ms;
        } else {
            self.average_cycle_duration_ms =
                ALPHA * duration_ms + (1.0 - ALPHA) * self.average_cycle_duration_ms;
        }
    }

    /// Number of endpoints that answered in the last cycle
    pub fn answering_count(&self) -> usize {
        self.endpoints
            .iter()
            .filter(|s| s.health == EndpointHealth::Answering)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_status_client::{DisplayCard, RemoteStatus, SkippedEndpoint, EXPLORER_ADDRESS_PREFIX};
    use chrono::Duration;

    fn table() -> Vec<Endpoint> {
        vec![Endpoint::new("http://e1"), Endpoint::new("http://e2")]
    }

    fn ready(index: usize) -> CardOutcome {
        CardOutcome::Ready(DisplayCard::from_status(
            index,
            &RemoteStatus::new("0xAAAA", "3"),
            EXPLORER_ADDRESS_PREFIX,
        ))
    }

    fn skipped(index: usize, endpoint: &str) -> CardOutcome {
        CardOutcome::Skipped(SkippedEndpoint {
            ordinal: index + 1,
            endpoint: Endpoint::new(endpoint),
            reason: "connection refused".to_string(),
        })
    }

    fn snapshot(sequence: u64, outcomes: Vec<CardOutcome>) -> Snapshot {
        let started = Utc::now();
        Snapshot {
            sequence,
            started_at: Some(started),
            completed_at: Some(started + Duration::milliseconds(40)),
            outcomes,
        }
    }

    #[test]
    fn test_record_snapshot_updates_counters() {
        let mut status = SystemStatus::new(&table());
        assert!(status.record_snapshot(&snapshot(1, vec![ready(0), skipped(1, "http://e2")])));

        assert_eq!(status.endpoints[0].health, EndpointHealth::Answering);
        assert_eq!(status.endpoints[0].success_count, 1);
        assert_eq!(status.endpoints[1].health, EndpointHealth::Skipped);
        assert_eq!(status.endpoints[1].last_error.as_deref(), Some("connection refused"));
        assert_eq!(status.answering_count(), 1);
        assert!((status.last_cycle_duration_ms - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_stale_snapshots_are_ignored() {
        let mut status = SystemStatus::new(&table());
        assert!(status.record_snapshot(&snapshot(2, vec![ready(0), ready(1)])));
        assert!(!status.record_snapshot(&snapshot(2, vec![ready(0), ready(1)])));
        assert!(!status.record_snapshot(&snapshot(1, vec![skipped(0, "http://e1"), ready(1)])));
        assert!(!status.record_snapshot(&Snapshot::default()));

        assert_eq!(status.endpoints[0].success_count, 1);
        assert_eq!(status.endpoints[0].failure_count, 0);
        assert_eq!(status.cycles_observed, 1);
    }

    #[test]
    fn test_diagnostics_only_on_transitions() {
        let mut status = SystemStatus::new(&table());
        for sequence in 1..=5 {
            status.record_snapshot(&snapshot(sequence, vec![ready(0), skipped(1, "http://e2")]));
        }
        let warnings = status
            .diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .count();
        assert_eq!(warnings, 1);
        assert_eq!(status.endpoints[1].failure_count, 5);

        status.record_snapshot(&snapshot(6, vec![ready(0), ready(1)]));
        let last = status.diagnostics.back().unwrap();
        assert_eq!(last.level, DiagnosticLevel::Info);
        assert!(last.message.contains("answering again"));
        assert!(status.endpoints[1].last_error.is_none());
    }

    #[test]
    fn test_total_outage_is_an_error() {
        let mut status = SystemStatus::new(&table());
        status.record_snapshot(&snapshot(1, vec![ready(0), ready(1)]));
        status.record_snapshot(&snapshot(2, vec![skipped(0, "http://e1"), skipped(1, "http://e2")]));

        let last = status.diagnostics.back().unwrap();
        assert_eq!(last.level, DiagnosticLevel::Error);
        assert_eq!(last.message, "No agents answered cycle #2");
        assert_eq!(status.answering_count(), 0);
    }

    #[test]
    fn test_missed_cycles_are_reported() {
        let mut status = SystemStatus::new(&table());
        status.record_snapshot(&snapshot(1, vec![ready(0), ready(1)]));
        status.record_snapshot(&snapshot(4, vec![ready(0), ready(1)]));
        assert!(status
            .diagnostics
            .iter()
            .any(|d| d.message == "Missed 2 cycles between #1 and #4"));
    }

    #[test]
    fn test_diagnostics_are_bounded() {
        let mut status = SystemStatus::new(&[]);
        for i in 0..(MAX_DIAGNOSTICS + 10) {
            status.add_diagnostic(DiagnosticLevel::Info, format!("message {i}"));
        }
        assert_eq!(status.diagnostics.len(), MAX_DIAGNOSTICS);
        assert_eq!(status.diagnostics.front().unwrap().message, "message 10");
    }
}
