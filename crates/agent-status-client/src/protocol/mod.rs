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

//! Wire format of the agent status endpoints.
//!
//! Each agent serves a JSON document shaped like
//! `{ "state": { "address": "0x..", "round": "CollectPositionsRound" } }`.
//! Only the two fields under `state` are read; anything else the agent
//! reports is ignored.

mod rounds;

pub use rounds::{AgentRound, RoundPhase};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while fetching or decoding one endpoint's status.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed status body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Decoded response body of one status endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteStatus {
    pub state: AgentState,
}

/// The `state` object reported by an agent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgentState {
    /// On-chain address the agent operates with.
    pub address: String,
    /// Current round of the agent's state machine. Provider-defined, usually a
    /// round name but occasionally a bare number.
    pub round: Value,
}

impl RemoteStatus {
    /// Decode a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, FetchError> {
        let status: Self = serde_json::from_slice(body)?;
        if status.state.round.is_null() {
            return Err(FetchError::MissingField("state.round"));
        }
        Ok(status)
    }

    /// Build a status directly, mostly useful for tests and fixtures.
    #[must_use]
    pub fn new(address: impl Into<String>, round: impl Into<Value>) -> Self {
        Self {
            state: AgentState {
                address: address.into(),
                round: round.into(),
            },
        }
    }

    /// The round rendered as display text.
    #[must_use]
    pub fn round_label(&self) -> String {
        round_label(&self.state.round)
    }
}

/// Render a round value as text: strings verbatim, everything else as
/// compact JSON.
#[must_use]
pub fn round_label(round: &Value) -> String {
    match round {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_body() {
        let body = br#"{"state":{"address":"0xAAAA","round":"3"}}"#;
        let status = RemoteStatus::from_slice(body).unwrap();
        assert_eq!(status.state.address, "0xAAAA");
        assert_eq!(status.round_label(), "3");
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let body = br#"{"agent":"a1","state":{"address":"0xBB","round":"ResetAndPauseRound","period":12},"uptime":5}"#;
        let status = RemoteStatus::from_slice(body).unwrap();
        assert_eq!(status.round_label(), "ResetAndPauseRound");
    }

    #[test]
    fn test_numeric_round_renders_as_json() {
        let body = br#"{"state":{"address":"0xBB","round":7}}"#;
        let status = RemoteStatus::from_slice(body).unwrap();
        assert_eq!(status.round_label(), "7");
    }

    #[test]
    fn test_missing_fields_are_errors() {
        assert!(matches!(
            RemoteStatus::from_slice(br#"{"state":{"round":"1"}}"#),
            Err(FetchError::Decode(_))
        ));
        assert!(matches!(
            RemoteStatus::from_slice(br#"{"state":{"address":"0x1"}}"#),
            Err(FetchError::Decode(_))
        ));
        assert!(matches!(
            RemoteStatus::from_slice(br#"{"status":"ok"}"#),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn test_null_round_is_missing() {
        let result = RemoteStatus::from_slice(br#"{"state":{"address":"0x1","round":null}}"#);
        assert!(matches!(result, Err(FetchError::MissingField("state.round"))));
    }

    #[test]
    fn test_non_json_body_is_error() {
        assert!(RemoteStatus::from_slice(b"<html>502 Bad Gateway</html>").is_err());
        assert!(RemoteStatus::from_slice(b"").is_err());
    }
}
