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

//! Round names reported by the liquidation agents.

use serde_json::Value;

/// Coarse phase of an agent's cycle, used to colour status badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Agent is registering with its peers.
    Registering,
    /// Collecting positions, computing health or preparing transactions.
    Working,
    /// Submitting liquidation transactions on-chain.
    Submitting,
    /// Between cycles.
    Idle,
    /// Round name not recognised.
    Unknown,
}

/// A round of the liquidation agent state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentRound {
    Registration,
    CollectPositions,
    CalculatePositionHealth,
    PrepareLiquidationTransactions,
    SubmitPositionLiquidationTransactions,
    ResetAndPause,
    Other(String),
}

impl AgentRound {
    /// Classify a raw round value. Accepts the bare round name with or
    /// without the `Round` suffix, and in snake case.
    #[must_use]
    pub fn from_value(round: &Value) -> Self {
        match round {
            Value::String(name) => Self::from_name(name),
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let normalized = normalized.strip_suffix("round").unwrap_or(&normalized);

        match normalized {
            "registration" => Self::Registration,
            "collectpositions" => Self::CollectPositions,
            "calculatepositionhealth" => Self::CalculatePositionHealth,
            "prepareliquidationtransactions" => Self::PrepareLiquidationTransactions,
            "submitpositionliquidationtransactions" => Self::SubmitPositionLiquidationTransactions,
            "resetandpause" => Self::ResetAndPause,
            _ => Self::Other(name.to_string()),
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Registration => "Registration",
            Self::CollectPositions => "Collecting positions",
            Self::CalculatePositionHealth => "Calculating health",
            Self::PrepareLiquidationTransactions => "Preparing liquidations",
            Self::SubmitPositionLiquidationTransactions => "Submitting liquidations",
            Self::ResetAndPause => "Paused",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        match self {
            Self::Registration => RoundPhase::Registering,
            Self::CollectPositions
            | Self::CalculatePositionHealth
            | Self::PrepareLiquidationTransactions => RoundPhase::Working,
            Self::SubmitPositionLiquidationTransactions => RoundPhase::Submitting,
            Self::ResetAndPause => RoundPhase::Idle,
            Self::Other(_) => RoundPhase::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_name_variants() {
        assert_eq!(AgentRound::from_name("CollectPositionsRound"), AgentRound::CollectPositions);
        assert_eq!(AgentRound::from_name("collect_positions_round"), AgentRound::CollectPositions);
        assert_eq!(AgentRound::from_name("ResetAndPause"), AgentRound::ResetAndPause);
        assert_eq!(
            AgentRound::from_name("SubmitPositionLiquidationTransactionsRound").phase(),
            RoundPhase::Submitting
        );
    }

    #[test]
    fn test_unknown_round_keeps_raw_text() {
        let round = AgentRound::from_value(&Value::from(3));
        assert_eq!(round, AgentRound::Other("3".to_string()));
        assert_eq!(round.label(), "3");
        assert_eq!(round.phase(), RoundPhase::Unknown);
    }
}
