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

//! Mapping of remote agent status into dashboard cards.

use serde::Serialize;

use crate::endpoint::Endpoint;
use crate::protocol::RemoteStatus;

/// Block explorer address page prefix used for card links.
pub const EXPLORER_ADDRESS_PREFIX: &str = "https://polygonscan.com/address/";

/// Longest address shown untouched on a card, in characters.
pub const MAX_ADDRESS_CHARS: usize = 20;

const ELLIPSIS: char = '…';

/// UI-facing summary of one endpoint's latest status.
///
/// Built fresh every polling cycle. `id` is the endpoint's 1-based position
/// in the table, so it identifies the same endpoint across cycles even when
/// earlier endpoints are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayCard {
    pub id: usize,
    pub name: String,
    /// Address truncated to [`MAX_ADDRESS_CHARS`].
    pub address: String,
    /// Raw round passthrough.
    pub status: String,
    /// Explorer link built from the untruncated address.
    pub link: String,
}

impl DisplayCard {
    /// Build the card for the endpoint at `index` (0-based) in the table.
    #[must_use]
    pub fn from_status(index: usize, status: &RemoteStatus, explorer_prefix: &str) -> Self {
        let ordinal = index + 1;
        Self {
            id: ordinal,
            name: format!("Agent {ordinal}"),
            address: truncate_address(&status.state.address),
            status: status.round_label(),
            link: explorer_link(explorer_prefix, &status.state.address),
        }
    }
}

/// An endpoint that produced no card in a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEndpoint {
    /// 1-based position of the endpoint in the table.
    pub ordinal: usize,
    pub endpoint: Endpoint,
    pub reason: String,
}

/// Result of polling one endpoint within a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    Ready(DisplayCard),
    Skipped(SkippedEndpoint),
}

impl CardOutcome {
    #[must_use]
    pub fn card(&self) -> Option<&DisplayCard> {
        match self {
            Self::Ready(card) => Some(card),
            Self::Skipped(_) => None,
        }
    }

    #[must_use]
    pub fn skipped(&self) -> Option<&SkippedEndpoint> {
        match self {
            Self::Ready(_) => None,
            Self::Skipped(skipped) => Some(skipped),
        }
    }

    #[must_use]
    pub fn ordinal(&self) -> usize {
        match self {
            Self::Ready(card) => card.id,
            Self::Skipped(skipped) => skipped.ordinal,
        }
    }
}

/// Shorten an address for display.
///
/// Addresses of at most [`MAX_ADDRESS_CHARS`] characters pass through;
/// longer ones keep their first 19 characters followed by an ellipsis.
#[must_use]
pub fn truncate_address(address: &str) -> String {
    if address.chars().count() <= MAX_ADDRESS_CHARS {
        return address.to_string();
    }

    let mut truncated: String = address.chars().take(MAX_ADDRESS_CHARS - 1).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// Explorer URL for an address.
#[must_use]
pub fn explorer_link(prefix: &str, address: &str) -> String {
    format!("{prefix}{address}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_ADDRESS: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn test_short_addresses_pass_through() {
        assert_eq!(truncate_address(""), "");
        assert_eq!(truncate_address("0xAAAA"), "0xAAAA");
        let exactly_twenty = "0x123456789012345678";
        assert_eq!(exactly_twenty.len(), 20);
        assert_eq!(truncate_address(exactly_twenty), exactly_twenty);
    }

    #[test]
    fn test_long_addresses_are_cut_to_nineteen_plus_ellipsis() {
        let truncated = truncate_address(FULL_ADDRESS);
        assert_eq!(truncated, "0x5aAeb6053F3E94C9b…");
        assert_eq!(truncated.chars().count(), MAX_ADDRESS_CHARS);

        let twenty_one = "0x1234567890123456789";
        assert_eq!(truncate_address(twenty_one), "0x12345678901234567…");
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let address = "ßßßßßßßßßßßßßßßßßßßß";
        assert_eq!(address.chars().count(), 20);
        assert_eq!(truncate_address(address), address);
    }

    #[test]
    fn test_card_from_status() {
        let status = RemoteStatus::new(FULL_ADDRESS, "CollectPositionsRound");
        let card = DisplayCard::from_status(1, &status, EXPLORER_ADDRESS_PREFIX);

        assert_eq!(card.id, 2);
        assert_eq!(card.name, "Agent 2");
        assert_eq!(card.address, truncate_address(FULL_ADDRESS));
        assert_eq!(card.status, "CollectPositionsRound");
        assert_eq!(
            card.link,
            "https://polygonscan.com/address/0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
    }

    #[test]
    fn test_outcome_accessors() {
        let ready = CardOutcome::Ready(DisplayCard::from_status(
            0,
            &RemoteStatus::new("0x1", "3"),
            EXPLORER_ADDRESS_PREFIX,
        ));
        let skipped = CardOutcome::Skipped(SkippedEndpoint {
            ordinal: 2,
            endpoint: Endpoint::new("http://localhost:8001"),
            reason: "connection refused".to_string(),
        });

        assert_eq!(ready.ordinal(), 1);
        assert!(ready.card().is_some());
        assert!(ready.skipped().is_none());
        assert_eq!(skipped.ordinal(), 2);
        assert!(skipped.card().is_none());
    }
}
