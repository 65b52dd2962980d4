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

//! Demonstration transaction data for the liquidation table.
//!
//! The table is static for the lifetime of the process: three groups, each
//! with three sample rows.

/// Lowest health factor drawn on the progress bar.
pub const HEALTH_FACTOR_MIN: f64 = -1.0;
/// Highest health factor drawn on the progress bar.
pub const HEALTH_FACTOR_MAX: f64 = 4.0;

/// One sample row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransactionRecord {
    pub id: u32,
    /// Transaction hash / address shown in the cell.
    pub address: &'static str,
    pub asset: Option<&'static str>,
    pub health_factor: Option<f64>,
}

impl TransactionRecord {
    /// Progress bar fill for the health factor, `(hf + 1) * 20` percent
    /// expressed as a fraction and clamped to `0.0..=1.0`.
    pub fn health_progress(&self) -> Option<f32> {
        self.health_factor.map(health_progress)
    }
}

/// A titled column of sample rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransactionGroup {
    pub id: u32,
    pub title: &'static str,
    pub records: &'static [TransactionRecord],
}

const SAMPLE_HASH: &str = "0x12345678913434134";

pub static TRANSACTION_GROUPS: [TransactionGroup; 3] = [
    TransactionGroup {
        id: 1,
        title: "Opening Position",
        records: &[
            TransactionRecord { id: 11, address: SAMPLE_HASH, asset: Some("ETH"), health_factor: Some(-1.0) },
            TransactionRecord { id: 12, address: SAMPLE_HASH, asset: Some("ETH"), health_factor: None },
            TransactionRecord { id: 13, address: SAMPLE_HASH, asset: None, health_factor: None },
        ],
    },
    TransactionGroup {
        id: 2,
        title: "Pending",
        records: &[
            TransactionRecord { id: 11, address: SAMPLE_HASH, asset: Some("ETH"), health_factor: Some(2.0) },
            TransactionRecord { id: 12, address: SAMPLE_HASH, asset: Some("ETH"), health_factor: None },
            TransactionRecord { id: 13, address: SAMPLE_HASH, asset: None, health_factor: None },
        ],
    },
    TransactionGroup {
        id: 3,
        title: "Done",
        records: &[
            TransactionRecord { id: 11, address: SAMPLE_HASH, asset: Some("ETH"), health_factor: Some(0.0) },
            TransactionRecord { id: 12, address: SAMPLE_HASH, asset: Some("ETH"), health_factor: None },
            TransactionRecord { id: 13, address: SAMPLE_HASH, asset: None, health_factor: None },
        ],
    },
];

/// Map a health factor onto the progress bar.
pub fn health_progress(health_factor: f64) -> f32 {
    let clamped = health_factor.clamp(HEALTH_FACTOR_MIN, HEALTH_FACTOR_MAX);
    ((clamped - HEALTH_FACTOR_MIN) / (HEALTH_FACTOR_MAX - HEALTH_FACTOR_MIN)) as f32
}

/// Number of rows needed to show every group side by side.
pub fn max_rows(groups: &[TransactionGroup]) -> usize {
    groups.iter().map(|g| g.records.len()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_are_fixed() {
        let titles: Vec<&str> = TRANSACTION_GROUPS.iter().map(|g| g.title).collect();
        assert_eq!(titles, vec!["Opening Position", "Pending", "Done"]);
        assert!(TRANSACTION_GROUPS.iter().all(|g| g.records.len() == 3));
        assert_eq!(max_rows(&TRANSACTION_GROUPS), 3);
        assert_eq!(max_rows(&[]), 0);
    }

    #[test]
    fn test_health_progress_is_twenty_percent_per_step() {
        assert!((health_progress(-1.0) - 0.0).abs() < f32::EPSILON);
        assert!((health_progress(0.0) - 0.2).abs() < 1e-6);
        assert!((health_progress(2.0) - 0.6).abs() < 1e-6);
        assert!((health_progress(4.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_health_progress_is_clamped() {
        assert!((health_progress(-5.0) - 0.0).abs() < f32::EPSILON);
        assert!((health_progress(12.0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rows_without_health_factor_have_no_bar() {
        let pending = &TRANSACTION_GROUPS[1];
        assert_eq!(pending.records[0].health_progress(), Some(health_progress(2.0)));
        assert_eq!(pending.records[1].health_progress(), None);
        assert_eq!(pending.records[2].asset, None);
    }
}
