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

//! Application configuration management.
//!
//! Configuration is stored as TOML through `confy`. Every field has a serde
//! default, so older or hand-edited files load with the missing values
//! filled in.

use std::time::Duration;

use agent_status_client::{
    Endpoint, OverlapPolicy, PollerConfig, DEFAULT_ENDPOINTS, EXPLORER_ADDRESS_PREFIX,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::wallet::ChainId;

const APP_NAME: &str = "liquidation-station";
const CONFIG_NAME: &str = "config";

/// Environment variable that overrides the configured wallet provider URL.
pub const PROVIDER_URL_ENV: &str = "LIQUIDATION_STATION_PROVIDER_URL";

/// A navigation bar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub link: String,
}

impl NavLink {
    pub fn new(label: &str, link: &str) -> Self {
        Self {
            label: label.to_string(),
            link: link.to_string(),
        }
    }
}

/// Application configuration stored in TOML format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration schema version for migrations
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// Agent status endpoints, polled in this order
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,

    /// Time between polling cycles in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// What to do when a polling cycle outlasts the interval
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,

    /// Per-request timeout in milliseconds (none waits indefinitely)
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,

    /// Block explorer prefix for agent address links
    #[serde(default = "default_explorer_url_prefix")]
    pub explorer_url_prefix: String,

    /// Chain the wallet widget targets
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Wallet provider URL (optional, env var takes precedence)
    #[serde(default)]
    pub wallet_provider_url: Option<String>,

    /// Navigation bar links; the first one is active on startup
    #[serde(default = "default_nav_links")]
    pub nav_links: Vec<NavLink>,

    /// Show the status pane on startup
    #[serde(default = "default_true")]
    pub show_status_pane: bool,
}

fn default_config_version() -> u32 {
    1
}

fn default_endpoints() -> Vec<String> {
    DEFAULT_ENDPOINTS.iter().map(ToString::to_string).collect()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_explorer_url_prefix() -> String {
    EXPLORER_ADDRESS_PREFIX.to_string()
}

fn default_chain_id() -> u64 {
    ChainId::POLYGON.0
}

fn default_nav_links() -> Vec<NavLink> {
    vec![NavLink::new("Home", "/")]
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            endpoints: default_endpoints(),
            poll_interval_ms: default_poll_interval_ms(),
            overlap_policy: OverlapPolicy::default(),
            request_timeout_ms: None,
            explorer_url_prefix: default_explorer_url_prefix(),
            chain_id: default_chain_id(),
            wallet_provider_url: None,
            nav_links: default_nav_links(),
            show_status_pane: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    /// Load configuration, falling back to defaults when the file is unreadable
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => {
                info!("Loaded configuration with {} endpoints", config.endpoints.len());
                config
            }
            Err(e) => {
                warn!("Failed to load configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<std::path::PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    /// Endpoint table in polling order
    pub fn endpoint_table(&self) -> Vec<Endpoint> {
        self.endpoints.iter().map(|e| Endpoint::new(e.trim())).collect()
    }

    pub fn poll_interval(&self) -> Duration {
        // A zero period would make tokio's interval panic.
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            interval: self.poll_interval(),
            overlap: self.overlap_policy,
            explorer_prefix: self.explorer_url_prefix.clone(),
        }
    }

    pub fn chain(&self) -> ChainId {
        ChainId(self.chain_id)
    }

    /// Resolve the wallet provider URL from environment variable or config
    pub fn resolve_provider_url(&self) -> Option<String> {
        resolve_provider_url(std::env::var(PROVIDER_URL_ENV).ok(), self.wallet_provider_url.as_deref())
    }

    /// Nav links, never empty
    pub fn nav_links(&self) -> Vec<NavLink> {
        if self.nav_links.is_empty() {
            default_nav_links()
        } else {
            self.nav_links.clone()
        }
    }
}

fn resolve_provider_url(env_value: Option<String>, config_value: Option<&str>) -> Option<String> {
    if let Some(url) = env_value.filter(|u| !u.is_empty()) {
        return Some(url);
    }
    config_value.map(ToString::to_string).filter(|u| !u.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dashboard_behavior() {
        let config = AppConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(1000));
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.chain(), ChainId::POLYGON);
        assert_eq!(config.explorer_url_prefix, "https://polygonscan.com/address/");
        assert_eq!(config.endpoint_table().len(), DEFAULT_ENDPOINTS.len());
        assert_eq!(config.nav_links(), vec![NavLink::new("Home", "/")]);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml_from_str(
            r#"
            endpoints = ["http://agent-a:8000", " http://agent-b:8000 "]
            poll_interval_ms = 2500
            overlap_policy = "Queue"
            "#,
        );

        assert_eq!(config.poll_interval(), Duration::from_millis(2500));
        assert_eq!(config.overlap_policy, OverlapPolicy::Queue);
        assert_eq!(config.chain_id, 137);
        assert!(config.show_status_pane);

        let table = config.endpoint_table();
        assert_eq!(table[1].as_str(), "http://agent-b:8000");

        let poller = config.poller_config();
        assert_eq!(poller.overlap, OverlapPolicy::Queue);
        assert_eq!(poller.explorer_prefix, EXPLORER_ADDRESS_PREFIX);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = AppConfig {
            poll_interval_ms: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_empty_nav_links_fall_back() {
        let config = AppConfig {
            nav_links: Vec::new(),
            ..AppConfig::default()
        };
        assert_eq!(config.nav_links().len(), 1);
    }

    #[test]
    fn test_provider_url_precedence() {
        assert_eq!(
            resolve_provider_url(Some("https://env".to_string()), Some("https://config")),
            Some("https://env".to_string())
        );
        assert_eq!(
            resolve_provider_url(Some(String::new()), Some("https://config")),
            Some("https://config".to_string())
        );
        assert_eq!(resolve_provider_url(None, Some("")), None);
        assert_eq!(resolve_provider_url(None, None), None);
    }

    fn toml_from_str(s: &str) -> AppConfig {
        toml::from_str(s).expect("valid config toml")
    }
}
