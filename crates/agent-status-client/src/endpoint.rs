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

//! Endpoint table for the agent status providers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Agent status servers polled when no override is configured.
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "http://localhost:8000",
    "http://localhost:8001",
    "http://localhost:8002",
    "http://localhost:8003",
];

/// Network address of a single status provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(String);

impl Endpoint {
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Endpoint {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for Endpoint {
    fn from(address: String) -> Self {
        Self(address)
    }
}

/// The compiled-in endpoint table, in polling order.
#[must_use]
pub fn default_endpoints() -> Vec<Endpoint> {
    DEFAULT_ENDPOINTS.iter().copied().map(Endpoint::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_keeps_order() {
        let endpoints = default_endpoints();
        assert_eq!(endpoints.len(), DEFAULT_ENDPOINTS.len());
        assert_eq!(endpoints[0].as_str(), "http://localhost:8000");
        assert_eq!(endpoints[3].to_string(), "http://localhost:8003");
    }

    #[test]
    fn test_endpoint_serializes_as_plain_string() {
        let endpoint = Endpoint::new("http://agent.local:8000");
        let json = serde_json::to_string(&endpoint).unwrap();
        assert_eq!(json, "\"http://agent.local:8000\"");

        let back: Endpoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, endpoint);
    }
}
