//! Environment-driven configuration for the GitHub collaborator.

use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the GitHub API client.
#[derive(Debug, Clone)]
pub struct RecapConfig {
    /// Bearer token for authenticated requests; unauthenticated when absent
    pub token: Option<String>,
    /// Base URL for REST endpoints
    pub base_url: String,
    /// URL of the GraphQL endpoint
    pub graphql_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl RecapConfig {
    /// Load configuration from the environment.
    ///
    /// Reads `GITHUB_TOKEN`, `GITHUB_BASE_URL`, `GITHUB_GRAPHQL_URL` and
    /// `GITHUB_TIMEOUT_SECS`, falling back to the public API defaults.
    pub fn from_env() -> Self {
        let token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        let base_url =
            env::var("GITHUB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let graphql_url =
            env::var("GITHUB_GRAPHQL_URL").unwrap_or_else(|_| DEFAULT_GRAPHQL_URL.to_string());
        let timeout_secs = env::var("GITHUB_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            token,
            base_url,
            graphql_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for RecapConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
