//! Single-call REST lookups: issue/PR totals, commit counts, language mix
//! and repository counts for a user.
//!
//! These are passthroughs over the GitHub search and user endpoints; each
//! one issues a bounded number of calls and applies no retries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RecapError;

use super::GitHubClient;

#[derive(Debug, Deserialize)]
struct SearchTotals {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    incomplete_results: bool,
}

#[derive(Debug, Deserialize)]
struct RepoListing {
    owner: Option<RepoOwner>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepoOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct UserProfile {
    #[serde(default)]
    public_repos: u64,
}

/// Commit total for a user within a date range.
#[derive(Debug, Clone, Serialize)]
pub struct CommitCount {
    pub username: String,
    pub since: String,
    pub until: String,
    pub commit_count: u64,
    /// Whether the upstream search truncated its scan
    pub incomplete_results: bool,
}

/// Aggregated language bytes across a page of a user's repositories.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageBreakdown {
    pub username: String,
    pub page: u32,
    pub per_page: u32,
    pub total_bytes: u64,
    pub languages: HashMap<String, u64>,
    /// Share of total bytes per language, rounded to 2 decimal places
    pub percentages: HashMap<String, f64>,
}

fn authored_issue_query(username: &str, since: &str, until: &str) -> String {
    format!("author:{username} type:issue created:{since}..{until}")
}

fn authored_pr_query(username: &str, since: &str, until: &str) -> String {
    format!("author:{username} type:pr created:{since}..{until}")
}

fn reviewed_pr_query(username: &str, since: &str, until: &str) -> String {
    format!("reviewed-by:{username} type:pr reviewed:{since}..{until}")
}

fn merged_pr_query(username: &str, since: &str, until: &str) -> String {
    format!("author:{username} type:pr is:merged merged:{since}..{until}")
}

fn authored_commit_query(username: &str, since: &str, until: &str) -> String {
    format!("author:{username} author-date:{since}..{until}")
}

/// Share of total bytes per language, rounded to 2 decimal places.
/// Empty (and therefore zero-byte) totals yield no percentages.
fn percentage_shares(languages: &HashMap<String, u64>) -> HashMap<String, f64> {
    let total_bytes: u64 = languages.values().sum();
    let mut percentages = HashMap::new();
    if total_bytes > 0 {
        for (language, count) in languages {
            let share = (*count as f64 / total_bytes as f64) * 100.0;
            percentages.insert(language.clone(), (share * 100.0).round() / 100.0);
        }
    }
    percentages
}

impl GitHubClient {
    async fn search_issue_total(&self, query: String) -> Result<u64, RecapError> {
        debug!(%query, "issue search");
        let totals: SearchTotals = self
            .rest_get(
                "/search/issues",
                &[
                    ("q", query),
                    ("per_page", "1".to_string()),
                    ("page", "1".to_string()),
                ],
            )
            .await?;
        Ok(totals.total_count)
    }

    /// Total issues authored by a user within a date range.
    pub async fn issue_count(
        &self,
        username: &str,
        since: &str,
        until: &str,
    ) -> Result<u64, RecapError> {
        self.search_issue_total(authored_issue_query(username, since, until))
            .await
    }

    /// Total pull requests authored by a user within a date range.
    pub async fn pull_request_count(
        &self,
        username: &str,
        since: &str,
        until: &str,
    ) -> Result<u64, RecapError> {
        self.search_issue_total(authored_pr_query(username, since, until))
            .await
    }

    /// Total pull requests reviewed by a user within a date range.
    pub async fn reviewed_pull_request_count(
        &self,
        username: &str,
        since: &str,
        until: &str,
    ) -> Result<u64, RecapError> {
        self.search_issue_total(reviewed_pr_query(username, since, until))
            .await
    }

    /// Total merged pull requests authored by a user within a date range.
    pub async fn merged_pull_request_count(
        &self,
        username: &str,
        since: &str,
        until: &str,
    ) -> Result<u64, RecapError> {
        self.search_issue_total(merged_pr_query(username, since, until))
            .await
    }

    /// Total commits authored by a user within a date range.
    pub async fn commit_count(
        &self,
        username: &str,
        since: &str,
        until: &str,
    ) -> Result<CommitCount, RecapError> {
        let query = authored_commit_query(username, since, until);
        debug!(%query, "commit search");
        let totals: SearchTotals = self
            .rest_get(
                "/search/commits",
                &[
                    ("q", query),
                    ("per_page", "1".to_string()),
                    ("page", "1".to_string()),
                ],
            )
            .await?;
        Ok(CommitCount {
            username: username.to_string(),
            since: since.to_string(),
            until: until.to_string(),
            commit_count: totals.total_count,
            incomplete_results: totals.incomplete_results,
        })
    }

    /// Aggregate language byte totals and percentages across one page of a
    /// user's repositories. Issues one listing call plus one languages call
    /// per listed repository.
    pub async fn language_breakdown(
        &self,
        username: &str,
        per_page: u32,
        page: u32,
    ) -> Result<LanguageBreakdown, RecapError> {
        let repos: Vec<RepoListing> = self
            .rest_get(
                &format!("/users/{username}/repos"),
                &[
                    ("per_page", per_page.to_string()),
                    ("page", page.to_string()),
                    ("sort", "updated".to_string()),
                ],
            )
            .await?;

        let mut languages: HashMap<String, u64> = HashMap::new();
        for repo in repos {
            let (owner, name) = match (repo.owner, repo.name) {
                (Some(owner), Some(name)) => (owner.login, name),
                _ => continue,
            };
            let bytes: HashMap<String, u64> = self
                .rest_get(&format!("/repos/{owner}/{name}/languages"), &[])
                .await?;
            for (language, count) in bytes {
                *languages.entry(language).or_insert(0) += count;
            }
        }

        let total_bytes: u64 = languages.values().sum();
        let percentages = percentage_shares(&languages);

        Ok(LanguageBreakdown {
            username: username.to_string(),
            page,
            per_page,
            total_bytes,
            languages,
            percentages,
        })
    }

    /// Public repository count for a user.
    pub async fn repo_count(&self, username: &str) -> Result<u64, RecapError> {
        let profile: UserProfile = self.rest_get(&format!("/users/{username}"), &[]).await?;
        Ok(profile.public_repos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn search_queries_use_the_upstream_qualifiers() {
        assert_eq!(
            authored_issue_query("octocat", "2025-01-01", "2025-12-31"),
            "author:octocat type:issue created:2025-01-01..2025-12-31"
        );
        assert_eq!(
            authored_pr_query("octocat", "2025-01-01", "2025-12-31"),
            "author:octocat type:pr created:2025-01-01..2025-12-31"
        );
        assert_eq!(
            reviewed_pr_query("octocat", "2025-01-01", "2025-12-31"),
            "reviewed-by:octocat type:pr reviewed:2025-01-01..2025-12-31"
        );
        assert_eq!(
            merged_pr_query("octocat", "2025-01-01", "2025-12-31"),
            "author:octocat type:pr is:merged merged:2025-01-01..2025-12-31"
        );
        assert_eq!(
            authored_commit_query("octocat", "2025-01-01", "2025-12-31"),
            "author:octocat author-date:2025-01-01..2025-12-31"
        );
    }

    #[test]
    fn percentages_are_rounded_to_two_decimals() {
        let languages = HashMap::from([("Rust".to_string(), 2), ("Go".to_string(), 1)]);
        let percentages = percentage_shares(&languages);
        assert_eq!(percentages["Rust"], 66.67);
        assert_eq!(percentages["Go"], 33.33);
    }

    #[test]
    fn single_language_takes_the_full_share() {
        let languages = HashMap::from([("Rust".to_string(), 12345)]);
        let percentages = percentage_shares(&languages);
        assert_eq!(percentages["Rust"], 100.0);
    }

    #[test]
    fn zero_bytes_yield_no_percentages() {
        assert!(percentage_shares(&HashMap::new()).is_empty());
        let all_zero = HashMap::from([("Rust".to_string(), 0)]);
        assert!(percentage_shares(&all_zero).is_empty());
    }

    #[test]
    fn search_totals_default_missing_fields() {
        let totals: SearchTotals = serde_json::from_str("{}").unwrap();
        assert_eq!(totals.total_count, 0);
        assert!(!totals.incomplete_results);

        let totals: SearchTotals =
            serde_json::from_str(r#"{"total_count": 42, "incomplete_results": true}"#).unwrap();
        assert_eq!(totals.total_count, 42);
        assert!(totals.incomplete_results);
    }
}
