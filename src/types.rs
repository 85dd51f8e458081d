//! # Common Types
//!
//! This module contains the common types used throughout the application for
//! representing contribution windows, upstream payloads, and commit-size
//! distribution results.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecapError;

/// One repository a user committed to within a contribution window.
///
/// Produced by the contribution-summary query and consumed by the ranker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContribution {
    /// Repository identifier in `owner/name` form
    pub full_name: String,
    /// Number of commit contributions the user made in the window
    pub commit_count: u64,
    /// Name of the repository's default branch, when the upstream reports one
    pub default_branch: Option<String>,
}

/// Result of the single contribution-summary call: the acting user's opaque
/// author id plus their per-repository commit totals for the window.
#[derive(Debug, Clone)]
pub struct ContributionSummary {
    /// Opaque upstream node id for the user, used to filter commit history by author
    pub author_id: String,
    /// Per-repository contribution totals, in upstream response order
    pub repositories: Vec<RepoContribution>,
}

/// Size information for a single commit.
///
/// Missing fields on the wire are coerced to zero rather than dropped.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CommitRecord {
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

impl CommitRecord {
    /// Total lines touched by the commit.
    pub fn size(&self) -> u64 {
        self.additions + self.deletions
    }
}

/// One page of a repository's commit history.
#[derive(Debug, Clone, Default)]
pub struct CommitPage {
    /// Commit records on this page, in history order
    pub records: Vec<CommitRecord>,
    /// Whether the upstream reports more pages after this one
    pub has_next_page: bool,
    /// Continuation token for the next page, absent on the last page
    pub next_cursor: Option<String>,
}

/// An inclusive `[since, until]` instant range filtering which commits count.
///
/// Bare dates (`YYYY-MM-DD`) are normalized to full-day boundaries:
/// `since` to `00:00:00Z` and `until` to `23:59:59Z` of that calendar day.
/// Full RFC 3339 timestamps are accepted verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl ContributionWindow {
    /// Parse a window from caller-supplied `since`/`until` strings.
    pub fn parse(since: &str, until: &str) -> Result<Self, RecapError> {
        let since = parse_instant(since, false)?;
        let until = parse_instant(until, true)?;
        if since > until {
            return Err(RecapError::InvalidRequest(format!(
                "window start {} is after window end {}",
                since, until
            )));
        }
        Ok(Self { since, until })
    }

    /// RFC 3339 rendering of the window start, as the upstream API expects.
    pub fn since_rfc3339(&self) -> String {
        self.since.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// RFC 3339 rendering of the window end.
    pub fn until_rfc3339(&self) -> String {
        self.until.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

fn parse_instant(value: &str, end_of_day: bool) -> Result<DateTime<Utc>, RecapError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        RecapError::InvalidRequest(format!(
            "expected YYYY-MM-DD or an RFC 3339 timestamp, got {value:?}"
        ))
    })?;
    let (h, m, s) = if end_of_day { (23, 59, 59) } else { (0, 0, 0) };
    let naive = date.and_hms_opt(h, m, s).unwrap();
    Ok(Utc.from_utc_datetime(&naive))
}

/// Summary statistics over a sorted sample of commit sizes.
///
/// All fields are zero when the sample is empty. Otherwise
/// `min <= median <= p75 <= p90 <= p95 <= max` holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistributionStats {
    /// Number of commits sampled
    pub count: u64,
    pub min: u64,
    pub max: u64,
    pub median: u64,
    pub p75: u64,
    pub p90: u64,
    pub p95: u64,
    /// Mean commit size, rounded to 2 decimal places
    pub average: f64,
}

/// The assembled result of one commit-size aggregation request.
#[derive(Debug, Clone, Serialize)]
pub struct CommitSizeReport {
    pub username: String,
    /// Window start as supplied by the caller
    pub since: String,
    /// Window end as supplied by the caller
    pub until: String,
    /// Number of top repositories requested
    pub top_repos: usize,
    /// Per-repository commit sample budget requested
    pub max_commits_per_repo: usize,
    pub stats: DistributionStats,
    /// Commits actually sampled per repository; repositories that yielded
    /// no observations are omitted
    pub per_repo_commit_counts: HashMap<String, usize>,
    /// Human-readable description of the distribution
    pub story: String,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_dates_normalize_to_day_boundaries() {
        let window = ContributionWindow::parse("2025-01-01", "2025-12-31").unwrap();
        assert_eq!(window.since_rfc3339(), "2025-01-01T00:00:00Z");
        assert_eq!(window.until_rfc3339(), "2025-12-31T23:59:59Z");
    }

    #[test]
    fn full_timestamps_pass_through() {
        let window =
            ContributionWindow::parse("2025-03-01T12:30:00Z", "2025-03-01T18:00:00+02:00").unwrap();
        assert_eq!(window.since_rfc3339(), "2025-03-01T12:30:00Z");
        assert_eq!(window.until_rfc3339(), "2025-03-01T16:00:00Z");
    }

    #[test]
    fn inverted_window_is_rejected() {
        let result = ContributionWindow::parse("2025-06-01", "2025-01-01");
        assert!(matches!(result, Err(RecapError::InvalidRequest(_))));
    }

    #[test]
    fn garbage_date_is_rejected() {
        let result = ContributionWindow::parse("last tuesday", "2025-01-01");
        assert!(matches!(result, Err(RecapError::InvalidRequest(_))));
    }

    #[test]
    fn missing_size_fields_deserialize_to_zero() {
        let record: CommitRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.size(), 0);

        let record: CommitRecord =
            serde_json::from_str(r#"{"additions": 3, "deletions": 2}"#).unwrap();
        assert_eq!(record.size(), 5);
    }
}
