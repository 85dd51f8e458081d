//! # CommitRecap
//!
//! `commitrecap` aggregates a GitHub user's commit-size distribution across
//! their most active repositories within a contribution window. It ranks the
//! repositories a user committed to, pages through each repository's
//! default-branch history under a per-repository budget, folds the commit
//! sizes into percentile statistics, and renders a short narrative of the
//! result.
//!
//! ## Features
//!
//! - Rank a user's repositories by commit volume in a window
//! - Budgeted, cursor-following commit history traversal
//! - Percentile statistics (median/p75/p90/p95) over sampled commit sizes
//! - Narrative summary driven by a declarative tone table
//! - REST lookups for issue/PR totals, language mix, and repo counts
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use commitrecap::{aggregate_commit_sizes, GitHubClient, RecapConfig, RecapRequest};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = Arc::new(GitHubClient::new(RecapConfig::from_env())?);
//! let report = aggregate_commit_sizes(
//!     client,
//!     RecapRequest {
//!         username: "octocat".to_string(),
//!         since: "2025-01-01".to_string(),
//!         until: "2025-12-31".to_string(),
//!         top_repos: 5,
//!         max_commits_per_repo: 200,
//!     },
//! )
//! .await?;
//! println!("{}", report.story);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod github;
pub mod types;

// Re-export main types for convenience
pub use analysis::{aggregate_commit_sizes, RecapRequest};
pub use config::RecapConfig;
pub use error::RecapError;
pub use github::{CommitSource, GitHubClient};
pub use types::{CommitSizeReport, ContributionWindow, DistributionStats};
