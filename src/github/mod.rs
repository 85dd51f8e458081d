//! GitHub collaborator: the upstream boundary the aggregation core talks to.
//!
//! The core only depends on the [`CommitSource`] trait; [`GitHubClient`] is
//! the production implementation backed by the GitHub GraphQL API. Tests
//! substitute scripted sources.

mod client;
mod graphql;
pub mod search;

pub use client::GitHubClient;

use async_trait::async_trait;

use crate::error::RecapError;
use crate::types::{CommitPage, ContributionSummary, ContributionWindow};

/// Upstream page size for commit history, the API's per-page maximum.
pub const COMMIT_PAGE_SIZE: usize = 100;

/// Read-only source of a user's contribution data.
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Resolve the user's opaque author id and their per-repository commit
    /// totals for the window, in one call.
    async fn fetch_contribution_summary(
        &self,
        login: &str,
        window: &ContributionWindow,
    ) -> Result<ContributionSummary, RecapError>;

    /// Fetch one page of a repository's default-branch commit history,
    /// restricted to the given author and window. `cursor` is absent for
    /// the first page.
    async fn fetch_commit_page(
        &self,
        owner: &str,
        name: &str,
        window: &ContributionWindow,
        author_id: &str,
        cursor: Option<&str>,
    ) -> Result<CommitPage, RecapError>;
}
