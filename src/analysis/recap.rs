//! Orchestration of one commit-size aggregation request.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::info;

use crate::error::RecapError;
use crate::github::CommitSource;
use crate::types::{CommitSizeReport, ContributionWindow};

use super::narrative::describe_distribution;
use super::ranking::{rank_repositories, split_full_name};
use super::stats::AggregationState;
use super::walker::walk_repository;

/// Repositories walked concurrently at most; keeps the upstream call rate
/// polite while the per-repo traversals stay independent.
const MAX_PARALLEL_WALKS: usize = 4;

const SOURCE_TAG: &str = "graphql";

/// Parameters of one aggregation request.
#[derive(Debug, Clone)]
pub struct RecapRequest {
    pub username: String,
    /// Window start, `YYYY-MM-DD` or RFC 3339
    pub since: String,
    /// Window end, `YYYY-MM-DD` or RFC 3339
    pub until: String,
    /// How many of the user's most active repositories to sample
    pub top_repos: usize,
    /// Commit sample budget per repository
    pub max_commits_per_repo: usize,
}

/// Aggregate commit sizes across a user's most active repositories.
///
/// One contribution-summary call resolves the user's author id and
/// per-repository totals; the top repositories are then walked (bounded
/// parallelism, each within its budget), the collected sizes are
/// summarized, and a narrative is attached. Any upstream failure aborts
/// the whole request — there are no retries and no partial results.
pub async fn aggregate_commit_sizes<S>(
    source: Arc<S>,
    request: RecapRequest,
) -> Result<CommitSizeReport, RecapError>
where
    S: CommitSource + ?Sized + 'static,
{
    if request.top_repos < 1 {
        return Err(RecapError::InvalidRequest(
            "top_repos must be at least 1".to_string(),
        ));
    }
    if request.max_commits_per_repo < 1 {
        return Err(RecapError::InvalidRequest(
            "max_commits_per_repo must be at least 1".to_string(),
        ));
    }

    let window = ContributionWindow::parse(&request.since, &request.until)?;
    let summary = source
        .fetch_contribution_summary(&request.username, &window)
        .await?;
    let ranked = rank_repositories(summary.repositories, request.top_repos);
    info!(
        username = %request.username,
        ranked = ranked.len(),
        "walking ranked repositories"
    );

    let semaphore = Arc::new(Semaphore::new(MAX_PARALLEL_WALKS));
    let mut walks = Vec::with_capacity(ranked.len());
    for repo in &ranked {
        // Already filtered by the ranker; an unsplittable name is skipped,
        // not treated as an error.
        let Some((owner, name)) = split_full_name(&repo.full_name) else {
            continue;
        };
        let owner = owner.to_string();
        let name = name.to_string();
        let source = Arc::clone(&source);
        let author_id = summary.author_id.clone();
        let budget = request.max_commits_per_repo;
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| RecapError::Task(e.to_string()))?;

        let handle = tokio::spawn(async move {
            let _permit = permit;
            walk_repository(&*source, &owner, &name, &window, &author_id, budget).await
        });
        walks.push((repo.full_name.clone(), handle));
    }

    let mut state = AggregationState::new();
    let mut failure = None;
    for (full_name, handle) in walks {
        // After a failure the remaining walks are aborted rather than
        // awaited, so no further upstream pages are fetched.
        if failure.is_some() {
            handle.abort();
            continue;
        }
        match handle
            .await
            .map_err(|e| RecapError::Task(e.to_string()))
            .and_then(|walked| walked)
        {
            Ok(sizes) => state.absorb(&full_name, sizes),
            Err(err) => failure = Some(err),
        }
    }
    if let Some(err) = failure {
        return Err(err);
    }

    let (stats, per_repo_commit_counts) = state.finish();
    let story = describe_distribution(&stats);

    Ok(CommitSizeReport {
        username: request.username,
        since: request.since,
        until: request.until,
        top_repos: request.top_repos,
        max_commits_per_repo: request.max_commits_per_repo,
        stats,
        per_repo_commit_counts,
        story,
        source: SOURCE_TAG.to_string(),
    })
}
