//! Selecting and ordering a user's most active repositories for a window.

use crate::types::RepoContribution;

/// Split an `owner/name` identifier, rejecting entries where either half is
/// empty.
pub fn split_full_name(full_name: &str) -> Option<(&str, &str)> {
    let (owner, name) = full_name.split_once('/')?;
    if owner.is_empty() || name.is_empty() {
        return None;
    }
    Some((owner, name))
}

/// Rank contributions by commit count descending and keep the top
/// `top_repos` entries.
///
/// Entries without a resolvable `owner/name` identifier are dropped first.
/// The sort is stable, so entries with equal counts keep the upstream
/// response order.
pub fn rank_repositories(
    mut repositories: Vec<RepoContribution>,
    top_repos: usize,
) -> Vec<RepoContribution> {
    repositories.retain(|repo| split_full_name(&repo.full_name).is_some());
    repositories.sort_by(|a, b| b.commit_count.cmp(&a.commit_count));
    repositories.truncate(top_repos);
    repositories
}
