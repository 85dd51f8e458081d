//! GraphQL query documents and their wire-format response types.
//!
//! The wire structs mirror the upstream response shape exactly; conversion
//! into the crate's domain types lives here so the client stays a thin
//! transport. Missing or null fields never fail deserialization: absent
//! repositories or branches collapse to empty results and absent commit
//! size fields default to zero.

use serde::Deserialize;

use crate::types::{CommitPage, CommitRecord, ContributionSummary, RepoContribution};

/// One call: the user's node id plus commit totals per repository.
pub(super) const CONTRIBUTION_SUMMARY_QUERY: &str = r#"
query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    id
    contributionsCollection(from: $from, to: $to) {
      commitContributionsByRepository(maxRepositories: 100) {
        repository {
          nameWithOwner
          defaultBranchRef { name }
        }
        contributions { totalCount }
      }
    }
  }
}
"#;

/// One page of default-branch commit history filtered by author and window.
pub(super) const COMMIT_HISTORY_QUERY: &str = r#"
query($owner: String!, $name: String!, $since: GitTimestamp!, $until: GitTimestamp!, $authorId: ID!, $pageSize: Int!, $cursor: String) {
  repository(owner: $owner, name: $name) {
    defaultBranchRef {
      target {
        ... on Commit {
          history(since: $since, until: $until, author: { id: $authorId }, first: $pageSize, after: $cursor) {
            pageInfo { hasNextPage endCursor }
            nodes { additions deletions }
          }
        }
      }
    }
  }
}
"#;

// ── Contribution summary wire types ──

#[derive(Debug, Deserialize)]
pub(super) struct SummaryData {
    pub user: Option<SummaryUser>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SummaryUser {
    pub id: String,
    #[serde(rename = "contributionsCollection")]
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
pub(super) struct ContributionsCollection {
    #[serde(rename = "commitContributionsByRepository", default)]
    pub by_repository: Vec<RepositoryContributions>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RepositoryContributions {
    pub repository: Option<WireRepository>,
    pub contributions: WireContributionCount,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireRepository {
    #[serde(rename = "nameWithOwner")]
    pub name_with_owner: String,
    #[serde(rename = "defaultBranchRef")]
    pub default_branch_ref: Option<WireRef>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireContributionCount {
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}

impl SummaryData {
    /// Flatten the nested response into a [`ContributionSummary`].
    ///
    /// Returns `None` when the login did not resolve to a user. Entries
    /// whose repository is missing are skipped rather than rejected.
    pub(super) fn into_summary(self) -> Option<ContributionSummary> {
        let user = self.user?;
        let repositories = user
            .contributions_collection
            .by_repository
            .into_iter()
            .filter_map(|entry| {
                let repository = entry.repository?;
                Some(RepoContribution {
                    full_name: repository.name_with_owner,
                    commit_count: entry.contributions.total_count,
                    default_branch: repository.default_branch_ref.map(|r| r.name),
                })
            })
            .collect();
        Some(ContributionSummary {
            author_id: user.id,
            repositories,
        })
    }
}

// ── Commit history wire types ──

#[derive(Debug, Deserialize)]
pub(super) struct HistoryData {
    pub repository: Option<HistoryRepository>,
}

#[derive(Debug, Deserialize)]
pub(super) struct HistoryRepository {
    #[serde(rename = "defaultBranchRef")]
    pub default_branch_ref: Option<HistoryRef>,
}

#[derive(Debug, Deserialize)]
pub(super) struct HistoryRef {
    pub target: Option<HistoryTarget>,
}

#[derive(Debug, Deserialize)]
pub(super) struct HistoryTarget {
    pub history: Option<WireHistory>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireHistory {
    #[serde(rename = "pageInfo")]
    pub page_info: WirePageInfo,
    #[serde(default)]
    pub nodes: Vec<CommitRecord>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WirePageInfo {
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
}

impl HistoryData {
    /// Flatten the nested response into a [`CommitPage`].
    ///
    /// A repository, branch or target that did not resolve yields an empty
    /// page, which the walker treats as end of history.
    pub(super) fn into_page(self) -> CommitPage {
        let history = self
            .repository
            .and_then(|r| r.default_branch_ref)
            .and_then(|r| r.target)
            .and_then(|t| t.history);
        match history {
            Some(history) => CommitPage {
                records: history.nodes,
                has_next_page: history.page_info.has_next_page,
                next_cursor: history.page_info.end_cursor,
            },
            None => CommitPage::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn summary_skips_entries_without_a_repository() {
        let data: SummaryData = serde_json::from_str(
            r#"{
                "user": {
                    "id": "U_abc",
                    "contributionsCollection": {
                        "commitContributionsByRepository": [
                            {
                                "repository": {
                                    "nameWithOwner": "octo/widgets",
                                    "defaultBranchRef": { "name": "main" }
                                },
                                "contributions": { "totalCount": 12 }
                            },
                            {
                                "repository": null,
                                "contributions": { "totalCount": 4 }
                            }
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        let summary = data.into_summary().unwrap();
        assert_eq!(summary.author_id, "U_abc");
        assert_eq!(summary.repositories.len(), 1);
        assert_eq!(summary.repositories[0].full_name, "octo/widgets");
        assert_eq!(summary.repositories[0].commit_count, 12);
        assert_eq!(summary.repositories[0].default_branch.as_deref(), Some("main"));
    }

    #[test]
    fn unknown_user_yields_none() {
        let data: SummaryData = serde_json::from_str(r#"{"user": null}"#).unwrap();
        assert!(data.into_summary().is_none());
    }

    #[test]
    fn unresolvable_repository_yields_an_empty_page() {
        let data: HistoryData = serde_json::from_str(r#"{"repository": null}"#).unwrap();
        let page = data.into_page();
        assert!(page.records.is_empty());
        assert!(!page.has_next_page);
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn history_page_flattens_records_and_cursor() {
        let data: HistoryData = serde_json::from_str(
            r#"{
                "repository": {
                    "defaultBranchRef": {
                        "target": {
                            "history": {
                                "pageInfo": { "hasNextPage": true, "endCursor": "abc123" },
                                "nodes": [
                                    { "additions": 10, "deletions": 4 },
                                    {}
                                ]
                            }
                        }
                    }
                }
            }"#,
        )
        .unwrap();

        let page = data.into_page();
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].size(), 14);
        assert_eq!(page.records[1].size(), 0);
        assert!(page.has_next_page);
        assert_eq!(page.next_cursor.as_deref(), Some("abc123"));
    }
}
