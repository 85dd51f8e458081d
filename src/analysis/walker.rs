//! Cursor-following traversal of one repository's commit history.
//!
//! The traversal is an explicit state machine: [`step`] is a pure function
//! from `(state, page)` to the sizes to emit and the next state, which makes
//! it testable with canned pages. [`walk_repository`] is the async driver
//! that issues the page fetches.

use tracing::debug;

use crate::error::RecapError;
use crate::github::CommitSource;
use crate::types::{CommitPage, ContributionWindow};

/// Traversal position within one repository's history.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct WalkerState {
    /// Continuation token for the next fetch; absent at the start of history
    pub cursor: Option<String>,
    /// Observations collected so far for this repository
    pub collected: usize,
}

/// Result of folding one page into the traversal.
#[derive(Debug)]
pub(crate) struct StepOutcome {
    /// Commit sizes to emit from this page, in history order
    pub emit: Vec<u64>,
    /// State to continue from, or `None` when the traversal is done
    pub next: Option<WalkerState>,
}

/// Fold one fetched page into the traversal state.
///
/// Stops on an empty page (end of history or unresolvable repository), when
/// the per-repository budget is met, or when no continuation token remains.
pub(crate) fn step(state: WalkerState, page: CommitPage, budget: usize) -> StepOutcome {
    if page.records.is_empty() {
        return StepOutcome {
            emit: Vec::new(),
            next: None,
        };
    }

    let remaining = budget.saturating_sub(state.collected);
    let emit: Vec<u64> = page
        .records
        .iter()
        .take(remaining)
        .map(|record| record.size())
        .collect();
    let collected = state.collected + emit.len();

    let exhausted_budget = collected >= budget;
    let next = match (exhausted_budget, page.has_next_page, page.next_cursor) {
        (false, true, Some(cursor)) => Some(WalkerState {
            cursor: Some(cursor),
            collected,
        }),
        _ => None,
    };

    StepOutcome { emit, next }
}

/// Collect up to `budget` commit sizes from one repository's default-branch
/// history. Any page-fetch failure is terminal.
pub(crate) async fn walk_repository<S>(
    source: &S,
    owner: &str,
    name: &str,
    window: &ContributionWindow,
    author_id: &str,
    budget: usize,
) -> Result<Vec<u64>, RecapError>
where
    S: CommitSource + ?Sized,
{
    let mut sizes = Vec::new();
    let mut state = WalkerState::default();

    loop {
        let page = source
            .fetch_commit_page(owner, name, window, author_id, state.cursor.as_deref())
            .await?;
        debug!(
            owner,
            name,
            page_records = page.records.len(),
            collected = state.collected,
            "commit page fetched"
        );

        let outcome = step(state, page, budget);
        sizes.extend(outcome.emit);
        match outcome.next {
            Some(next) => state = next,
            None => break,
        }
    }

    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CommitRecord;
    use pretty_assertions::assert_eq;

    fn page(sizes: &[u64], has_next_page: bool, next_cursor: Option<&str>) -> CommitPage {
        CommitPage {
            records: sizes
                .iter()
                .map(|&s| CommitRecord {
                    additions: s,
                    deletions: 0,
                })
                .collect(),
            has_next_page,
            next_cursor: next_cursor.map(str::to_string),
        }
    }

    #[test]
    fn empty_page_stops_immediately() {
        let outcome = step(WalkerState::default(), page(&[], true, Some("c1")), 10);
        assert!(outcome.emit.is_empty());
        assert!(outcome.next.is_none());
    }

    #[test]
    fn budget_caps_emission_within_a_page() {
        let outcome = step(
            WalkerState::default(),
            page(&[1, 2, 3, 4, 5, 6, 7], true, Some("c1")),
            5,
        );
        assert_eq!(outcome.emit, vec![1, 2, 3, 4, 5]);
        // Budget met, so pagination stops even though more pages exist.
        assert!(outcome.next.is_none());
    }

    #[test]
    fn traversal_advances_the_cursor_under_budget() {
        let outcome = step(WalkerState::default(), page(&[1, 2], true, Some("c1")), 10);
        assert_eq!(outcome.emit, vec![1, 2]);
        let next = outcome.next.unwrap();
        assert_eq!(next.cursor.as_deref(), Some("c1"));
        assert_eq!(next.collected, 2);
    }

    #[test]
    fn last_page_stops_the_traversal() {
        let state = WalkerState {
            cursor: Some("c1".to_string()),
            collected: 2,
        };
        let outcome = step(state, page(&[3], false, None), 10);
        assert_eq!(outcome.emit, vec![3]);
        assert!(outcome.next.is_none());
    }

    #[test]
    fn missing_cursor_stops_even_when_more_pages_are_claimed() {
        let outcome = step(WalkerState::default(), page(&[1], true, None), 10);
        assert_eq!(outcome.emit, vec![1]);
        assert!(outcome.next.is_none());
    }

    #[test]
    fn exact_budget_on_page_boundary_stops() {
        let outcome = step(WalkerState::default(), page(&[1, 2, 3], true, Some("c1")), 3);
        assert_eq!(outcome.emit, vec![1, 2, 3]);
        assert!(outcome.next.is_none());
    }
}
