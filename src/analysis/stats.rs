//! Streaming commit-size statistics: a request-scoped accumulator and the
//! percentile estimator it is summarized with.

use std::collections::HashMap;

use crate::types::DistributionStats;

/// Estimate the `p`-th percentile of a sample already sorted ascending.
///
/// Uses linear interpolation between the two bracketing order statistics,
/// truncated to an integer. An empty sample yields 0 for any `p`; `p <= 0`
/// yields the first element and `p >= 100` the last.
pub fn percentile(sorted: &[u64], p: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    if p <= 0.0 {
        return sorted[0];
    }
    if p >= 100.0 {
        return sorted[sorted.len() - 1];
    }

    let rank = (sorted.len() - 1) as f64 * p / 100.0;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let weight = rank - lo as f64;
    (sorted[lo] as f64 * (1.0 - weight) + sorted[hi] as f64 * weight).floor() as u64
}

/// Accumulates commit-size observations across the repositories walked for
/// one request. Owned by the orchestrator and discarded with the response.
#[derive(Debug, Default)]
pub struct AggregationState {
    /// All observed sizes in discovery order; sorted once at summary time
    sizes: Vec<u64>,
    /// Observations contributed per repository
    per_repo_counts: HashMap<String, usize>,
}

impl AggregationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one commit's size for a repository.
    pub fn observe(&mut self, repo_full_name: &str, additions: u64, deletions: u64) {
        self.record_sizes(repo_full_name, std::iter::once(additions + deletions));
    }

    /// Merge a worker's collected sizes for one repository.
    ///
    /// Repositories that contributed nothing are left out of the per-repo
    /// mapping entirely.
    pub fn absorb(&mut self, repo_full_name: &str, sizes: Vec<u64>) {
        self.record_sizes(repo_full_name, sizes.into_iter());
    }

    fn record_sizes(&mut self, repo_full_name: &str, sizes: impl Iterator<Item = u64>) {
        let before = self.sizes.len();
        self.sizes.extend(sizes);
        let added = self.sizes.len() - before;
        if added > 0 {
            *self
                .per_repo_counts
                .entry(repo_full_name.to_string())
                .or_insert(0) += added;
        }
    }

    /// Sort the accumulated sample once and derive the summary statistics,
    /// consuming the state.
    pub fn finish(mut self) -> (DistributionStats, HashMap<String, usize>) {
        if self.sizes.is_empty() {
            return (DistributionStats::default(), self.per_repo_counts);
        }

        self.sizes.sort_unstable();
        let sizes = &self.sizes;
        let count = sizes.len() as u64;
        let sum: u64 = sizes.iter().sum();
        let average = (sum as f64 / count as f64 * 100.0).round() / 100.0;

        let stats = DistributionStats {
            count,
            min: sizes[0],
            max: sizes[sizes.len() - 1],
            median: percentile(sizes, 50.0),
            p75: percentile(sizes, 75.0),
            p90: percentile(sizes, 90.0),
            p95: percentile(sizes, 95.0),
            average,
        };
        (stats, self.per_repo_counts)
    }
}
