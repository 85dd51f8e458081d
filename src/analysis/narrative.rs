//! Qualitative description of a commit-size distribution.
//!
//! The tone rules are an ordered table of `(median ceiling, p90 ceiling,
//! tone)` rows scanned first-match, keyed jointly on the median and the
//! 90th percentile.

use crate::types::DistributionStats;

const EMPTY_WINDOW: &str = "No commits found in the selected window.";

const TONES: [(u64, u64, &str); 3] = [
    (20, 120, "Mostly small, steady commits with occasional medium pushes."),
    (60, 300, "Balanced mix of routine commits and periodic larger changes."),
    (
        120,
        600,
        "Frequent medium-to-large commits; bigger change sets show up often.",
    ),
];

const TONE_FALLBACK: &str = "Large, chunky commits dominate the period.";

const SKEWED: &str = "A few very large commits skew the average upward.";
const CONSISTENT: &str = "Commit sizes stay relatively consistent.";

/// Render a distribution as a two-sentence story: a tone picked from the
/// threshold table plus a remark on how skewed the average is.
pub fn describe_distribution(stats: &DistributionStats) -> String {
    if stats.count == 0 {
        return EMPTY_WINDOW.to_string();
    }

    let tone = TONES
        .iter()
        .find(|(median_ceiling, p90_ceiling, _)| {
            stats.median <= *median_ceiling && stats.p90 <= *p90_ceiling
        })
        .map(|(_, _, tone)| *tone)
        .unwrap_or(TONE_FALLBACK);

    let skew = if stats.average > stats.median as f64 * 1.6 {
        SKEWED
    } else {
        CONSISTENT
    };

    format!("{tone} {skew}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stats(count: u64, median: u64, p90: u64, average: f64) -> DistributionStats {
        DistributionStats {
            count,
            median,
            p90,
            average,
            ..Default::default()
        }
    }

    #[test]
    fn empty_window_short_circuits() {
        assert_eq!(
            describe_distribution(&stats(0, 0, 0, 0.0)),
            "No commits found in the selected window."
        );
    }

    #[test]
    fn small_steady_tone_at_the_boundary() {
        // median 20 and p90 120 sit exactly on the first row's ceilings;
        // average 25 <= 20 * 1.6, so the consistent remark applies.
        assert_eq!(
            describe_distribution(&stats(10, 20, 120, 25.0)),
            "Mostly small, steady commits with occasional medium pushes. \
             Commit sizes stay relatively consistent."
        );
    }

    #[test]
    fn both_ceilings_must_hold_for_a_row() {
        // Median fits the first row but p90 does not, so the second row wins.
        let story = describe_distribution(&stats(10, 15, 250, 30.0));
        assert!(story.starts_with("Balanced mix of routine commits"));
    }

    #[test]
    fn large_commits_fall_through_the_table() {
        let story = describe_distribution(&stats(10, 400, 2000, 500.0));
        assert!(story.starts_with("Large, chunky commits dominate the period."));
    }

    #[test]
    fn skew_remark_triggers_above_the_ratio() {
        let story = describe_distribution(&stats(10, 20, 120, 33.0));
        assert!(story.ends_with("A few very large commits skew the average upward."));
    }
}
