use chrono::NaiveDate;
use serde::Serialize;

/// One point in the lead-time series: a single merged merge request.
/// Multiple merge requests merged on the same date produce multiple points;
/// the series is never deduplicated by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    /// UTC calendar date of the merge.
    pub date: NaiveDate,
    pub lead_time_hours: f64,
}

/// The derived statistics for one scope and window.
///
/// Produced fresh per query and never mutated afterwards; a snapshot has no
/// identity beyond the query that built it. Averaged durations are plain
/// milliseconds; every mean short-circuits to 0 on an empty input set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Resolved display name of the scope (team, developer, or
    /// "Organization Average").
    pub name: String,
    /// Count of successful deployments.
    pub deployment_frequency: u64,
    /// Mean lead time for change over merge requests.
    pub avg_lead_time_ms: f64,
    /// Failed deployments as a percentage of all deployments, in [0, 100].
    pub change_failure_rate_pct: f64,
    /// Mean restore time over closed incidents. Open incidents are excluded
    /// from the denominator.
    pub avg_time_to_restore_ms: f64,
    /// Mean time from merge-request creation to merge.
    pub avg_cycle_time_ms: f64,
    /// Mean time to first review over reviewed merge requests only.
    pub avg_review_time_ms: f64,
    /// Mean lines changed per merge request.
    pub avg_mr_size: f64,
    /// Count of commits.
    pub commit_throughput: u64,
    /// Count of distinct weekdays with at least one commit.
    pub coding_days: u64,
    /// Lead time per merge request, ordered by merge date ascending.
    pub timeline: Vec<TimeSeriesPoint>,
}
