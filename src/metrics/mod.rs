pub mod ranking;
pub mod types;

pub use types::*;

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Utc, Weekday};

use crate::model::events::{DeployStatus, EventLog};
use crate::scope::Scope;
use crate::window::Window;

/// Compute the metrics snapshot for one scope and window.
///
/// Each of the four collections is narrowed by window and then by scope
/// before any statistic is read; a record survives iff its filtering
/// timestamp is within the window AND both its project and author are in
/// scope. Sums accumulate left-to-right in each collection's natural order,
/// so identical inputs always produce identical output.
pub fn compute_snapshot(
    events: &EventLog,
    scope: &Scope,
    window: &Window,
    as_of: DateTime<Utc>,
) -> MetricsSnapshot {
    let mrs: Vec<_> = events
        .merge_requests
        .iter()
        .filter(|m| window.contains(m.created_at, as_of))
        .filter(|m| scope.contains(m.project_id, m.author_id))
        .collect();
    let commits: Vec<_> = events
        .commits
        .iter()
        .filter(|c| window.contains(c.created_at, as_of))
        .filter(|c| scope.contains(c.project_id, c.author_id))
        .collect();
    let deployments: Vec<_> = events
        .deployments
        .iter()
        .filter(|d| window.contains(d.created_at, as_of))
        .filter(|d| scope.contains(d.project_id, d.author_id))
        .collect();
    let incidents: Vec<_> = events
        .incidents
        .iter()
        .filter(|i| window.contains(i.created_at, as_of))
        .filter(|i| scope.contains(i.project_id, i.author_id))
        .collect();

    let mut total_lead_ms = 0i64;
    let mut total_cycle_ms = 0i64;
    let mut total_mr_size = 0u64;
    let mut total_review_ms = 0i64;
    let mut mrs_with_review = 0usize;
    for mr in &mrs {
        total_lead_ms += mr.lead_time_for_change().num_milliseconds();
        total_cycle_ms += mr.cycle_time().num_milliseconds();
        total_mr_size += mr.changes_count;
        if let Some(review) = mr.first_review_time() {
            total_review_ms += review.num_milliseconds();
            mrs_with_review += 1;
        }
    }

    let successful = deployments
        .iter()
        .filter(|d| d.status == DeployStatus::Success)
        .count();
    let failed = deployments
        .iter()
        .filter(|d| d.status == DeployStatus::Failed)
        .count();

    let mut total_restore_ms = 0i64;
    let mut closed_incidents = 0usize;
    for incident in &incidents {
        if let Some(restore) = incident.restore_time() {
            total_restore_ms += restore.num_milliseconds();
            closed_incidents += 1;
        }
    }

    let mut weekdays: HashSet<Weekday> = HashSet::new();
    for commit in &commits {
        weekdays.insert(commit.created_at.weekday());
    }

    // Stable sort: merge requests merged at the same instant keep their
    // input order in the series.
    let mut merged = mrs.clone();
    merged.sort_by_key(|m| m.merged_at);
    let timeline = merged
        .iter()
        .map(|m| TimeSeriesPoint {
            date: m.merged_at.date_naive(),
            lead_time_hours: m.lead_time_for_change().num_milliseconds() as f64 / 3_600_000.0,
        })
        .collect();

    MetricsSnapshot {
        name: scope.display_name().to_string(),
        deployment_frequency: successful as u64,
        avg_lead_time_ms: mean_ms(total_lead_ms, mrs.len()),
        change_failure_rate_pct: if deployments.is_empty() {
            0.0
        } else {
            failed as f64 / deployments.len() as f64 * 100.0
        },
        avg_time_to_restore_ms: mean_ms(total_restore_ms, closed_incidents),
        avg_cycle_time_ms: mean_ms(total_cycle_ms, mrs.len()),
        avg_review_time_ms: mean_ms(total_review_ms, mrs_with_review),
        avg_mr_size: if mrs.is_empty() {
            0.0
        } else {
            total_mr_size as f64 / mrs.len() as f64
        },
        commit_throughput: commits.len() as u64,
        coding_days: weekdays.len() as u64,
        timeline,
    }
}

/// Arithmetic mean with the division-by-zero policy: an empty input set
/// yields 0, never NaN.
fn mean_ms(total_ms: i64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total_ms as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::events::{Commit, Deployment, Incident, MergeRequest};
    use crate::model::{Developer, Organization, Project, Role, Team};
    use crate::scope::{resolve_scope, ScopeSelector};
    use chrono::{Duration, TimeZone};

    fn org() -> Organization {
        Organization {
            teams: vec![Team {
                id: 1,
                name: "Team Phoenix".to_string(),
                developers: vec![
                    Developer {
                        id: 101,
                        username: "alice".to_string(),
                        name: "Alice".to_string(),
                        role: Role::Frontend,
                        avatar_url: None,
                    },
                    Developer {
                        id: 102,
                        username: "bob".to_string(),
                        name: "Bob".to_string(),
                        role: Role::Backend,
                        avatar_url: None,
                    },
                ],
                projects: vec![
                    Project {
                        id: 1,
                        name: "Frontend Platform".to_string(),
                    },
                    Project {
                        id: 2,
                        name: "API Gateway".to_string(),
                    },
                ],
            }],
        }
    }

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, 9, 0, 0).unwrap()
    }

    /// Merge request with the given lead time; merged two hours after
    /// creation on the given day.
    fn mr(id: u64, merged_day: u32, lead_hours: i64, review: Option<Duration>) -> MergeRequest {
        let created_at = day(merged_day) - Duration::hours(2);
        let first_commit_at = created_at + Duration::minutes(10);
        MergeRequest {
            id,
            project_id: 1,
            author_id: 101,
            title: format!("Change {id}"),
            created_at,
            merged_at: day(merged_day),
            first_commit_at,
            deployed_at: first_commit_at + Duration::hours(lead_hours),
            first_reviewed_at: review.map(|r| created_at + r),
            changes_count: 100,
        }
    }

    fn deployment(id: u64, status: DeployStatus) -> Deployment {
        Deployment {
            id,
            project_id: 1,
            author_id: 101,
            created_at: day(10),
            status,
        }
    }

    fn team_scope() -> crate::scope::Scope {
        resolve_scope(&org(), &ScopeSelector::Team(1)).unwrap()
    }

    #[test]
    fn test_empty_inputs_yield_zeroes() {
        let events = EventLog::default();
        let snapshot = compute_snapshot(&events, &team_scope(), &Window::All, as_of());

        assert_eq!(snapshot.name, "Team Phoenix");
        assert_eq!(snapshot.deployment_frequency, 0);
        assert_eq!(snapshot.avg_lead_time_ms, 0.0);
        assert_eq!(snapshot.change_failure_rate_pct, 0.0);
        assert_eq!(snapshot.avg_time_to_restore_ms, 0.0);
        assert_eq!(snapshot.avg_cycle_time_ms, 0.0);
        assert_eq!(snapshot.avg_review_time_ms, 0.0);
        assert_eq!(snapshot.avg_mr_size, 0.0);
        assert_eq!(snapshot.commit_throughput, 0);
        assert_eq!(snapshot.coding_days, 0);
        assert!(snapshot.timeline.is_empty());
    }

    #[test]
    fn test_lead_time_average_and_timeline() {
        // Three merge requests with 2h, 4h, 6h lead times.
        let events = EventLog {
            merge_requests: vec![mr(1, 3, 2, None), mr(2, 1, 4, None), mr(3, 2, 6, None)],
            ..Default::default()
        };
        let snapshot = compute_snapshot(&events, &team_scope(), &Window::All, as_of());

        assert_eq!(snapshot.avg_lead_time_ms, 14_400_000.0);
        assert_eq!(snapshot.timeline.len(), 3);
        // Sorted by merge date ascending, regardless of input order.
        assert_eq!(snapshot.timeline[0].date, day(1).date_naive());
        assert_eq!(snapshot.timeline[1].date, day(2).date_naive());
        assert_eq!(snapshot.timeline[2].date, day(3).date_naive());
        assert_eq!(snapshot.timeline[0].lead_time_hours, 4.0);
        assert_eq!(snapshot.timeline[1].lead_time_hours, 6.0);
        assert_eq!(snapshot.timeline[2].lead_time_hours, 2.0);
    }

    #[test]
    fn test_timeline_keeps_same_date_points() {
        let events = EventLog {
            merge_requests: vec![mr(1, 5, 2, None), mr(2, 5, 4, None)],
            ..Default::default()
        };
        let snapshot = compute_snapshot(&events, &team_scope(), &Window::All, as_of());

        // Two merges on the same date stay two points, in input order.
        assert_eq!(snapshot.timeline.len(), 2);
        assert_eq!(snapshot.timeline[0].lead_time_hours, 2.0);
        assert_eq!(snapshot.timeline[1].lead_time_hours, 4.0);
    }

    #[test]
    fn test_review_time_excludes_unreviewed() {
        let events = EventLog {
            merge_requests: vec![
                mr(1, 1, 2, Some(Duration::minutes(10))),
                mr(2, 2, 2, None),
                mr(3, 3, 2, Some(Duration::minutes(30))),
            ],
            ..Default::default()
        };
        let snapshot = compute_snapshot(&events, &team_scope(), &Window::All, as_of());

        // [10m, null, 30m] averages to 20m, not 40m/3.
        assert_eq!(snapshot.avg_review_time_ms, 20.0 * 60_000.0);
    }

    #[test]
    fn test_change_failure_rate_bounds() {
        let all_success = EventLog {
            deployments: vec![
                deployment(1, DeployStatus::Success),
                deployment(2, DeployStatus::Success),
            ],
            ..Default::default()
        };
        let snapshot = compute_snapshot(&all_success, &team_scope(), &Window::All, as_of());
        assert_eq!(snapshot.change_failure_rate_pct, 0.0);
        assert_eq!(snapshot.deployment_frequency, 2);

        let all_failed = EventLog {
            deployments: vec![
                deployment(1, DeployStatus::Failed),
                deployment(2, DeployStatus::Failed),
            ],
            ..Default::default()
        };
        let snapshot = compute_snapshot(&all_failed, &team_scope(), &Window::All, as_of());
        assert_eq!(snapshot.change_failure_rate_pct, 100.0);
        assert_eq!(snapshot.deployment_frequency, 0);

        let mixed = EventLog {
            deployments: vec![
                deployment(1, DeployStatus::Success),
                deployment(2, DeployStatus::Success),
                deployment(3, DeployStatus::Success),
                deployment(4, DeployStatus::Failed),
            ],
            ..Default::default()
        };
        let snapshot = compute_snapshot(&mixed, &team_scope(), &Window::All, as_of());
        assert_eq!(snapshot.change_failure_rate_pct, 25.0);
    }

    #[test]
    fn test_open_incidents_excluded_from_restore_average() {
        let events = EventLog {
            incidents: vec![
                Incident {
                    id: 1,
                    project_id: 1,
                    author_id: 101,
                    created_at: day(5),
                    closed_at: Some(day(5) + Duration::hours(4)),
                },
                // Still open: must not drag the average toward zero.
                Incident {
                    id: 2,
                    project_id: 1,
                    author_id: 101,
                    created_at: day(6),
                    closed_at: None,
                },
            ],
            ..Default::default()
        };
        let snapshot = compute_snapshot(&events, &team_scope(), &Window::All, as_of());
        assert_eq!(snapshot.avg_time_to_restore_ms, 4.0 * 3_600_000.0);
    }

    #[test]
    fn test_coding_days_distinct_weekdays() {
        // 2025-06-02 is a Monday. Two commits on Monday, one on Tuesday.
        let commit = |id: &str, d: u32, h: u32| Commit {
            id: id.to_string(),
            project_id: 1,
            author_id: 101,
            created_at: Utc.with_ymd_and_hms(2025, 6, d, h, 0, 0).unwrap(),
        };
        let events = EventLog {
            commits: vec![
                commit("c1", 2, 9),
                commit("c2", 2, 17),
                commit("c3", 3, 11),
                // A Monday one week later: same weekday, not a new coding day.
                commit("c4", 9, 9),
            ],
            ..Default::default()
        };
        let snapshot = compute_snapshot(&events, &team_scope(), &Window::All, as_of());
        assert_eq!(snapshot.commit_throughput, 4);
        assert_eq!(snapshot.coding_days, 2);
    }

    #[test]
    fn test_scoping_is_conjunctive() {
        let mut in_scope = mr(1, 5, 2, None);
        in_scope.changes_count = 10;
        // In-scope project, foreign author.
        let mut foreign_author = mr(2, 6, 2, None);
        foreign_author.author_id = 999;
        // In-scope author, foreign project.
        let mut foreign_project = mr(3, 7, 2, None);
        foreign_project.project_id = 99;

        let events = EventLog {
            merge_requests: vec![in_scope, foreign_author, foreign_project],
            ..Default::default()
        };
        let snapshot = compute_snapshot(&events, &team_scope(), &Window::All, as_of());
        assert_eq!(snapshot.timeline.len(), 1);
        assert_eq!(snapshot.avg_mr_size, 10.0);
    }

    #[test]
    fn test_window_narrows_before_aggregation() {
        let events = EventLog {
            merge_requests: vec![mr(1, 14, 2, None), mr(2, 1, 6, None)],
            ..Default::default()
        };
        // Last 7 days from June 15: only the June 14 merge request remains.
        let snapshot =
            compute_snapshot(&events, &team_scope(), &Window::LastDays(7), as_of());
        assert_eq!(snapshot.timeline.len(), 1);
        assert_eq!(snapshot.avg_lead_time_ms, 2.0 * 3_600_000.0);
    }

    #[test]
    fn test_deterministic_for_fixed_inputs() {
        let events = EventLog {
            merge_requests: vec![mr(1, 3, 2, Some(Duration::minutes(15))), mr(2, 1, 4, None)],
            deployments: vec![
                deployment(1, DeployStatus::Success),
                deployment(2, DeployStatus::Failed),
            ],
            ..Default::default()
        };
        let first = compute_snapshot(&events, &team_scope(), &Window::All, as_of());
        let second = compute_snapshot(&events, &team_scope(), &Window::All, as_of());
        assert_eq!(first, second);
    }
}
