use std::str::FromStr;

use crate::error::Error;
use crate::format::{format_duration, DurationStyle};
use crate::metrics::MetricsSnapshot;

/// The fixed, enumerable set of KPI identifiers. Each key maps to a display
/// name, a unit caption, a snapshot field, and a formatter. There is no
/// runtime extensibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kpi {
    DeploymentFrequency,
    AvgLeadTime,
    ChangeFailureRate,
    AvgTimeToRestore,
    AvgCycleTime,
    AvgReviewTime,
    AvgMrSize,
    CommitThroughput,
    CodingDays,
}

impl Kpi {
    pub const ALL: [Kpi; 9] = [
        Kpi::DeploymentFrequency,
        Kpi::AvgLeadTime,
        Kpi::ChangeFailureRate,
        Kpi::AvgTimeToRestore,
        Kpi::AvgCycleTime,
        Kpi::AvgReviewTime,
        Kpi::AvgMrSize,
        Kpi::CommitThroughput,
        Kpi::CodingDays,
    ];

    /// Canonical key, matching the snapshot field name.
    pub fn key(&self) -> &'static str {
        match self {
            Kpi::DeploymentFrequency => "deployment_frequency",
            Kpi::AvgLeadTime => "avg_lead_time",
            Kpi::ChangeFailureRate => "change_failure_rate",
            Kpi::AvgTimeToRestore => "avg_time_to_restore",
            Kpi::AvgCycleTime => "avg_cycle_time",
            Kpi::AvgReviewTime => "avg_review_time",
            Kpi::AvgMrSize => "avg_mr_size",
            Kpi::CommitThroughput => "commit_throughput",
            Kpi::CodingDays => "coding_days",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Kpi::DeploymentFrequency => "Deployment Frequency",
            Kpi::AvgLeadTime => "Lead Time for Change",
            Kpi::ChangeFailureRate => "Change Failure Rate",
            Kpi::AvgTimeToRestore => "Time to Restore Service",
            Kpi::AvgCycleTime => "Avg. Cycle Time",
            Kpi::AvgReviewTime => "Time to First Review",
            Kpi::AvgMrSize => "Avg. MR Size",
            Kpi::CommitThroughput => "Commit Throughput",
            Kpi::CodingDays => "Coding Days",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Kpi::DeploymentFrequency => "deploys in period",
            Kpi::AvgLeadTime => "from commit to deploy",
            Kpi::ChangeFailureRate => "% of deployments cause failure",
            Kpi::AvgTimeToRestore => "to resolve incidents",
            Kpi::AvgCycleTime => "from open to merge",
            Kpi::AvgReviewTime => "after MR is opened",
            Kpi::AvgMrSize => "lines changed",
            Kpi::CommitThroughput => "commits in period",
            Kpi::CodingDays => "active days in period",
        }
    }

    /// Read this KPI's scalar value out of a snapshot.
    pub fn value_of(&self, snapshot: &MetricsSnapshot) -> f64 {
        match self {
            Kpi::DeploymentFrequency => snapshot.deployment_frequency as f64,
            Kpi::AvgLeadTime => snapshot.avg_lead_time_ms,
            Kpi::ChangeFailureRate => snapshot.change_failure_rate_pct,
            Kpi::AvgTimeToRestore => snapshot.avg_time_to_restore_ms,
            Kpi::AvgCycleTime => snapshot.avg_cycle_time_ms,
            Kpi::AvgReviewTime => snapshot.avg_review_time_ms,
            Kpi::AvgMrSize => snapshot.avg_mr_size,
            Kpi::CommitThroughput => snapshot.commit_throughput as f64,
            Kpi::CodingDays => snapshot.coding_days as f64,
        }
    }

    /// Render a value of this KPI for display.
    pub fn format(&self, value: f64) -> String {
        match self {
            Kpi::DeploymentFrequency | Kpi::CommitThroughput => format!("{}", value as u64),
            Kpi::AvgLeadTime | Kpi::AvgCycleTime => format_duration(value, DurationStyle::Hours),
            Kpi::AvgTimeToRestore | Kpi::AvgReviewTime => {
                format_duration(value, DurationStyle::Short)
            }
            Kpi::ChangeFailureRate => format!("{value:.1}%"),
            Kpi::AvgMrSize => format!("{}", value.round() as i64),
            Kpi::CodingDays => format!("{value:.1}"),
        }
    }
}

impl FromStr for Kpi {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kpi::ALL
            .iter()
            .find(|k| k.key() == s)
            .copied()
            .ok_or_else(|| Error::Config(format!("unknown KPI: {s}")))
    }
}

impl std::fmt::Display for Kpi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
