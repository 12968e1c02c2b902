use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A merged change request together with its paired deployment.
///
/// `deployed_at` is the completion time of the deployment that shipped this
/// change. The pairing is an explicit fact on the record; it is never
/// inferred from deployment proximity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeRequest {
    pub id: u64,
    pub project_id: u64,
    pub author_id: u64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub merged_at: DateTime<Utc>,
    /// First commit on the source branch.
    pub first_commit_at: DateTime<Utc>,
    /// Completion time of the paired deployment.
    pub deployed_at: DateTime<Utc>,
    /// When the first review landed. None if the MR was never reviewed.
    pub first_reviewed_at: Option<DateTime<Utc>>,
    /// Lines changed.
    pub changes_count: u64,
}

impl MergeRequest {
    /// Elapsed time from creation to merge.
    pub fn cycle_time(&self) -> Duration {
        self.merged_at - self.created_at
    }

    /// Elapsed time from first commit to deployment. A negative value means
    /// the upstream data is inconsistent (deploy recorded before the first
    /// commit); it is passed through unclamped.
    pub fn lead_time_for_change(&self) -> Duration {
        self.deployed_at - self.first_commit_at
    }

    /// Time from creation to the first review, if one happened.
    pub fn first_review_time(&self) -> Option<Duration> {
        self.first_reviewed_at.map(|t| t - self.created_at)
    }
}

/// A single commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub project_id: u64,
    pub author_id: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployStatus {
    Success,
    Failed,
}

/// A deployment event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: u64,
    pub project_id: u64,
    pub author_id: u64,
    pub created_at: DateTime<Utc>,
    pub status: DeployStatus,
}

/// A production incident. `closed_at` is None while the incident is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: u64,
    pub project_id: u64,
    pub author_id: u64,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Incident {
    /// Time from creation to closure. None while the incident is still open;
    /// open incidents must not count as zero in restore-time averages.
    pub fn restore_time(&self) -> Option<Duration> {
        self.closed_at.map(|t| t - self.created_at)
    }
}

/// The four read-only event collections supplied by the event store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    pub merge_requests: Vec<MergeRequest>,
    pub commits: Vec<Commit>,
    pub deployments: Vec<Deployment>,
    pub incidents: Vec<Incident>,
}
