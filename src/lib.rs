pub mod error;
pub mod format;
pub mod kpi;
pub mod metrics;
pub mod model;
pub mod scope;
pub mod store;
pub mod window;

pub use error::{Error, Result};
pub use format::{format_duration, DurationStyle};
pub use kpi::Kpi;
pub use metrics::ranking::{
    ContributorStats, RankOptions, RoleFilter, SortDirection, SortKey,
};
pub use metrics::{compute_snapshot, MetricsSnapshot, TimeSeriesPoint};
pub use model::events::{Commit, Deployment, DeployStatus, EventLog, Incident, MergeRequest};
pub use model::{Developer, Organization, Project, Role, Team};
pub use scope::{resolve_scope, Scope, ScopeSelector};
pub use store::EventStore;
pub use window::Window;

use chrono::{DateTime, Utc};
use metrics::ranking::rank_contributors;

/// Main entry point: one loaded feed, queried any number of times.
///
/// Every query is an independent pure computation over the immutable feed;
/// nothing is cached between calls and concurrent queries need no locking.
pub struct DevLens {
    store: EventStore,
}

impl DevLens {
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }

    /// Access the loaded feed (for direct inspection in the CLI).
    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Snapshot for a scope, anchored at the current instant.
    pub fn snapshot(&self, selector: &ScopeSelector, window: &Window) -> Result<MetricsSnapshot> {
        self.snapshot_at(selector, window, Utc::now())
    }

    /// Snapshot for a scope at an explicit anchor instant. Fixed inputs
    /// produce identical output.
    pub fn snapshot_at(
        &self,
        selector: &ScopeSelector,
        window: &Window,
        as_of: DateTime<Utc>,
    ) -> Result<MetricsSnapshot> {
        let scope = resolve_scope(&self.store.organization, selector)?;
        Ok(compute_snapshot(&self.store.events, &scope, window, as_of))
    }

    /// Ranked contributor table for a team.
    pub fn contributors(
        &self,
        team_id: u64,
        options: &RankOptions,
        window: &Window,
    ) -> Result<Vec<ContributorStats>> {
        self.contributors_at(team_id, options, window, Utc::now())
    }

    pub fn contributors_at(
        &self,
        team_id: u64,
        options: &RankOptions,
        window: &Window,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<ContributorStats>> {
        rank_contributors(
            &self.store.organization,
            &self.store.events,
            team_id,
            options,
            window,
            as_of,
        )
    }

    /// Two snapshots side by side (team vs team, or team vs organization
    /// average), computed with the same anchor instant so the windows line up.
    pub fn compare(
        &self,
        a: &ScopeSelector,
        b: &ScopeSelector,
        window: &Window,
    ) -> Result<(MetricsSnapshot, MetricsSnapshot)> {
        let as_of = Utc::now();
        Ok((
            self.snapshot_at(a, window, as_of)?,
            self.snapshot_at(b, window, as_of)?,
        ))
    }
}
