use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::kpi::Kpi;
use crate::metrics::{compute_snapshot, MetricsSnapshot};
use crate::model::events::EventLog;
use crate::model::{Developer, Organization, Role};
use crate::scope::{resolve_scope, ScopeSelector};
use crate::window::Window;

/// One contributor with their individual snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ContributorStats {
    pub developer: Developer,
    pub snapshot: MetricsSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleFilter {
    #[default]
    All,
    Frontend,
    Backend,
}

impl RoleFilter {
    fn matches(&self, role: Role) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Frontend => role == Role::Frontend,
            RoleFilter::Backend => role == Role::Backend,
        }
    }
}

impl FromStr for RoleFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(RoleFilter::All),
            "frontend" => Ok(RoleFilter::Frontend),
            "backend" => Ok(RoleFilter::Backend),
            other => Err(Error::Config(format!(
                "unknown role filter: {other}. Use: all, frontend, backend"
            ))),
        }
    }
}

/// What to order contributors by: a developer attribute or a KPI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Username,
    Kpi(Kpi),
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(SortKey::Name),
            "username" => Ok(SortKey::Username),
            other => other.parse::<Kpi>().map(SortKey::Kpi).map_err(|_| {
                Error::Config(format!(
                    "unknown sort key: {other}. Use: name, username, or a KPI key"
                ))
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Filtering and ordering for a contributor table.
#[derive(Debug, Clone, Copy)]
pub struct RankOptions {
    pub role: RoleFilter,
    pub sort_key: SortKey,
    pub direction: SortDirection,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            role: RoleFilter::All,
            sort_key: SortKey::Name,
            direction: SortDirection::Ascending,
        }
    }
}

/// Rank a team's contributors by an attribute or KPI.
///
/// Every developer on the team gets an individual snapshot (scope = team
/// projects, that single author), the role filter drops non-matching rows
/// before sorting, and the sort is stable: ties keep team roster order with
/// no secondary key. Results are recomputed on every call, never cached.
pub fn rank_contributors(
    org: &Organization,
    events: &EventLog,
    team_id: u64,
    options: &RankOptions,
    window: &Window,
    as_of: DateTime<Utc>,
) -> Result<Vec<ContributorStats>> {
    let team = org
        .team(team_id)
        .ok_or_else(|| Error::ScopeNotFound(format!("team {team_id}")))?;

    let mut rows = Vec::new();
    for developer in &team.developers {
        if !options.role.matches(developer.role) {
            continue;
        }
        let scope = resolve_scope(
            org,
            &ScopeSelector::Developer {
                team_id,
                developer_id: developer.id,
            },
        )?;
        rows.push(ContributorStats {
            developer: developer.clone(),
            snapshot: compute_snapshot(events, &scope, window, as_of),
        });
    }

    rows.sort_by(|a, b| {
        let ord = compare(a, b, options.sort_key);
        match options.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    Ok(rows)
}

fn compare(a: &ContributorStats, b: &ContributorStats, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.developer.name.cmp(&b.developer.name),
        SortKey::Username => a.developer.username.cmp(&b.developer.username),
        SortKey::Kpi(kpi) => {
            let av = kpi.value_of(&a.snapshot);
            let bv = kpi.value_of(&b.snapshot);
            // KPI values are never NaN (empty inputs short-circuit to 0),
            // so Equal only covers genuine ties.
            av.partial_cmp(&bv).unwrap_or(Ordering::Equal)
        }
    }
}
