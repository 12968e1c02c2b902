use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::Organization;

/// What a query is asking about: a team, one contributor within a team,
/// or the whole organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeSelector {
    Organization,
    Team(u64),
    Developer { team_id: u64, developer_id: u64 },
}

/// The resolved (project-id-set, author-id-set) pair that decides which raw
/// events are eligible for a query. A record is in scope iff BOTH its
/// project and its author are in scope.
#[derive(Debug, Clone)]
pub struct Scope {
    project_ids: HashSet<u64>,
    author_ids: HashSet<u64>,
    display_name: String,
}

impl Scope {
    pub fn contains(&self, project_id: u64, author_id: u64) -> bool {
        self.project_ids.contains(&project_id) && self.author_ids.contains(&author_id)
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Resolve a selector against the organization graph.
///
/// Drilling into a contributor narrows authorship to that one developer but
/// keeps the team's full project set. An unknown team or developer id is an
/// error; there is no fallback to organization scope.
pub fn resolve_scope(org: &Organization, selector: &ScopeSelector) -> Result<Scope> {
    match selector {
        ScopeSelector::Organization => Ok(Scope {
            project_ids: org.projects().map(|p| p.id).collect(),
            author_ids: org.developers().map(|d| d.id).collect(),
            display_name: "Organization Average".to_string(),
        }),
        ScopeSelector::Team(team_id) => {
            let team = org
                .team(*team_id)
                .ok_or_else(|| Error::ScopeNotFound(format!("team {team_id}")))?;
            Ok(Scope {
                project_ids: team.projects.iter().map(|p| p.id).collect(),
                author_ids: team.developers.iter().map(|d| d.id).collect(),
                display_name: team.name.clone(),
            })
        }
        ScopeSelector::Developer {
            team_id,
            developer_id,
        } => {
            let team = org
                .team(*team_id)
                .ok_or_else(|| Error::ScopeNotFound(format!("team {team_id}")))?;
            let developer = org
                .developer(*developer_id)
                .ok_or_else(|| Error::ScopeNotFound(format!("developer {developer_id}")))?;
            Ok(Scope {
                project_ids: team.projects.iter().map(|p| p.id).collect(),
                author_ids: HashSet::from([developer.id]),
                display_name: developer.name.clone(),
            })
        }
    }
}
