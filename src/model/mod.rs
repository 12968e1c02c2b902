pub mod events;

use serde::{Deserialize, Serialize};

/// A developer's discipline, used for filtering contributor tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Frontend,
    Backend,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Frontend => write!(f, "frontend"),
            Role::Backend => write!(f, "backend"),
        }
    }
}

/// A contributor. Belongs to exactly one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Developer {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub avatar_url: Option<String>,
}

/// A repository owned by exactly one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
}

/// A team: its members and the projects it owns. Membership is static
/// for the duration of one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub name: String,
    pub developers: Vec<Developer>,
    pub projects: Vec<Project>,
}

/// The organization graph: the set of teams with their members and projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub teams: Vec<Team>,
}

impl Organization {
    /// Look up a team by id.
    pub fn team(&self, id: u64) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Look up a developer by id anywhere in the organization.
    pub fn developer(&self, id: u64) -> Option<&Developer> {
        self.teams
            .iter()
            .flat_map(|t| &t.developers)
            .find(|d| d.id == id)
    }

    /// All projects across all teams.
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.teams.iter().flat_map(|t| &t.projects)
    }

    /// All developers across all teams.
    pub fn developers(&self) -> impl Iterator<Item = &Developer> {
        self.teams.iter().flat_map(|t| &t.developers)
    }
}
