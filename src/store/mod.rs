use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::events::EventLog;
use crate::model::Organization;

/// The loaded data feed: the organization graph plus the four event
/// collections. Read-only after load; the engine never mutates records.
///
/// The feed is one JSON document. Timestamps must be ISO-8601; a record
/// with an unparseable timestamp fails the whole load with
/// `Error::MalformedRecord` rather than being coerced to a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventStore {
    pub organization: Organization,
    #[serde(flatten)]
    pub events: EventLog,
}

impl EventStore {
    /// Load a feed from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let store = Self::from_json_str(&raw)?;
        log::info!(
            "loaded feed from {}: {} MRs, {} commits, {} deployments, {} incidents",
            path.as_ref().display(),
            store.events.merge_requests.len(),
            store.events.commits.len(),
            store.events.deployments.len(),
            store.events.incidents.len(),
        );
        Ok(store)
    }

    /// Parse a feed from a JSON string.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
