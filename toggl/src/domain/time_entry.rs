use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use super::{ProjectId, TimeEntryId};

/// A time entry as returned by the API.
///
/// Only the fields the client reasons about are typed; everything else is
/// kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: TimeEntryId,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub stop: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<ProjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TimeEntry {
    pub fn new(id: TimeEntryId, start: OffsetDateTime) -> Self {
        Self {
            id,
            start,
            stop: None,
            pid: None,
            description: None,
            extra: Map::new(),
        }
    }

    pub fn with_stop(mut self, stop: OffsetDateTime) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn with_project(mut self, pid: ProjectId) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_running(&self) -> bool {
        self.stop.is_none()
    }
}
