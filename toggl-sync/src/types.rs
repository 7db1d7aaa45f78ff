use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

pub use toggl::domain::{Project, ProjectId, TimeEntry as RawTimeEntry, WorkspaceId};

/// Name and color given to entries whose project is absent or unknown.
pub const UNKNOWN_PROJECT_NAME: &str = "Unknown Project";
pub const UNKNOWN_PROJECT_COLOR: &str = "";

/// A time entry in the working set.
///
/// Entries arrive from the API without project details; hydration copies the
/// project's name and color onto the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    #[serde(flatten)]
    pub raw: RawTimeEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_color: Option<String>,
}

impl TimeEntry {
    pub fn with_project_details(
        mut self,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        self.project_name = Some(name.into());
        self.project_color = Some(color.into());
        self
    }
}

impl From<RawTimeEntry> for TimeEntry {
    fn from(raw: RawTimeEntry) -> Self {
        Self {
            raw,
            project_name: None,
            project_color: None,
        }
    }
}

/// The running timer as last reported by the server.
///
/// `Idle` is a definite answer ("nothing is running") and serializes as an
/// empty object; not having synced yet is represented by the absence of a
/// snapshot, not by this type.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CurrentTimer {
    #[default]
    Idle,
    Running(Box<RawTimeEntry>),
}

impl CurrentTimer {
    pub fn entry(&self) -> Option<&RawTimeEntry> {
        match self {
            Self::Idle => None,
            Self::Running(entry) => Some(entry),
        }
    }
}

impl From<Option<RawTimeEntry>> for CurrentTimer {
    fn from(entry: Option<RawTimeEntry>) -> Self {
        entry.map_or(Self::Idle, |entry| Self::Running(Box::new(entry)))
    }
}

impl Serialize for CurrentTimer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Idle => serializer.serialize_map(Some(0))?.end(),
            Self::Running(entry) => entry.serialize(serializer),
        }
    }
}

/// What a successful credential exchange yields.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub api_token: String,
    pub default_wid: WorkspaceId,
}

impl std::fmt::Debug for LoginGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginGrant")
            .field("api_token", &"***")
            .field("default_wid", &self.default_wid)
            .finish()
    }
}

impl From<toggl::domain::User> for LoginGrant {
    fn from(user: toggl::domain::User) -> Self {
        Self {
            api_token: user.api_token,
            default_wid: user.default_wid,
        }
    }
}
