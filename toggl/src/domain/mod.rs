mod project;
mod time_entry;
mod user;

pub use project::*;
pub use time_entry::*;
pub use user::*;

pub type WorkspaceId = u64;
pub type ProjectId = u64;
pub type TimeEntryId = u64;

/// Envelope used by the API for single-object responses.
#[derive(Debug, serde::Deserialize)]
pub struct DataResponse<T> {
    pub data: Option<T>,
}
