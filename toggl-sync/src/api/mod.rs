mod client;
mod dev_backend;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;

use crate::error::SyncError;
use crate::types::{LoginGrant, Project, RawTimeEntry, WorkspaceId};

pub use client::TogglApi;
pub use dev_backend::{DevBackend, DEV_PASSWORD, DEV_USERNAME};

/// The remote time-tracking service as seen by the session and sync code.
///
/// One instance is shared by everything that talks to the server; once a
/// token has been set, every later call is authenticated with it.
#[async_trait]
pub trait TimeTrackingApi: Send + Sync {
    fn set_token(&self, token: &str);

    /// Exchange credentials for an API token and default workspace.
    async fn login(&self, username: &str, password: &str) -> Result<LoginGrant, SyncError>;

    /// The running entry, `None` when no timer is active.
    async fn current_time_entry(&self) -> Result<Option<RawTimeEntry>, SyncError>;

    async fn time_entries(&self) -> Result<Vec<RawTimeEntry>, SyncError>;

    async fn projects(&self, wid: WorkspaceId) -> Result<Vec<Project>, SyncError>;
}
