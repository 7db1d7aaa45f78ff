use anyhow::{Context, Result};
use async_trait::async_trait;
use toggl::TogglClient;

use super::TimeTrackingApi;
use crate::error::SyncError;
use crate::types::{LoginGrant, Project, RawTimeEntry, WorkspaceId};

/// [`TimeTrackingApi`] backed by the real Toggl API.
#[derive(Debug)]
pub struct TogglApi {
    client: TogglClient,
}

impl TogglApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = TogglClient::new(base_url)
            .with_context(|| format!("Invalid API URL: {}", base_url))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TimeTrackingApi for TogglApi {
    fn set_token(&self, token: &str) {
        self.client.set_token(token);
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginGrant, SyncError> {
        let user = self.client.login(username, password).await?;
        Ok(LoginGrant::from(user))
    }

    async fn current_time_entry(&self) -> Result<Option<RawTimeEntry>, SyncError> {
        Ok(self.client.current_time_entry().await?)
    }

    async fn time_entries(&self) -> Result<Vec<RawTimeEntry>, SyncError> {
        Ok(self.client.time_entries().await?)
    }

    async fn projects(&self, wid: WorkspaceId) -> Result<Vec<Project>, SyncError> {
        Ok(self.client.projects(wid).await?)
    }
}
