use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use time::{Duration, OffsetDateTime};

use super::TimeTrackingApi;
use crate::error::SyncError;
use crate::types::{LoginGrant, Project, RawTimeEntry, WorkspaceId};

pub const DEV_USERNAME: &str = "dev";
pub const DEV_PASSWORD: &str = "dev";

const DEV_TOKEN: &str = "dev-token";
const DEV_WORKSPACE: WorkspaceId = 1;

/// In-memory stand-in for the API with a fixed account and seeded data.
#[derive(Debug)]
pub struct DevBackend {
    token: Mutex<Option<String>>,
    entries: Vec<RawTimeEntry>,
    current: Option<RawTimeEntry>,
}

impl Default for DevBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DevBackend {
    pub fn new() -> Self {
        let entries = seed_dev_entries(OffsetDateTime::now_utc());
        let current = entries.iter().find(|entry| entry.is_running()).cloned();

        Self {
            token: Mutex::new(None),
            entries,
            current,
        }
    }

    fn authorize(&self) -> Result<(), SyncError> {
        let token = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        match token.as_deref() {
            Some(DEV_TOKEN) => Ok(()),
            _ => Err(SyncError::Authentication),
        }
    }
}

#[async_trait]
impl TimeTrackingApi for DevBackend {
    fn set_token(&self, token: &str) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginGrant, SyncError> {
        if username == DEV_USERNAME && password == DEV_PASSWORD {
            Ok(LoginGrant {
                api_token: DEV_TOKEN.to_string(),
                default_wid: DEV_WORKSPACE,
            })
        } else {
            Err(SyncError::Authentication)
        }
    }

    async fn current_time_entry(&self) -> Result<Option<RawTimeEntry>, SyncError> {
        self.authorize()?;
        Ok(self.current.clone())
    }

    async fn time_entries(&self) -> Result<Vec<RawTimeEntry>, SyncError> {
        self.authorize()?;
        Ok(self.entries.clone())
    }

    async fn projects(&self, wid: WorkspaceId) -> Result<Vec<Project>, SyncError> {
        self.authorize()?;
        if wid != DEV_WORKSPACE {
            return Err(SyncError::Transport(format!(
                "GET /workspaces/{}/projects returned 403 Forbidden",
                wid
            )));
        }
        Ok(vec![
            Project::new(101, "Time Entry Sync", "#06aaf5"),
            Project::new(102, "Workspace Reports", "#c56bff"),
            Project::new(103, "Command Line Client", "#ea468d"),
        ])
    }
}

/// Entries from the last two days, deliberately out of order. The running
/// entry also shows up in the list, as it does on the server.
fn seed_dev_entries(now: OffsetDateTime) -> Vec<RawTimeEntry> {
    let entry = |id: u64, hours_ago: i64, length_minutes: i64, pid: Option<u64>, note: &str| {
        let start = now - Duration::hours(hours_ago);
        let entry = RawTimeEntry::new(id, start)
            .with_stop(start + Duration::minutes(length_minutes))
            .with_description(note);
        match pid {
            Some(pid) => entry.with_project(pid),
            None => entry,
        }
    };

    vec![
        entry(1, 30, 120, Some(101), "Pagination for entry list"),
        entry(4, 6, 90, Some(103), "Flag parsing"),
        entry(2, 27, 60, Some(101), "Review token refresh patch"),
        entry(3, 9, 120, Some(102), "Weekly summary query"),
        entry(5, 4, 45, None, "Email"),
        entry(6, 3, 30, Some(404), "Old client cleanup"),
        RawTimeEntry::new(7, now - Duration::minutes(25))
            .with_project(101)
            .with_description("Hydrator edge cases"),
    ]
}
