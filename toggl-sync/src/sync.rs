use serde::Serialize;
use tracing::instrument;

use crate::api::TimeTrackingApi;
use crate::error::SyncError;
use crate::hydrate::hydrate;
use crate::types::{CurrentTimer, Project, TimeEntry, WorkspaceId};

/// Everything the app section shows, fetched and hydrated in one go.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub current_timer: CurrentTimer,
    pub entries: Vec<TimeEntry>,
    pub projects: Vec<Project>,
}

/// Fetch the running entry, all entries and the workspace's projects
/// concurrently and join them into a [`Snapshot`].
///
/// All three requests run to completion even when one of them fails; the
/// combined result is then either a full snapshot or the first error in
/// request order. Nothing is retried.
#[instrument(name = "sync", skip(api))]
pub async fn fetch_snapshot(
    api: &dyn TimeTrackingApi,
    workspace_id: Option<WorkspaceId>,
) -> Result<Snapshot, SyncError> {
    let wid = workspace_id.ok_or(SyncError::MissingWorkspace)?;

    let (current, entries, projects) = tokio::join!(
        api.current_time_entry(),
        api.time_entries(),
        api.projects(wid)
    );
    let (current, entries, projects) = (current?, entries?, projects?);

    let fetched = entries.len();
    let entries = hydrate(entries.into_iter().map(TimeEntry::from).collect(), &projects);
    tracing::info!(
        fetched,
        finished = entries.len(),
        projects = projects.len(),
        running = current.is_some(),
        "Synced working set"
    );

    Ok(Snapshot {
        current_timer: CurrentTimer::from(current),
        entries,
        projects,
    })
}
