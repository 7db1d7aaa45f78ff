use std::collections::HashMap;

use crate::types::{Project, ProjectId, TimeEntry, UNKNOWN_PROJECT_COLOR, UNKNOWN_PROJECT_NAME};

/// Turn the server's entry list into the list shown to the user.
///
/// Entries are ordered newest first by `start` (stable, so equal starts keep
/// their source order), running entries are dropped, and each remaining entry
/// gets a copy of its project's name and color. Entries without a project, or
/// whose project is not in `projects`, get the "Unknown Project" placeholder.
pub fn hydrate(mut entries: Vec<TimeEntry>, projects: &[Project]) -> Vec<TimeEntry> {
    // First project wins if the server ever repeats an id.
    let mut by_id: HashMap<ProjectId, &Project> = HashMap::with_capacity(projects.len());
    for project in projects {
        by_id.entry(project.id).or_insert(project);
    }

    entries.sort_by(|a, b| b.raw.start.cmp(&a.raw.start));

    entries
        .into_iter()
        .filter(|entry| entry.raw.stop.is_some())
        .map(|entry| {
            let (name, color) = match entry.raw.pid.and_then(|pid| by_id.get(&pid)) {
                Some(project) => (project.name.as_str(), project.hex_color.as_str()),
                None => (UNKNOWN_PROJECT_NAME, UNKNOWN_PROJECT_COLOR),
            };
            entry.with_project_details(name, color)
        })
        .collect()
}
