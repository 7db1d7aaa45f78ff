use std::fmt::Write;

use time::UtcOffset;

use crate::app::{ViewModel, ViewSection};
use crate::time_utils::{format_date_time, format_duration, format_time};
use crate::types::{CurrentTimer, Project, TimeEntry};

/// Plain-text rendering of the view model, one section at a time.
pub fn render(model: &ViewModel<'_>, offset: UtcOffset) -> String {
    let mut out = String::new();
    match model.section {
        ViewSection::Login => {
            out.push_str("Not logged in. Run `toggl-sync login`.\n");
            if model.auth_error {
                out.push_str("Login failed: check your username and password.\n");
            }
        }
        ViewSection::Loading => out.push_str("Loading...\n"),
        ViewSection::App => {
            if let Some(timer) = model.current_timer {
                render_timer(&mut out, timer, model.projects, offset);
            }
            if model.entries.is_empty() {
                out.push_str("No finished entries.\n");
            }
            for entry in model.entries {
                render_entry(&mut out, entry, offset);
            }
        }
    }
    out
}

fn render_timer(out: &mut String, timer: &CurrentTimer, projects: &[Project], offset: UtcOffset) {
    let Some(entry) = timer.entry() else {
        out.push_str("No timer running.\n\n");
        return;
    };

    let project = entry
        .pid
        .and_then(|pid| projects.iter().find(|p| p.id == pid))
        .map_or("no project", |p| p.name.as_str());
    let _ = writeln!(
        out,
        "Running since {}: {} ({})\n",
        format_time(entry.start, offset),
        entry.description.as_deref().unwrap_or("(no description)"),
        project
    );
}

fn render_entry(out: &mut String, entry: &TimeEntry, offset: UtcOffset) {
    let duration = entry
        .raw
        .stop
        .map(|stop| format_duration(stop - entry.raw.start))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "{}  {:>6}  {:<24}  {}",
        format_date_time(entry.raw.start, offset),
        duration,
        entry.project_name.as_deref().unwrap_or_default(),
        entry.raw.description.as_deref().unwrap_or_default()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawTimeEntry;
    use time::macros::datetime;

    fn model<'a>(
        section: ViewSection,
        entries: &'a [TimeEntry],
        current_timer: Option<&'a CurrentTimer>,
        projects: &'a [Project],
    ) -> ViewModel<'a> {
        ViewModel {
            section,
            entries,
            current_timer,
            projects,
            auth_error: false,
        }
    }

    #[test]
    fn login_shows_error_flag() {
        let mut view = model(ViewSection::Login, &[], None, &[]);
        assert!(!render(&view, UtcOffset::UTC).contains("Login failed"));

        view.auth_error = true;
        assert!(render(&view, UtcOffset::UTC).contains("Login failed"));
    }

    #[test]
    fn app_lists_entries_and_timer() {
        let projects = vec![Project::new(5, "Acme", "#fff")];
        let entries = vec![TimeEntry::from(
            RawTimeEntry::new(1, datetime!(2024-01-02 10:00 UTC))
                .with_stop(datetime!(2024-01-02 11:30 UTC))
                .with_description("Planning"),
        )
        .with_project_details("Acme", "#fff")];
        let timer = CurrentTimer::from(Some(
            RawTimeEntry::new(2, datetime!(2024-01-03 9:15 UTC))
                .with_project(5)
                .with_description("Support"),
        ));

        let text = render(
            &model(ViewSection::App, &entries, Some(&timer), &projects),
            UtcOffset::UTC,
        );

        assert!(text.contains("Running since 09:15: Support (Acme)"));
        assert!(text.contains("2024-01-02 10:00"));
        assert!(text.contains("1:30"));
        assert!(text.contains("Planning"));
    }

    #[test]
    fn idle_timer_and_empty_list() {
        let timer = CurrentTimer::Idle;
        let text = render(
            &model(ViewSection::App, &[], Some(&timer), &[]),
            UtcOffset::UTC,
        );

        assert!(text.contains("No timer running."));
        assert!(text.contains("No finished entries."));
    }
}
