use serde::Serialize;
use std::sync::Arc;

use crate::api::TimeTrackingApi;
use crate::error::SyncError;
use crate::session::{Session, SessionController};
use crate::session_store::KeyValueStore;
use crate::sync::fetch_snapshot;
use crate::types::{CurrentTimer, Project, TimeEntry};

mod state;
pub use state::{InputField, LoginForm, ViewSection, ViewState};

/// Read-only view of the app for renderers.
///
/// `current_timer` is `None` while nothing has been synced, which is distinct
/// from `Some(CurrentTimer::Idle)` ("synced, no timer running").
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel<'a> {
    pub section: ViewSection,
    pub entries: &'a [TimeEntry],
    pub current_timer: Option<&'a CurrentTimer>,
    pub projects: &'a [Project],
    pub auth_error: bool,
}

/// Drives the login → loading → app flow.
///
/// Callers must not start a second login or sync while one is in flight;
/// `&mut self` on the async methods makes that the natural shape.
pub struct App {
    session: SessionController,
    api: Arc<dyn TimeTrackingApi>,
    view: ViewState,
    form: LoginForm,
}

impl App {
    pub fn new(api: Arc<dyn TimeTrackingApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            session: SessionController::new(api.clone(), store),
            api,
            view: ViewState::default(),
            form: LoginForm::default(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn session(&self) -> &Session {
        self.session.session()
    }

    pub fn view_model(&self) -> ViewModel<'_> {
        let snapshot = self.view.snapshot();
        ViewModel {
            section: self.view.section(),
            entries: snapshot.map(|s| s.entries.as_slice()).unwrap_or_default(),
            current_timer: snapshot.map(|s| &s.current_timer),
            projects: snapshot.map(|s| s.projects.as_slice()).unwrap_or_default(),
            auth_error: matches!(self.view, ViewState::Login { auth_error: true }),
        }
    }

    /// Process start: restore the stored session and, if the previous run
    /// ended in the app section, resync instead of trusting old data.
    pub async fn start(&mut self) -> Result<(), SyncError> {
        let authenticated = self.session.restore_session().is_authenticated();

        match self.session.persisted_section() {
            Some(ViewSection::App) if authenticated => {
                self.view = ViewState::Loading;
                self.sync().await
            }
            Some(ViewSection::App) => {
                tracing::info!("Stored section is app but no token is stored; showing login");
                self.view = ViewState::default();
                Ok(())
            }
            _ => {
                self.view = ViewState::default();
                Ok(())
            }
        }
    }

    /// Log in and sync.
    ///
    /// A failed login (bad credentials or any request error) returns to the
    /// login section with the error flag set and the form untouched. After a
    /// successful login the form is cleared; if the following sync fails the
    /// view stays in `Loading` and the error is returned so the caller can
    /// retry with [`App::sync`].
    pub async fn on_login(&mut self, username: &str, password: &str) -> Result<(), SyncError> {
        self.view = ViewState::Loading;

        if let Err(e) = self.session.login(username, password).await {
            tracing::warn!("Login failed: {}", e);
            self.view = ViewState::Login { auth_error: true };
            return Err(e);
        }

        self.form.clear();
        self.sync().await
    }

    /// Log in with whatever is currently in the form.
    pub async fn submit_login(&mut self) -> Result<(), SyncError> {
        let LoginForm { username, password } = self.form.clone();
        self.on_login(&username, &password).await
    }

    pub fn on_input_change(&mut self, field: InputField, value: impl Into<String>) {
        self.form.set(field, value.into());
    }

    /// Put a just-finished entry at the top of the list without a resync.
    ///
    /// The entry is taken as is: no sorting, hydration or duplicate check.
    /// Returns `false` (and drops the entry) outside the app section, where
    /// there is no list to add to.
    pub fn on_save_entry(&mut self, entry: TimeEntry) -> bool {
        match &mut self.view {
            ViewState::App(snapshot) => {
                snapshot.entries.insert(0, entry);
                true
            }
            _ => {
                tracing::warn!(
                    "Ignoring entry {} saved outside the app section",
                    entry.raw.id
                );
                false
            }
        }
    }

    /// Fetch a fresh snapshot and switch to the app section.
    ///
    /// On failure nothing changes: the current view, including any earlier
    /// snapshot, is left exactly as it was.
    pub async fn sync(&mut self) -> Result<(), SyncError> {
        let workspace_id = self.session.session().workspace_id;
        let snapshot = match fetch_snapshot(self.api.as_ref(), workspace_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Sync failed: {}", e);
                return Err(e);
            }
        };

        self.view = ViewState::App(Box::new(snapshot));
        if let Err(e) = self.session.remember_section(ViewSection::App) {
            tracing::warn!("Failed to remember section: {}", e);
        }
        Ok(())
    }
}
