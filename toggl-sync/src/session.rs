use std::str::FromStr;
use std::sync::Arc;

use tracing::instrument;

use crate::api::TimeTrackingApi;
use crate::app::ViewSection;
use crate::error::SyncError;
use crate::session_store::{KeyValueStore, StoreKey};
use crate::types::WorkspaceId;

/// Persisted identity. Both fields are `None` until a login succeeds or a
/// stored session is restored.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub workspace_id: Option<WorkspaceId>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("workspace_id", &self.workspace_id)
            .finish()
    }
}

/// Owns the session: restoring it at startup, exchanging credentials and
/// keeping the API client's token in step with what is persisted.
pub struct SessionController {
    api: Arc<dyn TimeTrackingApi>,
    store: Arc<dyn KeyValueStore>,
    session: Session,
}

impl SessionController {
    pub fn new(api: Arc<dyn TimeTrackingApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            api,
            store,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Load the stored token and workspace and hand the token to the API
    /// client. The token is not checked against the server; an expired one
    /// shows up as an authentication error on the first sync.
    pub fn restore_session(&mut self) -> &Session {
        let token = self.read(StoreKey::Token);
        let workspace_id = self
            .read(StoreKey::Wid)
            .and_then(|wid| match wid.parse::<WorkspaceId>() {
                Ok(wid) => Some(wid),
                Err(_) => {
                    tracing::warn!("Ignoring stored workspace id {:?}", wid);
                    None
                }
            });

        if let Some(token) = &token {
            self.api.set_token(token);
        }

        self.session = Session {
            token,
            workspace_id,
        };
        tracing::debug!(session = ?self.session, "Restored session");
        &self.session
    }

    /// Exchange credentials for a token, persist token and workspace, and
    /// configure the API client with the new token.
    ///
    /// Nothing is persisted unless the exchange succeeds. If either write
    /// fails, the previously stored token and workspace are put back.
    #[instrument(name = "login", skip(self, password))]
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&Session, SyncError> {
        let grant = self.api.login(username, password).await?;

        let previous = [
            (StoreKey::Wid, self.read(StoreKey::Wid)),
            (StoreKey::Token, self.read(StoreKey::Token)),
        ];
        if let Err(e) = self.persist_grant(&grant.api_token, grant.default_wid) {
            self.restore_keys(&previous);
            return Err(SyncError::storage(e));
        }
        self.api.set_token(&grant.api_token);

        self.session = Session {
            token: Some(grant.api_token),
            workspace_id: Some(grant.default_wid),
        };
        tracing::info!(workspace_id = grant.default_wid, "Logged in");
        Ok(&self.session)
    }

    /// Section saved by the previous run, if it is one we recognise.
    pub fn persisted_section(&self) -> Option<ViewSection> {
        let raw = self.read(StoreKey::Section)?;
        match ViewSection::from_str(&raw) {
            Ok(section) => Some(section),
            Err(_) => {
                tracing::warn!("Ignoring stored section {:?}", raw);
                None
            }
        }
    }

    pub fn remember_section(&self, section: ViewSection) -> Result<(), SyncError> {
        self.store
            .set(StoreKey::Section, &section.to_string())
            .map_err(SyncError::storage)
    }

    fn persist_grant(&self, token: &str, workspace_id: WorkspaceId) -> anyhow::Result<()> {
        self.store.set(StoreKey::Wid, &workspace_id.to_string())?;
        self.store.set(StoreKey::Token, token)
    }

    fn restore_keys(&self, previous: &[(StoreKey, Option<String>)]) {
        for (key, value) in previous {
            let restored = match value {
                Some(value) => self.store.set(*key, value),
                None => self.store.remove(*key),
            };
            if let Err(e) = restored {
                tracing::warn!("Failed to restore {} in session store: {:#}", key, e);
            }
        }
    }

    /// Unreadable keys count as absent; a broken store means "not logged in".
    fn read(&self, key: StoreKey) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read {} from session store: {:#}", key, e);
                None
            }
        }
    }
}
