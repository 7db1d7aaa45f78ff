//! Scripted API and store doubles for tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::TimeTrackingApi;
use crate::error::SyncError;
use crate::session_store::{KeyValueStore, MemoryStore, StoreKey};
use crate::types::{LoginGrant, Project, RawTimeEntry, WorkspaceId};

/// Ordered record of calls made against the doubles.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn position(&self, call: &str) -> Option<usize> {
        self.calls().iter().position(|c| c == call)
    }

    pub fn contains(&self, call: &str) -> bool {
        self.position(call).is_some()
    }
}

/// Endpoint selector for injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Current,
    Entries,
    Projects,
}

/// API double returning canned data.
///
/// `login` succeeds only when a grant is configured. Reads fail with a
/// transport error for the endpoints listed in `failing`.
#[derive(Debug, Default)]
pub struct MockApi {
    pub grant: Option<LoginGrant>,
    pub current: Option<RawTimeEntry>,
    pub entries: Vec<RawTimeEntry>,
    pub projects: Vec<Project>,
    pub failing: Vec<Endpoint>,
    pub log: CallLog,
    pub(crate) token: Mutex<Option<String>>,
}

impl MockApi {
    pub fn accepting(token: &str, wid: WorkspaceId) -> Self {
        Self {
            grant: Some(LoginGrant {
                api_token: token.to_string(),
                default_wid: wid,
            }),
            ..Self::default()
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn read(&self, endpoint: Endpoint, call: String) -> Result<(), SyncError> {
        self.log.push(call);
        if self.failing.contains(&endpoint) {
            return Err(SyncError::Transport(format!("{endpoint:?} unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl TimeTrackingApi for MockApi {
    fn set_token(&self, token: &str) {
        self.log.push(format!("set_token:{token}"));
        *self.token.lock().unwrap() = Some(token.to_string());
    }

    async fn login(&self, username: &str, _password: &str) -> Result<LoginGrant, SyncError> {
        self.log.push(format!("login:{username}"));
        self.grant.clone().ok_or(SyncError::Authentication)
    }

    async fn current_time_entry(&self) -> Result<Option<RawTimeEntry>, SyncError> {
        self.read(Endpoint::Current, "current".into())?;
        Ok(self.current.clone())
    }

    async fn time_entries(&self) -> Result<Vec<RawTimeEntry>, SyncError> {
        self.read(Endpoint::Entries, "entries".into())?;
        Ok(self.entries.clone())
    }

    async fn projects(&self, wid: WorkspaceId) -> Result<Vec<Project>, SyncError> {
        self.read(Endpoint::Projects, format!("projects:{wid}"))?;
        Ok(self.projects.clone())
    }
}

/// Memory store that records writes into a shared [`CallLog`].
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    pub log: CallLog,
}

impl RecordingStore {
    pub fn with_log(log: CallLog) -> Self {
        Self {
            inner: MemoryStore::new(),
            log,
        }
    }

    pub fn value(&self, key: StoreKey) -> Option<String> {
        self.inner.get(key).unwrap()
    }
}

impl KeyValueStore for RecordingStore {
    fn get(&self, key: StoreKey) -> anyhow::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: StoreKey, value: &str) -> anyhow::Result<()> {
        self.log.push(format!("store:{key}={value}"));
        self.inner.set(key, value)
    }

    fn remove(&self, key: StoreKey) -> anyhow::Result<()> {
        self.log.push(format!("store:remove {key}"));
        self.inner.remove(key)
    }
}

/// Memory store whose writes to one key fail.
#[derive(Debug)]
pub struct FailingStore {
    pub inner: MemoryStore,
    pub failing: StoreKey,
}

impl FailingStore {
    pub fn failing_on(failing: StoreKey) -> Self {
        Self {
            inner: MemoryStore::new(),
            failing,
        }
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: StoreKey) -> anyhow::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: StoreKey, value: &str) -> anyhow::Result<()> {
        if key == self.failing {
            anyhow::bail!("disk full while writing {key}");
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: StoreKey) -> anyhow::Result<()> {
        self.inner.remove(key)
    }
}

/// Store whose writes always fail.
#[derive(Debug, Default)]
pub struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: StoreKey) -> anyhow::Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, key: StoreKey, _value: &str) -> anyhow::Result<()> {
        anyhow::bail!("read-only filesystem while writing {key}")
    }

    fn remove(&self, key: StoreKey) -> anyhow::Result<()> {
        anyhow::bail!("read-only filesystem while removing {key}")
    }
}
