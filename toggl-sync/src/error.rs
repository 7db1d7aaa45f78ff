use thiserror::Error;
use toggl::TogglFetchError;

/// Errors surfaced by login and sync.
///
/// None of these are fatal: a failed login returns the view to the login
/// section and a failed sync leaves the previous state in place.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("invalid credentials")]
    Authentication,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    DataShape(String),
    #[error("no workspace id stored; log in again")]
    MissingWorkspace,
    #[error("session storage failed: {0}")]
    Storage(String),
}

impl SyncError {
    pub fn storage(err: anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}"))
    }
}

impl From<TogglFetchError> for SyncError {
    fn from(err: TogglFetchError) -> Self {
        match err {
            TogglFetchError::Unauthorized => Self::Authentication,
            TogglFetchError::ParsingError(msg) => Self::DataShape(msg),
            TogglFetchError::MissingToken => {
                Self::Transport(TogglFetchError::MissingToken.to_string())
            }
            TogglFetchError::ResponseError(msg) | TogglFetchError::Other(msg) => {
                Self::Transport(msg)
            }
        }
    }
}
