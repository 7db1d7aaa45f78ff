use serde::Deserialize;
use serde_json::{Map, Value};

use super::WorkspaceId;

/// The authenticated account, as returned by `GET /me`.
#[derive(Clone, Deserialize)]
pub struct User {
    pub api_token: String,
    pub default_wid: WorkspaceId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("api_token", &"***")
            .field("default_wid", &self.default_wid)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
