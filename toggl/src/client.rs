use std::sync::{PoisonError, RwLock};

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    domain::{DataResponse, Project, TimeEntry, User, WorkspaceId},
    Credentials, TogglURL,
};

/// HTTP client for the time-tracking API.
///
/// The client is created once and shared; the API token is installed with
/// [`TogglClient::set_token`] after login or when a stored session is restored.
pub struct TogglClient {
    http: Client,
    base_url: TogglURL,
    credentials: RwLock<Option<Credentials>>,
}

impl TogglClient {
    pub fn new(base_url: &str) -> Result<Self, TogglFetchError> {
        let http = Client::builder()
            .user_agent(concat!("toggl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TogglFetchError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: TogglURL::new(base_url),
            credentials: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_ref()
    }

    /// Use `token` for every authenticated call from now on.
    pub fn set_token(&self, token: &str) {
        let mut credentials = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *credentials = Some(Credentials::api_token(token));
    }

    pub fn has_token(&self) -> bool {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn token_credentials(&self) -> Result<Credentials, TogglFetchError> {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(TogglFetchError::MissingToken)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, TogglFetchError> {
        let resp = request
            .send()
            .await
            .map_err(|e| TogglFetchError::ResponseError(format!("{}: {}", call_name, e)))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TogglFetchError::Unauthorized);
        }
        if !status.is_success() {
            return Err(TogglFetchError::ResponseError(format!(
                "{} returned {}",
                call_name, status
            )));
        }

        resp.json::<T>().await.map_err(|e| {
            TogglFetchError::ParsingError(format!("Failed to parse {} response: {}", call_name, e))
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, TogglFetchError> {
        let credentials = self.token_credentials()?;
        let (user, password) = credentials.basic_auth();
        let url = self.base_url.append_path(path);

        tracing::debug!("GET {}", path);
        self.send(
            self.http.get(url.as_ref()).basic_auth(user, Some(password)),
            &format!("GET {}", path),
        )
        .await
    }

    /// Exchange username and password for the account's API token.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, TogglFetchError> {
        let credentials = Credentials::password(username, password);
        let (user, password) = credentials.basic_auth();
        let url = self.base_url.append_path("/me");

        let response: DataResponse<User> = self
            .send(
                self.http.get(url.as_ref()).basic_auth(user, Some(password)),
                "GET /me",
            )
            .await?;

        response
            .data
            .ok_or_else(|| TogglFetchError::ParsingError("GET /me returned no user".to_string()))
    }

    /// The running entry, or `None` when no timer is active.
    pub async fn current_time_entry(&self) -> Result<Option<TimeEntry>, TogglFetchError> {
        let response: DataResponse<TimeEntry> = self.fetch("/time_entries/current").await?;
        Ok(response.data)
    }

    pub async fn time_entries(&self) -> Result<Vec<TimeEntry>, TogglFetchError> {
        self.fetch("/time_entries").await
    }

    /// All projects of a workspace. The API answers `null` for a workspace
    /// without projects.
    pub async fn projects(&self, wid: WorkspaceId) -> Result<Vec<Project>, TogglFetchError> {
        let projects: Option<Vec<Project>> =
            self.fetch(&format!("/workspaces/{}/projects", wid)).await?;
        Ok(projects.unwrap_or_default())
    }
}

impl std::fmt::Debug for TogglClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TogglClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.has_token())
            .finish()
    }
}

#[derive(Error, Debug)]
pub enum TogglFetchError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("No API token configured")]
    MissingToken,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("Other: {0}")]
    Other(String),
}
