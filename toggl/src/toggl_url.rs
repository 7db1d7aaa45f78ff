/// Public v8 endpoint of the time-tracking service.
pub const DEFAULT_API_URL: &str = "https://api.track.toggl.com/api/v8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TogglURL(String);

impl AsRef<str> for TogglURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Default for TogglURL {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl TogglURL {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self(base_url.trim_end_matches('/').to_string())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }
}
