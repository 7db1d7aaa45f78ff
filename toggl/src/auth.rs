use std::fmt;

/// Password used in place of a real one when authenticating with an API token.
const API_TOKEN_PASSWORD: &str = "api_token";

/// HTTP basic auth material accepted by the API.
///
/// The login exchange uses the account's username and password; every other
/// call uses the `api_token` returned by that exchange.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Password { username: String, password: String },
    ApiToken(String),
}

impl Credentials {
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Password {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn api_token(token: impl Into<String>) -> Self {
        Self::ApiToken(token.into())
    }

    /// The `(user, password)` pair sent as basic auth.
    pub fn basic_auth(&self) -> (&str, &str) {
        match self {
            Self::Password { username, password } => (username, password),
            Self::ApiToken(token) => (token, API_TOKEN_PASSWORD),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::ApiToken(_) => f.debug_tuple("ApiToken").field(&"***").finish(),
        }
    }
}
