use serde::Serialize;
use strum::{Display, EnumString};

use crate::sync::Snapshot;

/// Which part of the UI is shown. Persisted so a restart can resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ViewSection {
    Login,
    Loading,
    App,
}

/// Current view and the data that belongs to it.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Login { auth_error: bool },
    Loading,
    App(Box<Snapshot>),
}

impl Default for ViewState {
    fn default() -> Self {
        Self::Login { auth_error: false }
    }
}

impl ViewState {
    pub fn section(&self) -> ViewSection {
        match self {
            Self::Login { .. } => ViewSection::Login,
            Self::Loading => ViewSection::Loading,
            Self::App(_) => ViewSection::App,
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Self::App(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Login form field names as sent by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum InputField {
    #[strum(serialize = "inputUser", serialize = "username")]
    Username,
    #[strum(serialize = "inputPass", serialize = "password")]
    Password,
}

/// Values typed into the login form. Cleared only by a successful login.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn set(&mut self, field: InputField, value: String) {
        match field {
            InputField::Username => self.username = value,
            InputField::Password => self.password = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
