use serde::{Deserialize, Serialize};

use super::ProjectId;

/// A project in a workspace.
///
/// `hex_color` falls back to an empty string when the API omits it, which is
/// also the color used for entries without a known project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub hex_color: String,
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>, hex_color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hex_color: hex_color.into(),
        }
    }
}
