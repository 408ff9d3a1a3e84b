use serde::{Deserialize, Serialize};

use crate::display::TerminalDisplay;

/// Profile of an authenticated principal, as exposed by the whoami endpoint
/// and carried inside the persisted login state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub role: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub profile: String,
}

impl TerminalDisplay for UserData {
    fn titles() -> Vec<&'static str> {
        vec!["Id", "Name", "Role", "Email"]
    }

    fn row(self) -> Vec<String> {
        vec![self.id.to_string(), self.name, self.role, self.email]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub expire_after: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WhoamiResponse {
    pub user: UserData,
}

/// Answer of the cani endpoint: may the current role view a page or use
/// a feature.
#[derive(Debug, Serialize, Deserialize)]
pub struct AllowResponse {
    pub allow: bool,
}
