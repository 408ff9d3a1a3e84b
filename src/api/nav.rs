use serde::{Deserialize, Serialize};

use crate::display::TerminalDisplay;

/// One sidebar entry the current role may navigate to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub icon: String,
    pub label: String,
    pub href: String,
}

impl TerminalDisplay for NavItem {
    fn titles() -> Vec<&'static str> {
        vec!["Icon", "Label", "Href"]
    }

    fn row(self) -> Vec<String> {
        vec![self.icon, self.label, self.href]
    }
}

/// One flattened route registry entry, as exposed by the routes endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteInfo {
    pub path: String,
    pub pattern: String,
    pub label: String,
    pub view: String,
}

impl TerminalDisplay for RouteInfo {
    fn titles() -> Vec<&'static str> {
        vec!["Path", "Label", "View", "Pattern"]
    }

    fn row(self) -> Vec<String> {
        vec![self.path, self.label, self.view, self.pattern]
    }
}

/// The page a pathname resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub path: String,
    pub label: String,
    pub view: String,
}

/// Result of dispatching a pathname: either a page to render, or the
/// default path the caller should redirect to.
#[derive(Debug, Serialize, Deserialize)]
pub struct PageResolution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}
