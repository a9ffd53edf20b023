//! List-shaped REST responses.

use serde::{Deserialize, Serialize};

use super::Page;

/// Paged content listing, as returned by lookup, child listing and search.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentResults {
    /// Matching content entries.
    #[serde(default)]
    pub results: Vec<Page>,
    /// Number of entries in this response.
    #[serde(default)]
    pub size: u32,
}

/// Label attached to a page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Label {
    /// Label namespace prefix ("global" for regular labels).
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Label name.
    pub name: String,
}

fn default_prefix() -> String {
    "global".to_owned()
}

/// Label listing for a page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LabelsResponse {
    /// Labels on the page.
    #[serde(default)]
    pub results: Vec<Label>,
    /// Number of labels in this response.
    #[serde(default)]
    pub size: u32,
}
