//! Confluence page types.

use serde::{Deserialize, Serialize};

/// Confluence page.
///
/// Search results and unexpanded lookups omit most sub-resources, so
/// everything beyond `id` and `title` is optional.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Content type (always "page").
    #[serde(rename = "type", default = "default_content_type")]
    pub content_type: String,
    /// Page title.
    pub title: String,
    /// Containing space.
    #[serde(default)]
    pub space: Option<Space>,
    /// Version information.
    #[serde(default)]
    pub version: Option<Version>,
    /// Page body content.
    #[serde(default)]
    pub body: Option<Body>,
    /// Hypermedia links.
    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

fn default_content_type() -> String {
    "page".to_owned()
}

impl Page {
    /// Body text in the page's storage representation, if expanded.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.storage.as_ref())
            .map(|s| s.value.as_str())
    }

    /// Current version number; 0 when the version was not expanded.
    #[must_use]
    pub fn version_number(&self) -> u32 {
        self.version.as_ref().map_or(0, |v| v.number)
    }

    /// Key of the containing space, if expanded.
    #[must_use]
    pub fn space_key(&self) -> Option<&str> {
        self.space.as_ref().map(|s| s.key.as_str())
    }
}

/// Space reference.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Space {
    /// Space key.
    pub key: String,
}

/// Page version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
    /// Version message/comment.
    #[serde(default)]
    pub message: Option<String>,
}

/// Page body content.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Body {
    /// Storage format content.
    #[serde(default)]
    pub storage: Option<Storage>,
}

/// Storage format representation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Storage {
    /// Content in the declared representation.
    pub value: String,
    /// Content representation ("storage" or "wiki").
    pub representation: String,
}

/// Hypermedia links.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Links {
    /// Web UI link.
    #[serde(default)]
    pub webui: Option<String>,
    /// API self link.
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_expanded_page() {
        let json = r#"{
            "id": "123456",
            "type": "page",
            "title": "Release notes",
            "space": {"key": "DOC"},
            "version": {"number": 7},
            "body": {"storage": {"value": "<p>hello</p>", "representation": "storage"}},
            "_links": {"webui": "/display/DOC/Release+notes"}
        }"#;

        let page: Page = serde_json::from_str(json).unwrap();

        assert_eq!(page.id, "123456");
        assert_eq!(page.title, "Release notes");
        assert_eq!(page.space_key(), Some("DOC"));
        assert_eq!(page.version_number(), 7);
        assert_eq!(page.body_text(), Some("<p>hello</p>"));
    }

    #[test]
    fn test_deserialize_bare_search_result() {
        let json = r#"{"id": "42", "title": "Hit"}"#;

        let page: Page = serde_json::from_str(json).unwrap();

        assert_eq!(page.content_type, "page");
        assert_eq!(page.version_number(), 0);
        assert!(page.body_text().is_none());
        assert!(page.space_key().is_none());
    }
}
