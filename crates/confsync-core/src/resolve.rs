//! Existence resolution for pages.
//!
//! Every reconciliation call starts by resolving the actual remote state
//! of the addressed page. The resolver never errors: a lookup that cannot
//! be completed degrades to [`Existence::Unreachable`], and each call
//! site decides whether collapsing that into "absent" is safe for its
//! branch (create instead of update, no-op instead of delete).

use confsync_client::{ClientError, ContentClient, Page};
use tracing::{debug, warn};

use crate::request::PageRef;

/// Result of a lookup by (space key, title).
#[derive(Debug)]
pub enum Existence {
    /// The page exists; carries its remote representation.
    Found(Page),
    /// The remote confirmed the page does not exist.
    Absent,
    /// The remote could not be consulted; carries the lookup error.
    Unreachable(ClientError),
}

impl Existence {
    /// True only when the remote confirmed the page exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Collapse `Unreachable` into "not found".
    ///
    /// Safe only where the caller has a conservative fallback for a page
    /// it cannot confirm.
    #[must_use]
    pub fn into_found(self) -> Option<Page> {
        match self {
            Self::Found(page) => Some(page),
            Self::Absent | Self::Unreachable(_) => None,
        }
    }
}

/// Look up a page by its natural key.
pub fn lookup(client: &dyn ContentClient, page: &PageRef) -> Existence {
    match client.lookup_by_title(&page.space_key, &page.title) {
        Ok(Some(found)) => {
            debug!(
                "Resolved page '{}' in space {} to id {}",
                page.title, page.space_key, found.id
            );
            Existence::Found(found)
        }
        Ok(None) => Existence::Absent,
        Err(err) => {
            warn!(
                "Lookup of page '{}' in space {} failed: {}",
                page.title, page.space_key, err
            );
            Existence::Unreachable(err)
        }
    }
}

/// Resolve only the page id, collapsing an unreachable remote to `None`.
pub fn resolve_id(client: &dyn ContentClient, page: &PageRef) -> Option<String> {
    lookup(client, page).into_found().map(|p| p.id)
}

#[cfg(test)]
mod tests {
    use confsync_client::{MockContentClient, MockOp};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_lookup_found() {
        let client = MockContentClient::new().with_page("DOC", "Spec", "<p>v1</p>");

        let existence = lookup(&client, &PageRef::new("DOC", "Spec"));

        assert!(existence.exists());
        let page = existence.into_found().unwrap();
        assert_eq!(page.title, "Spec");
    }

    #[test]
    fn test_lookup_absent() {
        let client = MockContentClient::new();

        let existence = lookup(&client, &PageRef::new("DOC", "Missing"));

        assert!(!existence.exists());
        assert!(matches!(existence, Existence::Absent));
    }

    #[test]
    fn test_lookup_failure_is_unreachable_not_absent() {
        let client = MockContentClient::new()
            .with_page("DOC", "Spec", "")
            .failing(MockOp::Lookup);

        let existence = lookup(&client, &PageRef::new("DOC", "Spec"));

        assert!(matches!(existence, Existence::Unreachable(_)));
        assert!(!existence.exists());
    }

    #[test]
    fn test_into_found_collapses_unreachable() {
        let client = MockContentClient::new().failing(MockOp::Lookup);

        let found = lookup(&client, &PageRef::new("DOC", "Spec")).into_found();

        assert!(found.is_none());
    }

    #[test]
    fn test_resolve_id() {
        let client = MockContentClient::new().with_page("DOC", "Spec", "");

        let id = resolve_id(&client, &PageRef::new("DOC", "Spec"));

        assert!(id.is_some());
        assert_eq!(resolve_id(&client, &PageRef::new("DOC", "Other")), None);
    }
}
