//! Typed reconciliation requests.

use std::collections::BTreeSet;

use confsync_client::QueryOptions;

/// Page address within a space.
///
/// (space key, title) is the natural key for all lookups; the remote
/// numeric id is resolved lazily per call and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    /// Key of the containing space.
    pub space_key: String,
    /// Page title.
    pub title: String,
}

impl PageRef {
    /// Create a page reference.
    pub fn new(space_key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            space_key: space_key.into(),
            title: title.into(),
        }
    }
}

/// Declared target state for one page.
#[derive(Debug, Clone)]
pub struct DesiredPage {
    /// The page being declared.
    pub page: PageRef,
    /// Desired body; `None` keeps the current body on update and creates
    /// an empty page otherwise.
    pub body: Option<String>,
    /// Desired parent page; resolved leniently (an unresolvable parent
    /// places the page at the space root).
    pub parent: Option<PageRef>,
    /// Whether an existing page may be rewritten.
    pub overwrite: bool,
    /// Labels to apply after a successful create or update.
    pub labels: BTreeSet<String>,
}

impl DesiredPage {
    /// Declare a page with no body, parent or labels.
    #[must_use]
    pub fn new(page: PageRef) -> Self {
        Self {
            page,
            body: None,
            parent: None,
            overwrite: false,
            labels: BTreeSet::new(),
        }
    }
}

/// Which end of the page body a splice targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Add after the existing content.
    Append,
    /// Add before the existing content.
    Prepend,
}

/// One reconciliation request; exactly one operation kind.
///
/// The closed enum makes unrecognized kinds unrepresentable in typed
/// callers; adapters translating kind strings use [`Request::parse_kind`]
/// and surface [`FailureKind::InvalidRequest`](crate::FailureKind) for
/// anything unknown.
#[derive(Debug, Clone)]
pub enum Request {
    /// Converge the page to the declared state, creating it if absent.
    Present(DesiredPage),
    /// Ensure the page does not exist.
    Absent {
        /// The page to remove.
        page: PageRef,
        /// Also delete child pages.
        recursive: bool,
    },
    /// Reposition one page as the last child of another.
    Move {
        /// Space containing both pages.
        space_key: String,
        /// Title of the page being moved.
        source_title: String,
        /// Title of the new parent.
        target_title: String,
    },
    /// Attach labels to an existing page.
    AddLabels {
        /// The page to label.
        page: PageRef,
        /// Labels to attach.
        labels: BTreeSet<String>,
    },
    /// Detach labels from an existing page.
    RemoveLabels {
        /// The page to unlabel.
        page: PageRef,
        /// Labels to detach.
        labels: BTreeSet<String>,
    },
    /// Append content to an existing page.
    Append {
        /// The page to augment.
        page: PageRef,
        /// Content to add.
        body: String,
        /// Optional re-parenting, resolved leniently.
        parent: Option<PageRef>,
    },
    /// Prepend content to an existing page.
    Prepend {
        /// The page to augment.
        page: PageRef,
        /// Content to add.
        body: String,
        /// Optional re-parenting, resolved leniently.
        parent: Option<PageRef>,
    },
    /// Read a page without mutating anything.
    Read {
        /// The page to fetch.
        page: PageRef,
    },
    /// Run a CQL query without mutating anything.
    Query {
        /// Query string, forwarded verbatim.
        cql: String,
        /// Paging options, forwarded verbatim.
        options: QueryOptions,
    },
}

/// Operation kind keywords accepted from external callers.
pub const KNOWN_KINDS: &[&str] = &[
    "present",
    "absent",
    "move",
    "add_labels",
    "remove_labels",
    "append_page",
    "prepend_page",
    "page",
    "cql",
];

impl Request {
    /// The operation kind keyword for this request.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Present(_) => "present",
            Self::Absent { .. } => "absent",
            Self::Move { .. } => "move",
            Self::AddLabels { .. } => "add_labels",
            Self::RemoveLabels { .. } => "remove_labels",
            Self::Append { .. } => "append_page",
            Self::Prepend { .. } => "prepend_page",
            Self::Read { .. } => "page",
            Self::Query { .. } => "cql",
        }
    }

    /// Validate an operation kind keyword, returning it canonicalized.
    ///
    /// Adapters mapping untyped kind strings call this first and turn
    /// `None` into an invalid-request outcome instead of silently
    /// no-opping.
    #[must_use]
    pub fn parse_kind(kind: &str) -> Option<&'static str> {
        KNOWN_KINDS.iter().find(|k| **k == kind).copied()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_kind_keywords_round_trip() {
        let requests = [
            Request::Present(DesiredPage::new(PageRef::new("DOC", "Spec"))),
            Request::Absent {
                page: PageRef::new("DOC", "Spec"),
                recursive: false,
            },
            Request::Read {
                page: PageRef::new("DOC", "Spec"),
            },
            Request::Query {
                cql: "type=page".to_owned(),
                options: QueryOptions::default(),
            },
        ];

        for request in &requests {
            assert_eq!(Request::parse_kind(request.kind()), Some(request.kind()));
        }
    }

    #[test]
    fn test_parse_kind_rejects_unknown() {
        assert_eq!(Request::parse_kind("upsert"), None);
        assert_eq!(Request::parse_kind(""), None);
        assert_eq!(Request::parse_kind("Present"), None);
    }
}
