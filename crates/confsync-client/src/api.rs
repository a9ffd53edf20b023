//! The remote content client trait.
//!
//! [`ContentClient`] is the seam between the reconciliation engine and the
//! wire. The engine only ever talks to `&dyn ContentClient`, so tests
//! inject `MockContentClient` and production code injects
//! [`HttpContentClient`](crate::HttpContentClient).

use std::collections::BTreeSet;

use crate::error::ClientError;
use crate::types::Page;

/// Options forwarded verbatim to the remote CQL search endpoint.
///
/// No local validation is performed; query grammar and escaping are the
/// remote service's concern.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Result offset.
    pub start: Option<u32>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Sub-resources to expand on each result.
    pub expand: Option<String>,
    /// Include content from archived spaces.
    pub include_archived: bool,
    /// Excerpt strategy for each result.
    pub excerpt: Option<String>,
}

/// Remote content operations against a hosted wiki service.
///
/// Every method maps to one remote round-trip (recursive delete and the
/// splice operations perform the extra reads they need internally) and
/// fails with a distinguishable [`ClientError`] when the remote rejects
/// the request or is unreachable. A clean "no such page" lookup answer is
/// `Ok(None)`, not an error, so callers can tell `not found` from
/// `cannot ask`.
pub trait ContentClient: Send + Sync {
    /// Look up a page by its natural key (space key, title).
    fn lookup_by_title(&self, space_key: &str, title: &str) -> Result<Option<Page>, ClientError>;

    /// Create a page, optionally under a parent.
    fn create(
        &self,
        space_key: &str,
        title: &str,
        body: &str,
        parent_id: Option<&str>,
    ) -> Result<Page, ClientError>;

    /// Replace title/body of an existing page, bumping from `version`.
    fn update(
        &self,
        page_id: &str,
        title: &str,
        body: &str,
        version: u32,
        parent_id: Option<&str>,
    ) -> Result<Page, ClientError>;

    /// Delete a page; with `recursive`, child pages are deleted first.
    fn delete(&self, page_id: &str, recursive: bool) -> Result<(), ClientError>;

    /// Reposition `source_id` relative to `target_id`.
    ///
    /// `position` is the remote service's position keyword
    /// ("append", "above", "below").
    fn move_page(
        &self,
        space_key: &str,
        source_id: &str,
        target_id: &str,
        position: &str,
    ) -> Result<Page, ClientError>;

    /// Attach a label to a page. Idempotent upstream: attaching an
    /// already-present label succeeds without effect.
    fn set_label(&self, page_id: &str, label: &str) -> Result<(), ClientError>;

    /// Detach a label from a page.
    fn remove_label(&self, page_id: &str, label: &str) -> Result<(), ClientError>;

    /// List the labels currently attached to a page.
    fn list_labels(&self, page_id: &str) -> Result<BTreeSet<String>, ClientError>;

    /// Splice `body` onto the end of the page content as a non-minor edit.
    fn append_body(
        &self,
        page_id: &str,
        body: &str,
        parent_id: Option<&str>,
    ) -> Result<Page, ClientError>;

    /// Splice `body` onto the start of the page content as a non-minor edit.
    fn prepend_body(
        &self,
        page_id: &str,
        body: &str,
        parent_id: Option<&str>,
    ) -> Result<Page, ClientError>;

    /// Run a CQL search and return the matching content.
    fn search(&self, cql: &str, options: &QueryOptions) -> Result<Vec<Page>, ClientError>;
}
