//! Reconciler orchestration.
//!
//! [`Reconciler`] wires the existence resolver, the action selector and
//! the remote content client together for one operation kind at a time:
//! resolve actual state, select exactly one corrective action, execute
//! it, report an [`Outcome`]. The client handle is borrowed per call so
//! every call site can inject its own (real or test) client.

use confsync_client::{ContentClient, Page, QueryOptions};
use tracing::info;

use crate::labels::LabelMode;
use crate::outcome::{FailureKind, Outcome, Payload};
use crate::request::{DesiredPage, Direction, PageRef, Request};
use crate::resolve::{lookup, resolve_id};
use crate::select::{AbsentAction, PresentAction, select_absent, select_present};

/// Orchestrates one reconciliation call against a borrowed client.
pub struct Reconciler<'a> {
    pub(crate) client: &'a dyn ContentClient,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler over the given client handle.
    #[must_use]
    pub fn new(client: &'a dyn ContentClient) -> Self {
        Self { client }
    }

    /// Run one request to completion, producing a uniform outcome.
    pub fn run(&self, request: &Request) -> Outcome {
        info!("Reconciling '{}' request", request.kind());
        match request {
            Request::Present(desired) => self.ensure_present(desired),
            Request::Absent { page, recursive } => self.ensure_absent(page, *recursive),
            Request::Move {
                space_key,
                source_title,
                target_title,
            } => self.relocate(space_key, source_title, target_title),
            Request::AddLabels { page, labels } => {
                self.reconcile_labels(page, labels, LabelMode::Add)
            }
            Request::RemoveLabels { page, labels } => {
                self.reconcile_labels(page, labels, LabelMode::Remove)
            }
            Request::Append { page, body, parent } => {
                self.augment(page, body, parent.as_ref(), Direction::Append)
            }
            Request::Prepend { page, body, parent } => {
                self.augment(page, body, parent.as_ref(), Direction::Prepend)
            }
            Request::Read { page } => self.read(page),
            Request::Query { cql, options } => self.query(cql, options),
        }
    }

    /// Converge a page to its declared state.
    pub fn ensure_present(&self, desired: &DesiredPage) -> Outcome {
        let current = lookup(self.client, &desired.page).into_found();

        match select_present(current.is_some(), desired.overwrite) {
            PresentAction::Create => {
                let outcome = self.create_page(desired);
                self.apply_labels_after_write(desired, outcome)
            }
            PresentAction::NoOpExists => {
                let mut outcome = Outcome::unchanged("Page not created since it already exists");
                if let Some(page) = current {
                    outcome = outcome.with_payload(Payload::Page(page));
                }
                outcome
            }
            PresentAction::Update => {
                // The table selects Update only off a confirmed page.
                let Some(page) = current else {
                    return Outcome::failed(
                        FailureKind::PreconditionUnmet,
                        "Page disappeared during reconciliation",
                    );
                };
                let outcome = self.update_page(desired, &page);
                self.apply_labels_after_write(desired, outcome)
            }
        }
    }

    /// Ensure a page does not exist.
    pub fn ensure_absent(&self, page: &PageRef, recursive: bool) -> Outcome {
        let current = lookup(self.client, page).into_found();

        match select_absent(current.is_some()) {
            AbsentAction::NoOpAbsent => {
                Outcome::unchanged("Page does not exist, nothing to delete")
            }
            AbsentAction::Delete => {
                let Some(found) = current else {
                    return Outcome::failed(
                        FailureKind::PreconditionUnmet,
                        "Page disappeared during reconciliation",
                    );
                };
                match self.client.delete(&found.id, recursive) {
                    Ok(()) => Outcome::changed("Page have been deleted"),
                    Err(err) => Outcome::from_client_error("page delete failed", &err),
                }
            }
        }
    }

    /// Read a page without mutating anything. Absence is an expected
    /// state, not a failure.
    pub fn read(&self, page: &PageRef) -> Outcome {
        match lookup(self.client, page).into_found() {
            Some(found) => Outcome::unchanged("Page found").with_payload(Payload::Page(found)),
            None => Outcome::unchanged(format!(
                "Page '{}' not found in space {}",
                page.title, page.space_key
            )),
        }
    }

    /// Run a CQL query, delegating grammar and escaping to the remote.
    pub fn query(&self, cql: &str, options: &QueryOptions) -> Outcome {
        match self.client.search(cql, options) {
            Ok(pages) => Outcome::unchanged(format!("Query returned {} result(s)", pages.len()))
                .with_payload(Payload::Pages(pages)),
            Err(err) => Outcome::from_client_error("query failed", &err),
        }
    }

    fn create_page(&self, desired: &DesiredPage) -> Outcome {
        let parent_id = self.lenient_parent_id(desired.parent.as_ref());
        let body = desired.body.as_deref().unwrap_or("");

        match self.client.create(
            &desired.page.space_key,
            &desired.page.title,
            body,
            parent_id.as_deref(),
        ) {
            Ok(page) => {
                Outcome::changed("Page have been created").with_payload(Payload::Page(page))
            }
            Err(err) => Outcome::from_client_error("page create failed", &err),
        }
    }

    fn update_page(&self, desired: &DesiredPage, current: &Page) -> Outcome {
        let parent_id = self.lenient_parent_id(desired.parent.as_ref());
        let body = desired
            .body
            .as_deref()
            .or_else(|| current.body_text())
            .unwrap_or("");

        match self.client.update(
            &current.id,
            &desired.page.title,
            body,
            current.version_number(),
            parent_id.as_deref(),
        ) {
            Ok(page) => {
                Outcome::changed("Page have been updated").with_payload(Payload::Page(page))
            }
            Err(err) => Outcome::from_client_error("page update failed", &err),
        }
    }

    /// Resolve an optional parent ref, tolerating absence: re-parenting
    /// is optional metadata, so an unresolvable parent becomes `None`.
    pub(crate) fn lenient_parent_id(&self, parent: Option<&PageRef>) -> Option<String> {
        parent.and_then(|p| resolve_id(self.client, p))
    }

    /// Label follow-up after a successful create/update. A label failure
    /// keeps `changed` from the page write and reports the failure, so
    /// callers see the partial state on the failure channel.
    fn apply_labels_after_write(&self, desired: &DesiredPage, outcome: Outcome) -> Outcome {
        if outcome.is_failure() || !outcome.changed || desired.labels.is_empty() {
            return outcome;
        }

        let label_outcome = self.reconcile_labels(&desired.page, &desired.labels, LabelMode::Add);
        match label_outcome.failure {
            Some(kind) => Outcome {
                changed: outcome.changed,
                message: format!("{}; {}", outcome.message, label_outcome.message),
                payload: outcome.payload,
                failure: Some(kind),
            },
            None => outcome,
        }
    }
}
