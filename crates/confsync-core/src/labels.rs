//! Label set reconciliation.
//!
//! Labels are a set-valued sub-resource, so convergence is per-element.
//! Add mode relies on the remote's idempotent label addition and skips
//! any pre-check; remove mode confirms presence first, because removing
//! an absent label is ambiguous upstream.

use std::collections::BTreeSet;

use tracing::info;

use crate::outcome::{Outcome, Payload};
use crate::reconcile::Reconciler;
use crate::request::PageRef;
use crate::resolve::lookup;

/// Whether labels are being attached or detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMode {
    /// Attach every label in the set.
    Add,
    /// Detach the labels that are confirmed present.
    Remove,
}

impl Reconciler<'_> {
    /// Converge the label set of a page.
    ///
    /// A page that does not exist yields a non-failure no-op: there is
    /// nothing to label, and `absent` semantics already cover deletion.
    pub fn reconcile_labels(
        &self,
        page: &PageRef,
        labels: &BTreeSet<String>,
        mode: LabelMode,
    ) -> Outcome {
        if labels.is_empty() {
            return Outcome::unchanged("No labels supplied");
        }

        let Some(found) = lookup(self.client, page).into_found() else {
            return Outcome::unchanged("No labels applied, page absent");
        };

        match mode {
            LabelMode::Add => self.add_labels(&found.id, labels),
            LabelMode::Remove => self.remove_labels(&found.id, labels),
        }
    }

    /// Attach every label; the first remote failure aborts the batch.
    fn add_labels(&self, page_id: &str, labels: &BTreeSet<String>) -> Outcome {
        for label in labels {
            if let Err(err) = self.client.set_label(page_id, label) {
                return Outcome::from_client_error(
                    &format!("applying label '{label}' failed"),
                    &err,
                );
            }
        }

        info!("Applied {} label(s) to page {}", labels.len(), page_id);

        let applied: Vec<String> = labels.iter().cloned().collect();
        Outcome::changed(format!("Labels have been applied: {}", applied.join(", ")))
            .with_payload(Payload::Labels(applied))
    }

    /// Detach only the labels confirmed present, reporting the list
    /// actually removed. A listing failure is a failure outcome, not
    /// "nothing to remove".
    fn remove_labels(&self, page_id: &str, labels: &BTreeSet<String>) -> Outcome {
        let present = match self.client.list_labels(page_id) {
            Ok(set) => set,
            Err(err) => return Outcome::from_client_error("label listing failed", &err),
        };

        let mut removed = Vec::new();
        for label in labels {
            if !present.contains(label) {
                continue;
            }
            if let Err(err) = self.client.remove_label(page_id, label) {
                return Outcome::from_client_error(
                    &format!("removing label '{label}' failed"),
                    &err,
                );
            }
            removed.push(label.clone());
        }

        info!("Removed {} label(s) from page {}", removed.len(), page_id);

        if removed.is_empty() {
            Outcome::unchanged("No matching labels on page").with_payload(Payload::Labels(removed))
        } else {
            let outcome =
                Outcome::changed(format!("Labels have been removed: {}", removed.join(", ")));
            outcome.with_payload(Payload::Labels(removed))
        }
    }
}
