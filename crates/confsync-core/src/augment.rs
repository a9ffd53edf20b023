//! Content augmentation (append / prepend).

use tracing::info;

use crate::outcome::{FailureKind, Outcome, Payload};
use crate::reconcile::Reconciler;
use crate::request::{Direction, PageRef};
use crate::resolve::lookup;

impl Reconciler<'_> {
    /// Splice `body` onto an existing page.
    ///
    /// Augmentation never creates: a missing target is an unmet
    /// precondition. The optional parent is resolved leniently, since
    /// re-parenting is optional metadata on a splice. The remote call is
    /// issued as a non-minor edit so the revision stands out in history.
    pub fn augment(
        &self,
        page: &PageRef,
        body: &str,
        parent: Option<&PageRef>,
        direction: Direction,
    ) -> Outcome {
        let Some(found) = lookup(self.client, page).into_found() else {
            return Outcome::failed(
                FailureKind::PreconditionUnmet,
                format!(
                    "Page '{}' not found in space {}, nothing to augment",
                    page.title, page.space_key
                ),
            );
        };

        let parent_id = self.lenient_parent_id(parent);

        info!(
            "{:?}ing {} bytes to page '{}'",
            direction,
            body.len(),
            page.title
        );

        let result = match direction {
            Direction::Append => self.client.append_body(&found.id, body, parent_id.as_deref()),
            Direction::Prepend => self
                .client
                .prepend_body(&found.id, body, parent_id.as_deref()),
        };

        match result {
            Ok(updated) => {
                let message = match direction {
                    Direction::Append => "Content have been appended",
                    Direction::Prepend => "Content have been prepended",
                };
                Outcome::changed(message).with_payload(Payload::Page(updated))
            }
            Err(err) => Outcome::from_client_error("content splice failed", &err),
        }
    }
}
