//! Page relocation.

use tracing::info;

use crate::outcome::{FailureKind, Outcome, Payload};
use crate::reconcile::Reconciler;
use crate::request::PageRef;
use crate::resolve::resolve_id;

/// The source page is always appended as the last child of the target.
const MOVE_POSITION: &str = "append";

impl Reconciler<'_> {
    /// Reposition `source_title` as the last child of `target_title`.
    ///
    /// Both endpoints must resolve before any mutation is issued; a miss
    /// on either side fails fast with no partial move.
    pub fn relocate(&self, space_key: &str, source_title: &str, target_title: &str) -> Outcome {
        let Some(source_id) = resolve_id(self.client, &PageRef::new(space_key, source_title))
        else {
            return Outcome::failed(
                FailureKind::PreconditionUnmet,
                format!("Source page '{source_title}' not found in space {space_key}"),
            );
        };

        let Some(target_id) = resolve_id(self.client, &PageRef::new(space_key, target_title))
        else {
            return Outcome::failed(
                FailureKind::PreconditionUnmet,
                format!("Target page '{target_title}' not found in space {space_key}"),
            );
        };

        info!(
            "Moving '{}' under '{}' in space {}",
            source_title, target_title, space_key
        );

        match self
            .client
            .move_page(space_key, &source_id, &target_id, MOVE_POSITION)
        {
            Ok(page) => Outcome::changed(format!("Page have been moved under '{target_title}'"))
                .with_payload(Payload::Page(page)),
            Err(err) => Outcome::from_client_error("page move failed", &err),
        }
    }
}

#[cfg(test)]
mod tests {
    use confsync_client::{MockContentClient, MockOp};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_move_appends_under_target() {
        let client = MockContentClient::new()
            .with_page("DOC", "Child", "")
            .with_page("DOC", "Parent", "");
        let reconciler = Reconciler::new(&client);

        let outcome = reconciler.relocate("DOC", "Child", "Parent");

        assert!(outcome.changed);
        assert!(!outcome.is_failure());
        let moves = client.moves();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].2, "append");
    }

    #[test]
    fn test_move_missing_target_is_precondition_failure_with_zero_mutations() {
        let client = MockContentClient::new().with_page("DOC", "Child", "");
        let reconciler = Reconciler::new(&client);

        let outcome = reconciler.relocate("DOC", "Child", "No such parent");

        assert!(!outcome.changed);
        assert_eq!(outcome.failure, Some(FailureKind::PreconditionUnmet));
        assert_eq!(client.mutation_count(), 0);
        assert!(client.moves().is_empty());
    }

    #[test]
    fn test_move_missing_source_is_precondition_failure() {
        let client = MockContentClient::new().with_page("DOC", "Parent", "");
        let reconciler = Reconciler::new(&client);

        let outcome = reconciler.relocate("DOC", "No such child", "Parent");

        assert!(!outcome.changed);
        assert_eq!(outcome.failure, Some(FailureKind::PreconditionUnmet));
        assert_eq!(client.mutation_count(), 0);
    }

    #[test]
    fn test_move_unreachable_lookup_is_precondition_failure() {
        // An endpoint that cannot be confirmed must not be moved.
        let client = MockContentClient::new()
            .with_page("DOC", "Child", "")
            .with_page("DOC", "Parent", "")
            .failing(MockOp::Lookup);
        let reconciler = Reconciler::new(&client);

        let outcome = reconciler.relocate("DOC", "Child", "Parent");

        assert_eq!(outcome.failure, Some(FailureKind::PreconditionUnmet));
        assert_eq!(client.mutation_count(), 0);
    }

    #[test]
    fn test_move_rejection_is_failure() {
        let client = MockContentClient::new()
            .with_page("DOC", "Child", "")
            .with_page("DOC", "Parent", "")
            .failing(MockOp::Move);
        let reconciler = Reconciler::new(&client);

        let outcome = reconciler.relocate("DOC", "Child", "Parent");

        assert!(!outcome.changed);
        assert_eq!(outcome.failure, Some(FailureKind::RemoteRejected));
    }
}
