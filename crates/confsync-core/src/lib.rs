//! State-reconciliation engine for Confluence pages.
//!
//! Given a declared target state (existence, title, body, parent, labels)
//! and a [`ContentClient`](confsync_client::ContentClient), the
//! [`Reconciler`] resolves the page's actual remote state, selects exactly
//! one corrective action, executes it, and reports an [`Outcome`].
//!
//! Every operation kind shares the same contract:
//!
//! - `changed` says whether remote state was mutated
//! - `failure` is authoritative: when set, the call did not fully converge,
//!   even if `changed` is already true from an earlier step
//! - no error escapes a reconciler; remote failures become outcomes
//!
//! The engine is stateless between calls. Existence is re-resolved on
//! every invocation because the remote service is the sole source of
//! truth and can be mutated by other actors at any time.
//!
//! # Example
//!
//! ```ignore
//! use confsync_core::{DesiredPage, PageRef, Reconciler, Request};
//!
//! let reconciler = Reconciler::new(&client);
//! let outcome = reconciler.run(&Request::Present(DesiredPage {
//!     page: PageRef::new("DOC", "Release notes"),
//!     body: Some("<p>v1</p>".to_owned()),
//!     parent: None,
//!     overwrite: false,
//!     labels: Default::default(),
//! }));
//! assert!(outcome.changed);
//! ```

mod augment;
mod labels;
mod outcome;
mod reconcile;
mod relocate;
mod request;
mod resolve;
mod select;

pub use labels::LabelMode;
pub use outcome::{FailureKind, Outcome, Payload};
pub use reconcile::Reconciler;
pub use request::{DesiredPage, Direction, PageRef, Request};
pub use resolve::{Existence, lookup, resolve_id};
pub use select::{AbsentAction, PresentAction, select_absent, select_present};
