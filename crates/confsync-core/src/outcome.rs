//! Uniform outcome model shared by every reconciler.

use confsync_client::{ClientError, Page};

/// Classified reconciliation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport-level failure reaching the remote service.
    RemoteUnavailable,
    /// The addressed resource is missing upstream.
    ResourceNotFound,
    /// A precondition resource (source, target) is missing.
    PreconditionUnmet,
    /// The remote service understood the request but refused it.
    RemoteRejected,
    /// The requested operation kind is not recognized.
    InvalidRequest,
}

impl From<&ClientError> for FailureKind {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Transport(_) => Self::RemoteUnavailable,
            ClientError::Http { status: 404, .. } => Self::ResourceNotFound,
            ClientError::Http { .. } => Self::RemoteRejected,
            // A response the client could not build or decode means the
            // channel cannot be trusted, not that the remote refused.
            ClientError::Json(_) => Self::RemoteUnavailable,
        }
    }
}

/// Remote data carried back to the caller.
#[derive(Debug, Clone)]
pub enum Payload {
    /// The remote representation of the affected page.
    Page(Page),
    /// Query results.
    Pages(Vec<Page>),
    /// Labels actually touched (removed-list reporting).
    Labels(Vec<String>),
}

/// Result of one reconciliation call.
///
/// Every code path populates this; `failure` is authoritative regardless
/// of `changed` (a page write followed by a failed label step reports
/// both `changed = true` and a failure).
#[derive(Debug)]
pub struct Outcome {
    /// Whether remote state was mutated.
    pub changed: bool,
    /// Human-readable summary; carries upstream error text verbatim on
    /// remote rejection.
    pub message: String,
    /// Remote data for the caller, when the operation produced any.
    pub payload: Option<Payload>,
    /// Set when the call did not fully converge.
    pub failure: Option<FailureKind>,
}

impl Outcome {
    /// A no-op outcome: nothing was mutated, nothing failed.
    pub fn unchanged(message: impl Into<String>) -> Self {
        Self {
            changed: false,
            message: message.into(),
            payload: None,
            failure: None,
        }
    }

    /// A successful mutation outcome.
    pub fn changed(message: impl Into<String>) -> Self {
        Self {
            changed: true,
            message: message.into(),
            payload: None,
            failure: None,
        }
    }

    /// A failure outcome with no mutation performed.
    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            changed: false,
            message: message.into(),
            payload: None,
            failure: Some(kind),
        }
    }

    /// A failure outcome derived from a remote call error, keeping the
    /// upstream error text.
    pub fn from_client_error(context: &str, err: &ClientError) -> Self {
        Self::failed(FailureKind::from(err), format!("{context}: {err}"))
    }

    /// A failure outcome for an unrecognized operation kind.
    pub fn invalid_request(kind: &str) -> Self {
        Self::failed(
            FailureKind::InvalidRequest,
            format!("Unrecognized operation kind '{kind}'"),
        )
    }

    /// Attach remote data.
    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// True when the call did not fully converge.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_failure_kind_from_http_status() {
        let not_found = ClientError::Http {
            status: 404,
            body: "gone".to_owned(),
        };
        let forbidden = ClientError::Http {
            status: 403,
            body: "denied".to_owned(),
        };

        assert_eq!(FailureKind::from(&not_found), FailureKind::ResourceNotFound);
        assert_eq!(FailureKind::from(&forbidden), FailureKind::RemoteRejected);
    }

    #[test]
    fn test_failure_kind_from_json_error() {
        let err = ClientError::Json(serde_json::from_str::<serde_json::Value>("{").unwrap_err());

        assert_eq!(FailureKind::from(&err), FailureKind::RemoteUnavailable);
    }

    #[test]
    fn test_from_client_error_keeps_upstream_text() {
        let err = ClientError::Http {
            status: 409,
            body: "version conflict on page 123".to_owned(),
        };

        let outcome = Outcome::from_client_error("page update failed", &err);

        assert!(!outcome.changed);
        assert_eq!(outcome.failure, Some(FailureKind::RemoteRejected));
        assert!(outcome.message.contains("version conflict on page 123"));
    }

    #[test]
    fn test_invalid_request() {
        let outcome = Outcome::invalid_request("upsert");

        assert!(outcome.is_failure());
        assert_eq!(outcome.failure, Some(FailureKind::InvalidRequest));
        assert!(outcome.message.contains("upsert"));
    }
}
