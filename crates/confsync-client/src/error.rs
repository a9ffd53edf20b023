//! Error types for the Confluence client.

/// Error from Confluence API operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived (network error,
    /// timeout, TLS failure, unreadable response body).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] ureq::Error),

    /// Server returned an error status.
    #[error("HTTP error: {status} - {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// JSON serialization error while building a request payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// True when the remote answered with 404 for the addressed resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display_carries_status_and_body() {
        let err = ClientError::Http {
            status: 403,
            body: "Forbidden: insufficient permissions".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP error: 403 - Forbidden: insufficient permissions"
        );
    }

    #[test]
    fn test_is_not_found() {
        let not_found = ClientError::Http {
            status: 404,
            body: "no content".to_owned(),
        };
        let rejected = ClientError::Http {
            status: 409,
            body: "conflict".to_owned(),
        };

        assert!(not_found.is_not_found());
        assert!(!rejected.is_not_found());
    }
}
