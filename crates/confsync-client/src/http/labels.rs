//! Label operations for the Confluence API.

use std::collections::BTreeSet;

use serde_json::json;
use tracing::info;

use super::{HttpContentClient, encode};
use crate::error::ClientError;
use crate::types::LabelsResponse;

/// Page size for label listings.
const LABEL_LIMIT: u32 = 200;

impl HttpContentClient {
    /// Attach a label to a page. Attaching an already-present label is a
    /// no-op upstream.
    pub(crate) fn add_label(&self, page_id: &str, label: &str) -> Result<(), ClientError> {
        let url = format!("{}/content/{}/label", self.api_url(), page_id);

        let payload = json!([{"prefix": "global", "name": label}]);

        info!("Setting label '{}' on page {}", label, page_id);

        self.post_ok(&url, &payload)
    }

    /// Detach a label from a page.
    pub(crate) fn delete_label(&self, page_id: &str, label: &str) -> Result<(), ClientError> {
        let url = format!(
            "{}/content/{}/label?name={}",
            self.api_url(),
            page_id,
            encode(label)
        );

        info!("Removing label '{}' from page {}", label, page_id);

        self.delete_ok(&url)
    }

    /// List all labels on a page.
    pub(crate) fn get_labels(&self, page_id: &str) -> Result<BTreeSet<String>, ClientError> {
        let url = format!(
            "{}/content/{}/label?limit={}",
            self.api_url(),
            page_id,
            LABEL_LIMIT
        );

        info!("Getting labels for page {}", page_id);

        let listing: LabelsResponse = self.get_json(&url)?;
        Ok(listing.results.into_iter().map(|l| l.name).collect())
    }
}
