//! Page operations for the Confluence API.

use serde_json::json;
use tracing::info;

use super::{HttpContentClient, encode};
use crate::error::ClientError;
use crate::types::{ContentResults, Page};

/// Page size for child-page listings during recursive delete.
const CHILD_PAGE_LIMIT: u32 = 200;

impl HttpContentClient {
    /// Look up a page by (space key, title).
    ///
    /// Returns `Ok(None)` when the space has no page with that title.
    pub(crate) fn lookup_page(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Option<Page>, ClientError> {
        let url = format!(
            "{}/content?spaceKey={}&title={}&expand=body.storage,version,space",
            self.api_url(),
            encode(space_key),
            encode(title)
        );

        info!("Looking up page '{}' in space {}", title, space_key);

        let listing: ContentResults = self.get_json(&url)?;
        Ok(listing.results.into_iter().next())
    }

    /// Get page by ID with optional field expansion.
    pub(crate) fn get_page(&self, page_id: &str, expand: &[&str]) -> Result<Page, ClientError> {
        let mut url = format!("{}/content/{}", self.api_url(), page_id);

        if !expand.is_empty() {
            url.push_str("?expand=");
            url.push_str(&expand.join(","));
        }

        info!("Getting page {}", page_id);

        self.get_json(&url)
    }

    /// Create a page, optionally under a parent.
    pub(crate) fn create_page(
        &self,
        space_key: &str,
        title: &str,
        body: &str,
        parent_id: Option<&str>,
    ) -> Result<Page, ClientError> {
        let url = format!("{}/content", self.api_url());

        let mut payload = json!({
            "type": "page",
            "title": title,
            "space": {"key": space_key},
            "body": {
                "storage": {
                    "value": body,
                    "representation": "wiki"
                }
            }
        });

        if let Some(parent) = parent_id {
            payload["ancestors"] = json!([{"id": parent}]);
        }

        info!("Creating page '{}' in space {}", title, space_key);

        self.post_json(&url, &payload)
    }

    /// Update an existing page (auto-increments version, non-minor edit).
    pub(crate) fn update_page(
        &self,
        page_id: &str,
        title: &str,
        body: &str,
        version: u32,
        parent_id: Option<&str>,
    ) -> Result<Page, ClientError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);

        let mut payload = json!({
            "type": "page",
            "title": title,
            "body": {
                "storage": {
                    "value": body,
                    "representation": "wiki"
                }
            },
            "version": {"number": version + 1, "minorEdit": false}
        });

        if let Some(parent) = parent_id {
            payload["ancestors"] = json!([{"id": parent}]);
        }

        info!(
            "Updating page {} from version {} to {}",
            page_id,
            version,
            version + 1
        );

        let page: Page = self.put_json(&url, &payload)?;
        info!("Updated page {} to version {}", page_id, page.version_number());
        Ok(page)
    }

    /// Delete a page; with `recursive`, descendants are deleted first.
    ///
    /// The REST API has no recursive delete, so descendants are walked
    /// depth-first and removed child-before-parent.
    pub(crate) fn delete_page(&self, page_id: &str, recursive: bool) -> Result<(), ClientError> {
        if recursive {
            for child_id in self.child_page_ids(page_id)? {
                self.delete_page(&child_id, true)?;
            }
        }

        let url = format!("{}/content/{}", self.api_url(), page_id);

        info!("Deleting page {}", page_id);

        self.delete_ok(&url)
    }

    /// Reposition `source_id` relative to `target_id`.
    pub(crate) fn reposition_page(
        &self,
        space_key: &str,
        source_id: &str,
        target_id: &str,
        position: &str,
    ) -> Result<Page, ClientError> {
        let url = format!(
            "{}/content/{}/move/{}/{}",
            self.api_url(),
            source_id,
            position,
            target_id
        );

        info!(
            "Moving page {} ({}) {} page {}",
            source_id, space_key, position, target_id
        );

        self.put_ok(&url)?;
        self.get_page(source_id, &["version", "space"])
    }

    /// Direct child page IDs of `page_id`.
    fn child_page_ids(&self, page_id: &str) -> Result<Vec<String>, ClientError> {
        let url = format!(
            "{}/content/{}/child/page?limit={}",
            self.api_url(),
            page_id,
            CHILD_PAGE_LIMIT
        );

        let listing: ContentResults = self.get_json(&url)?;
        Ok(listing.results.into_iter().map(|p| p.id).collect())
    }
}
