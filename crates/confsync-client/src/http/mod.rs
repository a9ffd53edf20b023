//! Confluence REST API client.
//!
//! Sync HTTP client for the Confluence Server/Data Center REST API with
//! HTTP Basic (username + API token) authentication.

mod content;
mod labels;
mod pages;

use std::collections::BTreeSet;
use std::time::Duration;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use ureq::Agent;

use crate::api::{ContentClient, QueryOptions};
use crate::error::ClientError;
use crate::types::Page;

/// Characters left unescaped in query-string values (RFC 3986 unreserved).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a query-string value.
pub(crate) fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Confluence REST API client.
pub struct HttpContentClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
}

impl HttpContentClient {
    /// Create a client for `base_url` authenticating as `username` with
    /// `api_token` over HTTP Basic.
    #[must_use]
    pub fn new(base_url: &str, username: &str, api_token: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        let credentials = BASE64_STANDARD.encode(format!("{username}:{api_token}"));

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_header: format!("Basic {credentials}"),
        }
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }

    /// GET `url` and decode the JSON response.
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        let response = self
            .agent
            .get(url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;
        Self::read_json(response)
    }

    /// PUT a JSON payload to `url` and decode the JSON response.
    fn put_json<T: DeserializeOwned>(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<T, ClientError> {
        let payload_bytes = serde_json::to_vec(payload)?;
        let response = self
            .agent
            .put(url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;
        Self::read_json(response)
    }

    /// POST a JSON payload to `url` and decode the JSON response.
    fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<T, ClientError> {
        let payload_bytes = serde_json::to_vec(payload)?;
        let response = self
            .agent
            .post(url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;
        Self::read_json(response)
    }

    /// POST a JSON payload to `url`, keeping only the status check.
    fn post_ok(&self, url: &str, payload: &serde_json::Value) -> Result<(), ClientError> {
        let payload_bytes = serde_json::to_vec(payload)?;
        let response = self
            .agent
            .post(url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;
        Self::read_ok(response)
    }

    /// PUT without a payload, keeping only the status check.
    fn put_ok(&self, url: &str) -> Result<(), ClientError> {
        let response = self
            .agent
            .put(url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .send(&[][..])?;
        Self::read_ok(response)
    }

    /// DELETE `url`, keeping only the status check.
    fn delete_ok(&self, url: &str) -> Result<(), ClientError> {
        let response = self
            .agent
            .delete(url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;
        Self::read_ok(response)
    }

    /// Decode a JSON response after rejecting error statuses.
    fn read_json<T: DeserializeOwned>(
        response: ureq::http::Response<ureq::Body>,
    ) -> Result<T, ClientError> {
        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ClientError::Http {
                status,
                body: error_body,
            });
        }

        Ok(body_reader.read_json()?)
    }

    /// Reject error statuses, discarding the response body.
    fn read_ok(response: ureq::http::Response<ureq::Body>) -> Result<(), ClientError> {
        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ClientError::Http {
                status,
                body: error_body,
            });
        }

        Ok(())
    }
}

impl ContentClient for HttpContentClient {
    fn lookup_by_title(&self, space_key: &str, title: &str) -> Result<Option<Page>, ClientError> {
        self.lookup_page(space_key, title)
    }

    fn create(
        &self,
        space_key: &str,
        title: &str,
        body: &str,
        parent_id: Option<&str>,
    ) -> Result<Page, ClientError> {
        self.create_page(space_key, title, body, parent_id)
    }

    fn update(
        &self,
        page_id: &str,
        title: &str,
        body: &str,
        version: u32,
        parent_id: Option<&str>,
    ) -> Result<Page, ClientError> {
        self.update_page(page_id, title, body, version, parent_id)
    }

    fn delete(&self, page_id: &str, recursive: bool) -> Result<(), ClientError> {
        self.delete_page(page_id, recursive)
    }

    fn move_page(
        &self,
        space_key: &str,
        source_id: &str,
        target_id: &str,
        position: &str,
    ) -> Result<Page, ClientError> {
        self.reposition_page(space_key, source_id, target_id, position)
    }

    fn set_label(&self, page_id: &str, label: &str) -> Result<(), ClientError> {
        self.add_label(page_id, label)
    }

    fn remove_label(&self, page_id: &str, label: &str) -> Result<(), ClientError> {
        self.delete_label(page_id, label)
    }

    fn list_labels(&self, page_id: &str) -> Result<BTreeSet<String>, ClientError> {
        self.get_labels(page_id)
    }

    fn append_body(
        &self,
        page_id: &str,
        body: &str,
        parent_id: Option<&str>,
    ) -> Result<Page, ClientError> {
        self.splice_body(page_id, body, parent_id, content::Splice::Append)
    }

    fn prepend_body(
        &self,
        page_id: &str,
        body: &str,
        parent_id: Option<&str>,
    ) -> Result<Page, ClientError> {
        self.splice_body(page_id, body, parent_id, content::Splice::Prepend)
    }

    fn search(&self, cql: &str, options: &QueryOptions) -> Result<Vec<Page>, ClientError> {
        self.search_content(cql, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_passes_unreserved() {
        assert_eq!(encode("Release-notes_v1.0~x"), "Release-notes_v1.0~x");
    }

    #[test]
    fn test_encode_escapes_spaces_and_symbols() {
        assert_eq!(encode("Spec & More"), "Spec%20%26%20More");
        assert_eq!(
            encode("type=page and space=DOC"),
            "type%3Dpage%20and%20space%3DDOC"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpContentClient::new(
            "https://confluence.example.com/",
            "bot",
            "token",
            Duration::from_secs(5),
        );
        assert_eq!(client.api_url(), "https://confluence.example.com/rest/api");
    }
}
