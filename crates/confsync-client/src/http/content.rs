//! Content splicing and CQL search for the Confluence API.

use tracing::info;

use super::{HttpContentClient, encode};
use crate::api::QueryOptions;
use crate::error::ClientError;
use crate::types::{ContentResults, Page};

/// Which end of the page body receives the addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Splice {
    Append,
    Prepend,
}

impl HttpContentClient {
    /// Splice `addition` onto the current page body and store the result
    /// as a non-minor edit, keeping the page title.
    pub(crate) fn splice_body(
        &self,
        page_id: &str,
        addition: &str,
        parent_id: Option<&str>,
        splice: Splice,
    ) -> Result<Page, ClientError> {
        let current = self.get_page(page_id, &["body.storage", "version"])?;
        let existing = current.body_text().unwrap_or("");

        let merged = match splice {
            Splice::Append => format!("{existing}{addition}"),
            Splice::Prepend => format!("{addition}{existing}"),
        };

        info!(
            "Splicing {} bytes onto page {} ({:?})",
            addition.len(),
            page_id,
            splice
        );

        self.update_page(
            page_id,
            &current.title,
            &merged,
            current.version_number(),
            parent_id,
        )
    }

    /// Run a CQL search, forwarding paging options verbatim.
    pub(crate) fn search_content(
        &self,
        cql: &str,
        options: &QueryOptions,
    ) -> Result<Vec<Page>, ClientError> {
        let url = format!(
            "{}/content/search?{}",
            self.api_url(),
            search_query(cql, options)
        );

        info!("Searching content: {}", cql);

        let listing: ContentResults = self.get_json(&url)?;
        Ok(listing.results)
    }
}

/// Build the query string for a CQL search.
fn search_query(cql: &str, options: &QueryOptions) -> String {
    let mut query = format!("cql={}", encode(cql));

    if let Some(start) = options.start {
        query.push_str(&format!("&start={start}"));
    }
    if let Some(limit) = options.limit {
        query.push_str(&format!("&limit={limit}"));
    }
    if let Some(expand) = &options.expand {
        query.push_str(&format!("&expand={}", encode(expand)));
    }
    if options.include_archived {
        query.push_str("&includeArchivedSpaces=true");
    }
    if let Some(excerpt) = &options.excerpt {
        query.push_str(&format!("&excerpt={}", encode(excerpt)));
    }

    query
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_search_query_bare() {
        let query = search_query("type=page", &QueryOptions::default());

        assert_eq!(query, "cql=type%3Dpage");
    }

    #[test]
    fn test_search_query_full() {
        let options = QueryOptions {
            start: Some(25),
            limit: Some(50),
            expand: Some("body.storage,version".to_owned()),
            include_archived: true,
            excerpt: Some("highlight".to_owned()),
        };

        let query = search_query("space=DOC and label=api", &options);

        assert_eq!(
            query,
            "cql=space%3DDOC%20and%20label%3Dapi&start=25&limit=50\
             &expand=body.storage%2Cversion&includeArchivedSpaces=true&excerpt=highlight"
        );
    }
}
