//! Confluence remote content client.
//!
//! This crate provides the [`ContentClient`] trait for abstracting the
//! Confluence REST API away from the reconciliation engine. This enables:
//!
//! - **Unit testing** the engine without a Confluence instance
//! - **Clean separation** between decision logic and wire I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ContentClient`] trait covering lookup, create, update, delete, move,
//!   label mutation, content splicing and CQL search
//! - [`HttpContentClient`] implementation against the Confluence Server
//!   REST API with HTTP Basic authentication
//! - [`MockContentClient`] for testing (behind the `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use confsync_client::{ContentClient, HttpContentClient};
//!
//! let client = HttpContentClient::new(
//!     "https://confluence.example.com",
//!     "bot@example.com",
//!     "api-token",
//!     Duration::from_secs(30),
//! );
//! let page = client.lookup_by_title("DOC", "Release notes")?;
//! ```

mod api;
mod error;
mod http;
#[cfg(feature = "mock")]
mod mock;
mod types;

pub use api::{ContentClient, QueryOptions};
pub use error::ClientError;
pub use http::HttpContentClient;
#[cfg(feature = "mock")]
pub use mock::{MockContentClient, MockOp};
pub use types::{Body, ContentResults, Label, LabelsResponse, Links, Page, Space, Storage, Version};
