//! Mock content client for testing.
//!
//! Provides [`MockContentClient`] for unit testing reconciliation logic
//! without a Confluence instance.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::api::{ContentClient, QueryOptions};
use crate::error::ClientError;
use crate::types::{Body, Page, Space, Storage, Version};

/// Operation families that can be switched to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    Lookup,
    Create,
    Update,
    Delete,
    Move,
    SetLabel,
    RemoveLabel,
    ListLabels,
    Append,
    Prepend,
    Search,
}

/// Mock content client for testing.
///
/// Stores pages and labels in memory and counts lookups and mutations
/// separately, so tests can assert that a failed precondition issued zero
/// remote mutation calls. Use the builder methods to seed remote state.
///
/// # Example
///
/// ```ignore
/// use confsync_client::{ContentClient, MockContentClient, MockOp};
///
/// let client = MockContentClient::new()
///     .with_page("DOC", "Spec", "<p>v1</p>")
///     .failing(MockOp::Delete);
///
/// let page = client.lookup_by_title("DOC", "Spec").unwrap();
/// assert!(page.is_some());
/// ```
#[derive(Debug, Default)]
pub struct MockContentClient {
    pages: RwLock<HashMap<String, Page>>,
    labels: RwLock<HashMap<String, BTreeSet<String>>>,
    search_results: RwLock<Vec<Page>>,
    moves: RwLock<Vec<(String, String, String)>>,
    failures: RwLock<HashSet<MockOp>>,
    next_id: AtomicUsize,
    lookup_calls: AtomicUsize,
    mutation_calls: AtomicUsize,
}

/// Build an in-memory page with version 1.
fn build_page(id: String, space_key: &str, title: &str, body: &str) -> Page {
    Page {
        id,
        content_type: "page".to_owned(),
        title: title.to_owned(),
        space: Some(Space {
            key: space_key.to_owned(),
        }),
        version: Some(Version {
            number: 1,
            message: None,
        }),
        body: Some(Body {
            storage: Some(Storage {
                value: body.to_owned(),
                representation: "wiki".to_owned(),
            }),
        }),
        links: None,
    }
}

impl MockContentClient {
    /// Create a new empty mock client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a page in the given space. IDs are assigned sequentially.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, space_key: &str, title: &str, body: &str) -> Self {
        let id = self.allocate_id();
        self.pages
            .write()
            .unwrap()
            .insert(id.clone(), build_page(id, space_key, title, body));
        self
    }

    /// Attach labels to a previously seeded page.
    ///
    /// # Panics
    ///
    /// Panics if the page was not seeded first or the lock is poisoned.
    #[must_use]
    pub fn with_labels(self, space_key: &str, title: &str, labels: &[&str]) -> Self {
        let id = self
            .find_id(space_key, title)
            .expect("with_labels requires the page to be seeded first");
        self.labels
            .write()
            .unwrap()
            .entry(id)
            .or_default()
            .extend(labels.iter().map(|l| (*l).to_owned()));
        self
    }

    /// Seed a result for CQL searches.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_search_result(self, space_key: &str, title: &str) -> Self {
        let id = self.allocate_id();
        self.search_results
            .write()
            .unwrap()
            .push(build_page(id, space_key, title, ""));
        self
    }

    /// Switch an operation family to fail with an HTTP 500.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn failing(self, op: MockOp) -> Self {
        self.failures.write().unwrap().insert(op);
        self
    }

    /// Number of lookup calls issued.
    pub fn lookup_count(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    /// Number of mutation calls issued (create, update, delete, move,
    /// label mutation, splice).
    pub fn mutation_count(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    /// Whether a page currently exists under the natural key.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn has_page(&self, space_key: &str, title: &str) -> bool {
        self.find_id(space_key, title).is_some()
    }

    /// Current body of a seeded page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn body_of(&self, space_key: &str, title: &str) -> Option<String> {
        self.pages
            .read()
            .unwrap()
            .values()
            .find(|p| p.space_key() == Some(space_key) && p.title == title)
            .and_then(|p| p.body_text().map(ToOwned::to_owned))
    }

    /// Labels currently attached to a page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn labels_on(&self, space_key: &str, title: &str) -> BTreeSet<String> {
        self.find_id(space_key, title)
            .and_then(|id| self.labels.read().unwrap().get(&id).cloned())
            .unwrap_or_default()
    }

    /// Recorded (source id, target id, position) move calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn moves(&self) -> Vec<(String, String, String)> {
        self.moves.read().unwrap().clone()
    }

    fn allocate_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        format!("{}", 1000 + n)
    }

    fn find_id(&self, space_key: &str, title: &str) -> Option<String> {
        self.pages
            .read()
            .unwrap()
            .values()
            .find(|p| p.space_key() == Some(space_key) && p.title == title)
            .map(|p| p.id.clone())
    }

    fn fail_if(&self, op: MockOp) -> Result<(), ClientError> {
        if self.failures.read().unwrap().contains(&op) {
            return Err(ClientError::Http {
                status: 500,
                body: format!("mock failure: {op:?}"),
            });
        }
        Ok(())
    }

    fn missing(page_id: &str) -> ClientError {
        ClientError::Http {
            status: 404,
            body: format!("mock: no content with id {page_id}"),
        }
    }
}

impl ContentClient for MockContentClient {
    fn lookup_by_title(&self, space_key: &str, title: &str) -> Result<Option<Page>, ClientError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if(MockOp::Lookup)?;
        Ok(self
            .find_id(space_key, title)
            .and_then(|id| self.pages.read().unwrap().get(&id).cloned()))
    }

    fn create(
        &self,
        space_key: &str,
        title: &str,
        body: &str,
        _parent_id: Option<&str>,
    ) -> Result<Page, ClientError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if(MockOp::Create)?;
        let id = self.allocate_id();
        let page = build_page(id.clone(), space_key, title, body);
        self.pages.write().unwrap().insert(id, page.clone());
        Ok(page)
    }

    fn update(
        &self,
        page_id: &str,
        title: &str,
        body: &str,
        version: u32,
        _parent_id: Option<&str>,
    ) -> Result<Page, ClientError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if(MockOp::Update)?;
        let mut pages = self.pages.write().unwrap();
        let page = pages.get_mut(page_id).ok_or_else(|| Self::missing(page_id))?;
        page.title = title.to_owned();
        page.body = Some(Body {
            storage: Some(Storage {
                value: body.to_owned(),
                representation: "wiki".to_owned(),
            }),
        });
        page.version = Some(Version {
            number: version + 1,
            message: None,
        });
        Ok(page.clone())
    }

    fn delete(&self, page_id: &str, _recursive: bool) -> Result<(), ClientError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if(MockOp::Delete)?;
        self.pages
            .write()
            .unwrap()
            .remove(page_id)
            .map(|_| ())
            .ok_or_else(|| Self::missing(page_id))
    }

    fn move_page(
        &self,
        _space_key: &str,
        source_id: &str,
        target_id: &str,
        position: &str,
    ) -> Result<Page, ClientError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if(MockOp::Move)?;
        self.moves.write().unwrap().push((
            source_id.to_owned(),
            target_id.to_owned(),
            position.to_owned(),
        ));
        self.pages
            .read()
            .unwrap()
            .get(source_id)
            .cloned()
            .ok_or_else(|| Self::missing(source_id))
    }

    fn set_label(&self, page_id: &str, label: &str) -> Result<(), ClientError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if(MockOp::SetLabel)?;
        self.labels
            .write()
            .unwrap()
            .entry(page_id.to_owned())
            .or_default()
            .insert(label.to_owned());
        Ok(())
    }

    fn remove_label(&self, page_id: &str, label: &str) -> Result<(), ClientError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if(MockOp::RemoveLabel)?;
        if let Some(set) = self.labels.write().unwrap().get_mut(page_id) {
            set.remove(label);
        }
        Ok(())
    }

    fn list_labels(&self, page_id: &str) -> Result<BTreeSet<String>, ClientError> {
        self.fail_if(MockOp::ListLabels)?;
        Ok(self
            .labels
            .read()
            .unwrap()
            .get(page_id)
            .cloned()
            .unwrap_or_default())
    }

    fn append_body(
        &self,
        page_id: &str,
        body: &str,
        _parent_id: Option<&str>,
    ) -> Result<Page, ClientError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if(MockOp::Append)?;
        self.splice(page_id, body, false)
    }

    fn prepend_body(
        &self,
        page_id: &str,
        body: &str,
        _parent_id: Option<&str>,
    ) -> Result<Page, ClientError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if(MockOp::Prepend)?;
        self.splice(page_id, body, true)
    }

    fn search(&self, _cql: &str, _options: &QueryOptions) -> Result<Vec<Page>, ClientError> {
        self.fail_if(MockOp::Search)?;
        Ok(self.search_results.read().unwrap().clone())
    }
}

impl MockContentClient {
    fn splice(&self, page_id: &str, addition: &str, front: bool) -> Result<Page, ClientError> {
        let mut pages = self.pages.write().unwrap();
        let page = pages.get_mut(page_id).ok_or_else(|| Self::missing(page_id))?;
        let existing = page.body_text().unwrap_or("").to_owned();
        let merged = if front {
            format!("{addition}{existing}")
        } else {
            format!("{existing}{addition}")
        };
        page.body = Some(Body {
            storage: Some(Storage {
                value: merged,
                representation: "wiki".to_owned(),
            }),
        });
        let number = page.version_number() + 1;
        page.version = Some(Version {
            number,
            message: None,
        });
        Ok(page.clone())
    }
}
