//! Document store abstraction: collections of JSON documents addressed by
//! slash-separated paths, one document per record id.

pub mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub use memory::MemoryStore;

/// A stored record: one JSON object.
pub type Document = Map<String, Value>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store backend: {0}")]
    Backend(String),
}

/// Persistence seam for records.
///
/// Implementations provide per-document last-write-wins semantics; no
/// cross-document transactions are assumed. A managed document database
/// client slots in behind this trait; the crate ships [`MemoryStore`] for
/// embedding and tests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by id. Absent documents are `None`, not an error.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Write a full document, replacing any existing one.
    async fn set(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError>;

    /// Shallow-merge `patch` into an existing document: top-level keys in
    /// `patch` replace the stored ones, everything else stays. Returns false
    /// when the target does not exist; nothing is written in that case.
    async fn merge(&self, collection: &str, id: &str, patch: Document) -> Result<bool, StoreError>;

    /// Hard delete. Returns whether a document was removed.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    /// Every document in the collection, ordered by id. Unknown collections
    /// are empty, not an error.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;
}
