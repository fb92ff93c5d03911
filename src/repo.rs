//! Per-collection repository: the thin adapter services talk to.

use crate::store::{Document, DocumentStore, StoreError};

/// Borrowed view over one collection of a [`DocumentStore`]. Carries the
/// resolved collection path so services never re-derive it.
pub struct Repository<'a> {
    store: &'a dyn DocumentStore,
    collection: &'a str,
}

impl<'a> Repository<'a> {
    pub fn new(store: &'a dyn DocumentStore, collection: &'a str) -> Self {
        Repository { store, collection }
    }

    pub fn collection(&self) -> &str {
        self.collection
    }

    pub async fn get(&self, id: &str) -> Result<Option<Document>, StoreError> {
        tracing::debug!(collection = self.collection, id, "document get");
        self.store.get(self.collection, id).await
    }

    pub async fn set(&self, id: &str, doc: Document) -> Result<(), StoreError> {
        tracing::debug!(collection = self.collection, id, "document set");
        self.store.set(self.collection, id, doc).await
    }

    pub async fn merge(&self, id: &str, patch: Document) -> Result<bool, StoreError> {
        tracing::debug!(collection = self.collection, id, "document merge");
        self.store.merge(self.collection, id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        tracing::debug!(collection = self.collection, id, "document delete");
        self.store.delete(self.collection, id).await
    }

    pub async fn list(&self) -> Result<Vec<Document>, StoreError> {
        tracing::debug!(collection = self.collection, "document list");
        self.store.list(self.collection).await
    }
}
