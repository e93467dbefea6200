//! Document store abstraction.
//!
//! A store holds documents in named collections and supports point
//! lookups, full writes, top-level merge updates, deletes and ordered
//! equality queries. Implementations serialize individual writes; nothing
//! here spans several operations.

mod file;
mod memory;
mod query;

use async_trait::async_trait;

use crate::domain::Document;
use crate::errors::AppResult;

pub use file::FileStore;
pub use memory::{MemoryStore, Snapshot};
pub use query::{CollectionPath, Direction, FieldFilter, OrderBy, Query};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Document store trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document; `None` when it does not exist
    async fn get(&self, collection: &CollectionPath, id: &str) -> AppResult<Option<Document>>;

    /// Create or fully replace a document
    async fn set(&self, collection: &CollectionPath, id: &str, document: Document) -> AppResult<()>;

    /// Merge top-level fields into an existing document.
    ///
    /// Fails with `NotFound` when the document does not exist.
    async fn update(&self, collection: &CollectionPath, id: &str, fields: Document) -> AppResult<()>;

    /// Delete a document. Deleting a missing document succeeds.
    async fn delete(&self, collection: &CollectionPath, id: &str) -> AppResult<()>;

    /// Run a query against one collection
    async fn query(&self, collection: &CollectionPath, query: &Query) -> AppResult<Vec<Document>>;
}
