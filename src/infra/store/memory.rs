//! In-process document store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CollectionPath, DocumentStore, Query};
use crate::domain::Document;
use crate::errors::{AppError, AppResult};

/// Every collection with its documents keyed by id.
pub type Snapshot = BTreeMap<CollectionPath, BTreeMap<String, Document>>;

/// Thread-safe in-memory store. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            collections: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Copy of the full contents.
    pub async fn snapshot(&self) -> Snapshot {
        self.collections.read().await.clone()
    }

    /// Swap in new contents wholesale.
    pub async fn replace(&self, snapshot: Snapshot) {
        *self.collections.write().await = snapshot;
    }

    /// Number of documents in a collection.
    pub async fn len(&self, collection: &CollectionPath) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &CollectionPath, id: &str) -> AppResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|docs| docs.get(id)).cloned())
    }

    async fn set(&self, collection: &CollectionPath, id: &str, document: Document) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.clone())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn update(&self, collection: &CollectionPath, id: &str, fields: Document) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or(AppError::NotFound)?;
        existing.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: &CollectionPath, id: &str) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
            if docs.is_empty() {
                collections.remove(collection);
            }
        }
        Ok(())
    }

    async fn query(&self, collection: &CollectionPath, query: &Query) -> AppResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let docs = collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        Ok(query.apply(docs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Value;
    use crate::infra::store::Direction;

    fn doc(pairs: &[(&str, Value)]) -> Document {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        let path = CollectionPath::user_interviews("u1");
        store.set(&path, "a", doc(&[("company", Value::from("Acme"))])).await.unwrap();

        let found = store.get(&path, "a").await.unwrap().unwrap();
        assert_eq!(found["company"], Value::from("Acme"));
        assert!(store.get(&path, "b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_collections_are_isolated_per_user() {
        let store = MemoryStore::new();
        let mine = CollectionPath::user_interviews("u1");
        let theirs = CollectionPath::user_interviews("u2");
        store.set(&mine, "a", Document::new()).await.unwrap();

        assert!(store.get(&theirs, "a").await.unwrap().is_none());
        assert_eq!(store.len(&mine).await, 1);
        assert_eq!(store.len(&theirs).await, 0);
    }

    #[tokio::test]
    async fn test_update_merges_top_level_fields() {
        let store = MemoryStore::new();
        let path = CollectionPath::user_interviews("u1");
        store
            .set(&path, "a", doc(&[("company", Value::from("Acme")), ("hrName", Value::from("Kim"))]))
            .await
            .unwrap();

        store.update(&path, "a", doc(&[("company", Value::from("Initech"))])).await.unwrap();

        let found = store.get(&path, "a").await.unwrap().unwrap();
        assert_eq!(found["company"], Value::from("Initech"));
        assert_eq!(found["hrName"], Value::from("Kim"));
    }

    #[tokio::test]
    async fn test_update_missing_document_fails() {
        let store = MemoryStore::new();
        let path = CollectionPath::user_interviews("u1");
        let err = store.update(&path, "ghost", Document::new()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_missing_document_succeeds() {
        let store = MemoryStore::new();
        let path = CollectionPath::user_interviews("u1");
        store.set(&path, "a", Document::new()).await.unwrap();

        store.delete(&path, "ghost").await.unwrap();
        store.delete(&path, "a").await.unwrap();
        assert_eq!(store.len(&path).await, 0);
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_query_orders_documents() {
        let store = MemoryStore::new();
        let path = CollectionPath::user_interviews("u1");
        for (id, n) in [("a", 1), ("b", 3), ("c", 2)] {
            store.set(&path, id, doc(&[("n", Value::Integer(n))])).await.unwrap();
        }

        let query = Query::new().order_by("n", Direction::Descending);
        let out = store.query(&path, &query).await.unwrap();
        let ns: Vec<i64> = out.iter().map(|d| d["n"].as_i64().unwrap()).collect();
        assert_eq!(ns, vec![3, 2, 1]);
    }
}
