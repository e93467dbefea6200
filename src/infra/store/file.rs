//! JSON-file backed document store.
//!
//! Keeps everything in a [`MemoryStore`] and rewrites the whole snapshot
//! after every mutation (write to a sibling temp file, then rename).
//! A mutation is applied to a staged copy first; the live contents only
//! change once the snapshot is on disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{CollectionPath, DocumentStore, MemoryStore, Query, Snapshot};
use crate::domain::Document;
use crate::errors::AppResult;

pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
    // held across stage + persist + commit so snapshots hit the disk in order
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open the snapshot at `path`, starting empty if it does not exist.
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let snapshot: Snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Snapshot::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(
            path = %path.display(),
            collections = snapshot.len(),
            "Document snapshot loaded"
        );

        Ok(Self {
            path,
            inner: MemoryStore::from_snapshot(snapshot),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Private copy of the live contents to apply a mutation to.
    async fn stage(&self) -> MemoryStore {
        MemoryStore::from_snapshot(self.inner.snapshot().await)
    }

    /// Write the staged contents to disk, then make them live.
    async fn commit(&self, staged: MemoryStore) -> AppResult<()> {
        let snapshot = staged.snapshot().await;
        self.persist(&snapshot).await.inspect_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e.detail(), "Snapshot write failed")
        })?;
        self.inner.replace(snapshot).await;
        Ok(())
    }

    async fn persist(&self, snapshot: &Snapshot) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), "Document snapshot written");
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn get(&self, collection: &CollectionPath, id: &str) -> AppResult<Option<Document>> {
        self.inner.get(collection, id).await
    }

    async fn set(&self, collection: &CollectionPath, id: &str, document: Document) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let staged = self.stage().await;
        staged.set(collection, id, document).await?;
        self.commit(staged).await
    }

    async fn update(&self, collection: &CollectionPath, id: &str, fields: Document) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let staged = self.stage().await;
        staged.update(collection, id, fields).await?;
        self.commit(staged).await
    }

    async fn delete(&self, collection: &CollectionPath, id: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let staged = self.stage().await;
        staged.delete(collection, id).await?;
        self.commit(staged).await
    }

    async fn query(&self, collection: &CollectionPath, query: &Query) -> AppResult<Vec<Document>> {
        self.inner.query(collection, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Timestamp, Value};
    use crate::errors::AppError;

    #[tokio::test]
    async fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("none.json")).await.unwrap();
        let path = CollectionPath::user_interviews("u1");
        assert!(store.query(&path, &Query::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("data.json");
        let path = CollectionPath::user_interviews("u1");

        let mut doc = Document::new();
        doc.insert("company".into(), Value::from("Acme"));
        doc.insert("createdAt".into(), Value::Timestamp(Timestamp::new(100, 0)));

        {
            let store = FileStore::open(&file).await.unwrap();
            store.set(&path, "a", doc.clone()).await.unwrap();
            store.set(&path, "b", doc.clone()).await.unwrap();
            store.delete(&path, "b").await.unwrap();
        }

        let reopened = FileStore::open(&file).await.unwrap();
        assert_eq!(reopened.get(&path, "a").await.unwrap(), Some(doc));
        assert!(reopened.get(&path, "b").await.unwrap().is_none());
        assert!(!dir.path().join("nested").join("data.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_update_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.json");
        let store = FileStore::open(&file).await.unwrap();
        let path = CollectionPath::user_interviews("u1");

        let err = store.update(&path, "ghost", Document::new()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_contents_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("sub").join("data.json");
        let store = FileStore::open(&file).await.unwrap();
        let path = CollectionPath::user_interviews("u1");

        // a regular file where the parent directory should be
        std::fs::write(dir.path().join("sub"), "").unwrap();

        let mut doc = Document::new();
        doc.insert("company".into(), Value::from("Acme"));
        let err = store.set(&path, "a", doc).await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));

        assert!(store.get(&path, "a").await.unwrap().is_none());
        assert!(store.query(&path, &Query::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_document() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        let file = sub.join("data.json");
        let path = CollectionPath::user_interviews("u1");
        let mut doc = Document::new();
        doc.insert("company".into(), Value::from("Acme"));

        let store = FileStore::open(&file).await.unwrap();
        store.set(&path, "a", doc.clone()).await.unwrap();

        std::fs::remove_dir_all(&sub).unwrap();
        std::fs::write(&sub, "").unwrap();

        assert!(store.delete(&path, "a").await.is_err());
        assert_eq!(store.get(&path, "a").await.unwrap(), Some(doc));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.json");
        std::fs::write(&file, "{ not json").unwrap();

        let err = FileStore::open(&file).await.err().unwrap();
        assert!(matches!(err, AppError::Json(_)));
    }
}
