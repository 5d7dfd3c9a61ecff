use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::{Bookmark, BookmarkPatch, NewBookmark};

/// Persistence seam for bookmarks. Handlers only ever talk to this trait.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Bookmark>>;

    async fn get(&self, id: i64) -> Result<Option<Bookmark>>;

    async fn insert(&self, bookmark: NewBookmark) -> Result<Bookmark>;

    /// Returns `false` when no bookmark has that id.
    async fn update(&self, id: i64, patch: BookmarkPatch) -> Result<bool>;

    /// Returns `false` when no bookmark has that id.
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    next_id: i64,
    bookmarks: BTreeMap<i64, Bookmark>,
}

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bookmarks(bookmarks: Vec<Bookmark>) -> Self {
        let next_id = bookmarks.iter().map(|b| b.id).max().unwrap_or(0);
        let bookmarks = bookmarks.into_iter().map(|b| (b.id, b)).collect();
        MemoryStore {
            inner: RwLock::new(MemoryInner { next_id, bookmarks }),
        }
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Bookmark>> {
        let inner = self.inner.read().await;
        Ok(inner.bookmarks.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Bookmark>> {
        let inner = self.inner.read().await;
        Ok(inner.bookmarks.get(&id).cloned())
    }

    async fn insert(&self, bookmark: NewBookmark) -> Result<Bookmark> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let stored = bookmark.with_id(inner.next_id);
        inner.bookmarks.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i64, patch: BookmarkPatch) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.bookmarks.get_mut(&id) {
            Some(bookmark) => {
                patch.apply(bookmark);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.bookmarks.remove(&id).is_some())
    }
}
