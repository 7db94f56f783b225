//! # Preview Handles
//!
//! Product and service images are shown before upload from blobs the app creates
//! locally, and after upload from the server's URL. Only the former own anything: a
//! locally created blob must be released once it is no longer shown, and a server URL
//! must never be.
//!
//! The distinction is made when the handle is created ([`PreviewHandle::External`] vs
//! [`PreviewHandle::Local`]) and release is tied to `Drop` of the [`LocalPreview`], so
//! removing or replacing a preview in its owning list releases it exactly once.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Where locally created preview blobs live.
pub trait BlobStore: Send + Sync {
    /// Store `bytes` and return the URL to display them under.
    fn create(&self, bytes: Vec<u8>, mime: &str) -> String;

    /// Free the blob behind `url`.
    fn release(&self, url: &str);
}

/// A blob this process created. Released when dropped.
pub struct LocalPreview {
    url: String,
    store: Arc<dyn BlobStore>,
}

impl LocalPreview {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for LocalPreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalPreview").field("url", &self.url).finish()
    }
}

impl Drop for LocalPreview {
    fn drop(&mut self) {
        debug!(url = %self.url, "Releasing local preview");
        self.store.release(&self.url);
    }
}

/// An image preview.
#[derive(Debug)]
pub enum PreviewHandle {
    /// A URL the server handed out. Never released.
    External(String),
    /// A blob created from a picked file.
    Local(LocalPreview),
}

impl PreviewHandle {
    pub fn external(url: impl Into<String>) -> Self {
        PreviewHandle::External(url.into())
    }

    /// Create a blob in `store` and own it.
    pub fn from_upload(store: &Arc<dyn BlobStore>, bytes: Vec<u8>, mime: &str) -> Self {
        let url = store.create(bytes, mime);
        PreviewHandle::Local(LocalPreview {
            url,
            store: Arc::clone(store),
        })
    }

    pub fn url(&self) -> &str {
        match self {
            PreviewHandle::External(url) => url,
            PreviewHandle::Local(local) => local.url(),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, PreviewHandle::Local(_))
    }
}

/// The previews attached to one record, e.g. a product's gallery.
#[derive(Debug, Default)]
pub struct PreviewList {
    items: Vec<PreviewHandle>,
}

impl PreviewList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, handle: PreviewHandle) {
        self.items.push(handle);
    }

    /// Put `handle` at `index`, releasing the one it replaces. Returns `false` if `index`
    /// is out of range, in which case `handle` is dropped.
    pub fn replace(&mut self, index: usize, handle: PreviewHandle) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = handle;
                true
            }
            None => false,
        }
    }

    /// Remove and release the preview at `index`.
    pub fn remove(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.items.remove(index);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn urls(&self) -> Vec<&str> {
        self.items.iter().map(PreviewHandle::url).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// In-process [`BlobStore`].
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    next: AtomicU64,
    blobs: Mutex<HashMap<String, (String, Vec<u8>)>>,
    releases: Mutex<HashMap<String, usize>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs created and not yet released.
    pub fn live(&self) -> usize {
        self.blobs.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// How many times `url` was released.
    pub fn release_count(&self, url: &str) -> usize {
        self.releases
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(url)
            .copied()
            .unwrap_or(0)
    }
}

impl BlobStore for MemoryBlobStore {
    fn create(&self, bytes: Vec<u8>, mime: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        let url = format!("blob:local/{n}");
        self.blobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.clone(), (mime.to_string(), bytes));
        url
    }

    fn release(&self, url: &str) {
        *self
            .releases
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(url.to_string())
            .or_default() += 1;
        if self
            .blobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(url)
            .is_none()
        {
            warn!(url, "Released a blob that is not live");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Arc<MemoryBlobStore>, Arc<dyn BlobStore>) {
        let store = Arc::new(MemoryBlobStore::new());
        let dyn_store: Arc<dyn BlobStore> = store.clone();
        (store, dyn_store)
    }

    #[test]
    fn remove_releases_local_once() {
        let (store, dyn_store) = setup();
        let mut list = PreviewList::new();
        list.push(PreviewHandle::from_upload(&dyn_store, vec![1, 2, 3], "image/png"));
        list.push(PreviewHandle::external("https://cdn.example.kg/p/1.jpg"));
        let local_url = list.urls()[0].to_string();
        assert_eq!(store.live(), 1);

        assert!(list.remove(0));
        assert_eq!(store.live(), 0);
        assert_eq!(store.release_count(&local_url), 1);

        list.clear();
        assert_eq!(store.release_count(&local_url), 1);
        assert_eq!(store.release_count("https://cdn.example.kg/p/1.jpg"), 0);
    }

    #[test]
    fn replace_releases_the_replaced_handle() {
        let (store, dyn_store) = setup();
        let mut list = PreviewList::new();
        list.push(PreviewHandle::from_upload(&dyn_store, vec![0], "image/jpeg"));
        let first = list.urls()[0].to_string();

        assert!(list.replace(0, PreviewHandle::from_upload(&dyn_store, vec![1], "image/jpeg")));
        assert_eq!(store.release_count(&first), 1);
        assert_eq!(store.live(), 1);

        assert!(list.replace(0, PreviewHandle::external("https://cdn.example.kg/p/2.jpg")));
        assert_eq!(store.live(), 0);
        assert!(!list.urls()[0].starts_with("blob:"));
    }

    #[test]
    fn external_handles_are_never_released() {
        let (store, _) = setup();
        let handle = PreviewHandle::external("blob:looks-local-but-is-not");
        assert!(!handle.is_local());
        drop(handle);
        assert_eq!(store.release_count("blob:looks-local-but-is-not"), 0);
    }

    #[test]
    fn out_of_range_edits_are_rejected() {
        let (store, dyn_store) = setup();
        let mut list = PreviewList::new();
        assert!(!list.remove(0));
        assert!(!list.replace(3, PreviewHandle::from_upload(&dyn_store, vec![9], "image/png")));
        assert_eq!(store.live(), 0);
    }
}
