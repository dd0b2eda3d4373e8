use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use simprint_expand::FileBytes;
use simprint_span::FileId;

use crate::error::PipelineError;
use crate::file_store::FileStore;

/// Read-through file content cache scoped to a single pipeline run. Pass
/// it explicitly; do not make it a singleton. `parking_lot::RwLock`-backed.
#[derive(Default)]
pub struct FileCache {
    inner: RwLock<HashMap<FileId, Arc<[u8]>>>,
}

impl FileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return cached bytes for `file_id`, fetching from `store` on first miss.
    pub fn get_or_fetch(&self, file_id: FileId, store: &dyn FileStore) -> Result<Arc<[u8]>, PipelineError> {
        if let Some(bytes) = self.inner.read().get(&file_id) {
            return Ok(bytes.clone());
        }
        let bytes = store.read(file_id)?;
        self.inner.write().entry(file_id).or_insert_with(|| bytes.clone());
        Ok(bytes)
    }

    /// Warm the cache for every id in `file_ids`.
    pub fn fill(&self, store: &dyn FileStore, file_ids: impl IntoIterator<Item = FileId>) -> Result<(), PipelineError> {
        for file_id in file_ids {
            self.get_or_fetch(file_id, store)?;
        }
        Ok(())
    }

    /// A read-only, lock-free view over the currently cached content,
    /// suitable for the expander and slicer, which both borrow content
    /// across many calls and outlive any single lock guard.
    pub fn snapshot(&self) -> FileSnapshot {
        FileSnapshot(self.inner.read().clone())
    }
}

/// An immutable point-in-time copy of a [`FileCache`]'s contents.
pub struct FileSnapshot(HashMap<FileId, Arc<[u8]>>);

impl FileSnapshot {
    pub fn get(&self, file_id: FileId) -> Option<&[u8]> {
        self.0.get(&file_id).map(|arc| arc.as_ref())
    }
}

impl FileBytes for FileSnapshot {
    fn bytes(&self, file_id: FileId) -> &[u8] {
        self.get(file_id).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_store::MemoryFileStore;

    #[test]
    fn get_or_fetch_memoizes_after_first_read() {
        let store = MemoryFileStore::new().with_file(FileId(1), "hello");
        let cache = FileCache::new();
        let first = cache.get_or_fetch(FileId(1), &store).unwrap();
        let second = cache.get_or_fetch(FileId(1), &store).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn snapshot_reflects_filled_cache() {
        let store = MemoryFileStore::new().with_file(FileId(2), "world");
        let cache = FileCache::new();
        cache.fill(&store, [FileId(2)]).unwrap();
        let snap = cache.snapshot();
        assert_eq!(snap.get(FileId(2)), Some(&b"world"[..]));
    }

    #[test]
    fn snapshot_returns_empty_slice_for_unknown_file() {
        let cache = FileCache::new();
        let snap = cache.snapshot();
        assert_eq!(snap.get(FileId(99)), None);
        assert_eq!(simprint_expand::FileBytes::bytes(&snap, FileId(99)), &[] as &[u8]);
    }
}
