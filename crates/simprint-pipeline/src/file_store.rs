use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use simprint_span::FileId;

use crate::error::PipelineError;

/// Consumed external interface: bytes by file id, stable for the life of a
/// pipeline run.
pub trait FileStore: Send + Sync {
    fn read(&self, file_id: FileId) -> Result<Arc<[u8]>, PipelineError>;
}

/// In-memory file store backed by a pre-populated map. Used by tests and
/// by callers who already hold submission content in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryFileStore {
    content: HashMap<FileId, Arc<[u8]>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file_id: FileId, bytes: impl Into<Vec<u8>>) -> Self {
        self.content.insert(file_id, Arc::from(bytes.into()));
        self
    }
}

impl FileStore for MemoryFileStore {
    fn read(&self, file_id: FileId) -> Result<Arc<[u8]>, PipelineError> {
        self.content.get(&file_id).cloned().ok_or_else(|| {
            PipelineError::IoFailure {
                file_id,
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no in-memory content registered for {file_id}"),
                ),
            }
        })
    }
}

/// File store backed by the filesystem, used by the CLI.
#[derive(Debug, Default, Clone)]
pub struct DiskFileStore {
    paths: HashMap<FileId, PathBuf>,
}

impl DiskFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file_id: FileId, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(file_id, path.into());
        self
    }
}

impl FileStore for DiskFileStore {
    fn read(&self, file_id: FileId) -> Result<Arc<[u8]>, PipelineError> {
        let path = self.paths.get(&file_id).ok_or_else(|| PipelineError::IoFailure {
            file_id,
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "unregistered file id"),
        })?;
        let bytes = std::fs::read(path).map_err(|source| PipelineError::IoFailure { file_id, source })?;
        Ok(Arc::from(bytes))
    }
}
