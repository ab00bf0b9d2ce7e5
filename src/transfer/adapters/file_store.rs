//! JSON file dedup store.
//!
//! The state document is `{"processedIds": [...], "lastRunAt": "..."}`.
//! Saves go through a sibling temporary file and a rename so a crash never
//! leaves a half-written document behind.

use crate::fs::open_parent;
use crate::transfer::{
    domain::DedupRecord,
    ports::{DedupStore, DedupStoreResult, StoreError},
};
use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::fs_utf8::Dir;
use std::io;
use std::sync::Arc;

/// Dedup store persisted as a pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileDedupStore {
    dir: Arc<Dir>,
    file_name: String,
}

impl JsonFileDedupStore {
    /// Opens a store for the document at `path`.
    ///
    /// The document itself need not exist yet; its parent directory must.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the parent directory cannot be opened.
    pub fn open(path: &Utf8Path) -> DedupStoreResult<Self> {
        let (dir, file_name) = open_parent(path).map_err(StoreError::io)?;
        Ok(Self {
            dir: Arc::new(dir),
            file_name,
        })
    }

    /// Runs a blocking file operation off the async executor.
    async fn run_blocking<F, T>(&self, f: F) -> DedupStoreResult<T>
    where
        F: FnOnce(&Dir) -> DedupStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || f(&dir))
            .await
            .map_err(StoreError::io)?
    }
}

#[async_trait]
impl DedupStore for JsonFileDedupStore {
    async fn load(&self) -> DedupStoreResult<DedupRecord> {
        let file_name = self.file_name.clone();
        self.run_blocking(move |dir| {
            let contents = match dir.read(&file_name) {
                Ok(contents) => contents,
                Err(error) if error.kind() == io::ErrorKind::NotFound => {
                    return Ok(DedupRecord::new());
                }
                Err(error) => return Err(StoreError::io(error)),
            };
            serde_json::from_slice(&contents)
                .map_err(|error| StoreError::corrupt(format!("{file_name}: {error}")))
        })
        .await
    }

    async fn save(&self, record: &DedupRecord) -> DedupStoreResult<()> {
        let mut contents = serde_json::to_string_pretty(record).map_err(StoreError::io)?;
        contents.push('\n');
        let file_name = self.file_name.clone();
        let temp_name = format!("{file_name}.tmp");
        self.run_blocking(move |dir| {
            dir.write(&temp_name, contents).map_err(StoreError::io)?;
            dir.rename(&temp_name, dir, &file_name)
                .map_err(StoreError::io)
        })
        .await
    }
}
