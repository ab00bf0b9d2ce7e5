//! In-memory dedup store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::transfer::{
    domain::DedupRecord,
    ports::{DedupStore, DedupStoreResult, StoreError},
};

/// Thread-safe in-memory dedup store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDedupStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    record: Option<DedupRecord>,
    corrupt: bool,
    saves: usize,
}

impl InMemoryDedupStore {
    /// Creates a store with nothing persisted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already persisted `record`.
    #[must_use]
    pub fn with_record(record: DedupRecord) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState {
                record: Some(record),
                ..InMemoryStoreState::default()
            })),
        }
    }

    /// Creates a store whose persisted content cannot be parsed.
    #[must_use]
    pub fn corrupt() -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState {
                corrupt: true,
                ..InMemoryStoreState::default()
            })),
        }
    }

    /// Returns the persisted record, if any was saved or seeded.
    #[must_use]
    pub fn snapshot(&self) -> Option<DedupRecord> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.record.clone())
    }

    /// Returns how many times [`DedupStore::save`] succeeded.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.state.read().map_or(0, |state| state.saves)
    }
}

#[async_trait]
impl DedupStore for InMemoryDedupStore {
    async fn load(&self) -> DedupStoreResult<DedupRecord> {
        let state = self
            .state
            .read()
            .map_err(|err| StoreError::io(std::io::Error::other(err.to_string())))?;
        if state.corrupt {
            return Err(StoreError::corrupt("seeded corrupt state"));
        }
        Ok(state.record.clone().unwrap_or_default())
    }

    async fn save(&self, record: &DedupRecord) -> DedupStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| StoreError::io(std::io::Error::other(err.to_string())))?;
        state.record = Some(record.clone());
        state.corrupt = false;
        state.saves += 1;
        Ok(())
    }
}
