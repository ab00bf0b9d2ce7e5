//! Fixed transfer source.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::transfer::{
    domain::{TransferPage, TransferRecord, WindowBounds},
    ports::{TransferSource, TransferSourceResult, UpstreamError},
};

/// Transfer source that answers every query with the same outcome.
#[derive(Debug, Clone)]
pub struct StaticTransferSource {
    outcome: Result<TransferPage, UpstreamError>,
    queries: Arc<RwLock<Vec<WindowBounds>>>,
}

impl StaticTransferSource {
    /// Creates a source returning `records` for every window.
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = TransferRecord>) -> Self {
        Self::with_page(TransferPage::new(records.into_iter().collect()))
    }

    /// Creates a source returning `page` for every window.
    #[must_use]
    pub fn with_page(page: TransferPage) -> Self {
        Self {
            outcome: Ok(page),
            queries: Arc::default(),
        }
    }

    /// Creates a source that fails every query with `error`.
    #[must_use]
    pub fn failing(error: UpstreamError) -> Self {
        Self {
            outcome: Err(error),
            queries: Arc::default(),
        }
    }

    /// Returns the windows queried so far, oldest first.
    #[must_use]
    pub fn queries(&self) -> Vec<WindowBounds> {
        self.queries
            .read()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TransferSource for StaticTransferSource {
    async fn fetch_window(&self, window: &WindowBounds) -> TransferSourceResult<TransferPage> {
        if let Ok(mut queries) = self.queries.write() {
            queries.push(*window);
        }
        self.outcome.clone()
    }
}
