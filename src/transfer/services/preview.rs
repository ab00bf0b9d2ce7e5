//! Diagnostic dry run over a (usually wider) window.
//!
//! A preview never files tasks and never writes dedup state, so it is safe
//! to run with the widest window while the scheduled pipeline is active.

use super::ingest::{IngestResult, fetch_records};
use crate::transfer::{
    domain::{FetchWindow, TaskDraft, TransferRecord},
    ports::{DedupStore, TransferSource},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::instrument;

/// What a production run would do with one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewStatus {
    /// A task would be filed with this draft.
    New(TaskDraft),
    /// The transfer already produced a task and would be skipped.
    AlreadyProcessed,
    /// The record carries no usable identifier and would be skipped.
    MissingId,
}

/// One fetched record and its would-be outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    /// Record as fetched.
    pub record: TransferRecord,
    /// Outcome a production run would reach.
    pub status: PreviewStatus,
}

/// Result of a diagnostic preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPreview {
    /// Window the preview queried.
    pub window: FetchWindow,
    /// Identifiers tracked in the dedup state.
    pub tracked: usize,
    /// Fetched records in upstream order.
    pub entries: Vec<PreviewEntry>,
}

impl TransferPreview {
    /// Returns how many records would produce a task.
    #[must_use]
    pub fn new_count(&self) -> usize {
        self.count(|status| matches!(status, PreviewStatus::New(_)))
    }

    /// Returns how many records would be skipped as already processed.
    #[must_use]
    pub fn already_processed_count(&self) -> usize {
        self.count(|status| matches!(status, PreviewStatus::AlreadyProcessed))
    }

    fn count(&self, predicate: impl Fn(&PreviewStatus) -> bool) -> usize {
        self.entries
            .iter()
            .filter(|entry| predicate(&entry.status))
            .count()
    }
}

/// Read-only preview service.
#[derive(Clone)]
pub struct TransferPreviewService<S, D, C>
where
    S: TransferSource,
    D: DedupStore,
    C: Clock + Send + Sync,
{
    source: Arc<S>,
    store: Arc<D>,
    clock: Arc<C>,
}

impl<S, D, C> TransferPreviewService<S, D, C>
where
    S: TransferSource,
    D: DedupStore,
    C: Clock + Send + Sync,
{
    /// Creates a preview service.
    #[must_use]
    pub const fn new(source: Arc<S>, store: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            source,
            store,
            clock,
        }
    }

    /// Classifies every record in `window` without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`super::IngestError::Store`] when the dedup state cannot be
    /// loaded, and [`super::IngestError::Domain`] when a draft cannot be
    /// derived.
    #[instrument(level = "info", skip(self), fields(window_hours = window.hours()))]
    pub async fn preview(&self, window: FetchWindow) -> IngestResult<TransferPreview> {
        let dedup = self.store.load().await?;
        let now = self.clock.utc();
        let transfers = fetch_records(&*self.source, &window.ending_at(now)).await;

        let entries = transfers
            .into_iter()
            .map(|record| {
                let status = match record.id() {
                    None => PreviewStatus::MissingId,
                    Some(id) if dedup.contains(id) => PreviewStatus::AlreadyProcessed,
                    Some(_) => PreviewStatus::New(TaskDraft::from_transfer(&record, now)?),
                };
                Ok(PreviewEntry { record, status })
            })
            .collect::<IngestResult<Vec<_>>>()?;

        Ok(TransferPreview {
            window,
            tracked: dedup.len(),
            entries,
        })
    }
}
