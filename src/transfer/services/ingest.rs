//! The poll-dedupe-notify pipeline.

use crate::transfer::{
    domain::{FetchWindow, TaskDraft, TaskTarget, TransferDomainError, TransferRecord, WindowBounds},
    ports::{DedupStore, StoreError, TaskSink, TransferSource},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Service-level errors for ingestion runs.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The dedup state could not be loaded or saved.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A task draft could not be derived.
    #[error(transparent)]
    Domain(#[from] TransferDomainError),
}

/// Result type for ingestion service operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Summary of one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Records returned by the upstream window query.
    pub fetched: usize,
    /// Tasks filed during this run.
    pub created: usize,
    /// Records skipped because their transfer already produced a task.
    pub already_processed: usize,
    /// Records skipped because they carried no usable identifier.
    pub missing_id: usize,
    /// Records whose task could not be filed; retried on the next run.
    pub failed: usize,
    /// Identifiers tracked after the run.
    pub tracked: usize,
}

/// Transfer ingestion orchestration service.
///
/// Records are processed one at a time in fetch order; each task request
/// completes before the next begins. Overlapping runs against the same
/// store are not guarded against.
#[derive(Clone)]
pub struct IngestService<S, K, D, C>
where
    S: TransferSource,
    K: TaskSink,
    D: DedupStore,
    C: Clock + Send + Sync,
{
    source: Arc<S>,
    sink: Arc<K>,
    store: Arc<D>,
    clock: Arc<C>,
    target: TaskTarget,
    window: FetchWindow,
}

impl<S, K, D, C> IngestService<S, K, D, C>
where
    S: TransferSource,
    K: TaskSink,
    D: DedupStore,
    C: Clock + Send + Sync,
{
    /// Creates a pipeline filing tasks under `target`, using the production
    /// window.
    #[must_use]
    pub const fn new(
        source: Arc<S>,
        sink: Arc<K>,
        store: Arc<D>,
        clock: Arc<C>,
        target: TaskTarget,
    ) -> Self {
        Self {
            source,
            sink,
            store,
            clock,
            target,
            window: FetchWindow::PRODUCTION,
        }
    }

    /// Overrides the lookback window.
    #[must_use]
    pub const fn with_window(mut self, window: FetchWindow) -> Self {
        self.window = window;
        self
    }

    /// Runs the pipeline once.
    ///
    /// A failed upstream query is logged and treated as an empty window. A
    /// failed task request is logged and its transfer left unmarked so the
    /// next run retries it. The dedup state is saved once, after every
    /// record has been processed.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Store`] when the dedup state cannot be loaded
    /// or saved. A corrupt state file aborts the run before any task is
    /// filed.
    #[instrument(level = "info", skip(self), fields(window_hours = self.window.hours()))]
    pub async fn run(&self) -> IngestResult<IngestReport> {
        let mut dedup = self.store.load().await?;
        info!(tracked = dedup.len(), "loaded dedup state");

        let bounds = self.window.ending_at(self.clock.utc());
        let transfers = fetch_records(&*self.source, &bounds).await;
        let mut report = IngestReport {
            fetched: transfers.len(),
            ..IngestReport::default()
        };

        for transfer in &transfers {
            let Some(transfer_id) = transfer.id() else {
                report.missing_id += 1;
                continue;
            };
            if dedup.contains(transfer_id) {
                report.already_processed += 1;
                continue;
            }

            info!(%transfer_id, "processing new transfer");
            if self.notify(transfer).await {
                dedup.mark_processed(transfer_id.clone());
                report.created += 1;
            } else {
                report.failed += 1;
            }
        }

        dedup.record_run(self.clock.utc());
        self.store.save(&dedup).await?;
        report.tracked = dedup.len();
        info!(
            created = report.created,
            failed = report.failed,
            tracked = report.tracked,
            "ingestion run complete"
        );
        Ok(report)
    }

    /// Files the task for one transfer, returning whether it was accepted.
    async fn notify(&self, transfer: &TransferRecord) -> bool {
        let draft = match TaskDraft::from_transfer(transfer, self.clock.utc()) {
            Ok(draft) => draft,
            Err(error) => {
                warn!(%error, "could not derive task draft");
                return false;
            }
        };
        match self.sink.create_task(&draft, &self.target).await {
            Ok(created) => {
                info!(task_gid = created.gid(), title = draft.title(), "created task");
                true
            }
            Err(error) => {
                warn!(%error, title = draft.title(), "task creation failed; will retry next run");
                false
            }
        }
    }
}

/// Fetches one window, treating upstream failure as an empty window.
///
/// The caller cannot tell a failed query from a quiet window; both are
/// reported as no records. Truncated responses are kept as returned.
pub(super) async fn fetch_records<S>(source: &S, bounds: &WindowBounds) -> Vec<TransferRecord>
where
    S: TransferSource + ?Sized,
{
    match source.fetch_window(bounds).await {
        Ok(page) => {
            if page.is_truncated() {
                warn!(
                    returned = page.records().len(),
                    reported_total = page.reported_total(),
                    "upstream returned a partial page; remaining transfers are not fetched"
                );
            }
            info!(count = page.records().len(), "fetched incoming transfers");
            page.into_records()
        }
        Err(error) => {
            warn!(%error, "fetching transfers failed; continuing with an empty window");
            Vec::new()
        }
    }
}
