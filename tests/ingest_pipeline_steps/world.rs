//! Shared world state for pipeline BDD scenarios.

use rstest::fixture;
use waybill::transfer::{
    adapters::memory::{InMemoryDedupStore, RecordingTaskSink},
    domain::{TransferId, TransferRecord},
    ports::UpstreamError,
    services::{IngestError, IngestReport},
};

/// Scenario world for pipeline behaviour tests.
pub struct IngestWorld {
    pub records: Vec<TransferRecord>,
    pub upstream_failure: Option<UpstreamError>,
    pub processed: Vec<TransferId>,
    pub store: InMemoryDedupStore,
    pub sink: RecordingTaskSink,
    pub last_result: Option<Result<IngestReport, IngestError>>,
}

impl IngestWorld {
    /// Creates a world with an empty window and no prior state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            upstream_failure: None,
            processed: Vec::new(),
            store: InMemoryDedupStore::new(),
            sink: RecordingTaskSink::new(),
            last_result: None,
        }
    }
}

impl Default for IngestWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> IngestWorld {
    IngestWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
