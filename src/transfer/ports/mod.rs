//! Port contracts for transfer ingestion.
//!
//! Ports define infrastructure-agnostic interfaces used by ingestion
//! services.

pub mod directory;
pub mod sink;
pub mod source;
pub mod store;

pub use directory::TaskDirectory;
pub use sink::{DownstreamError, TaskSink, TaskSinkResult};
pub use source::{TransferSource, TransferSourceResult, UpstreamError};
pub use store::{DedupStore, DedupStoreResult, StoreError};
