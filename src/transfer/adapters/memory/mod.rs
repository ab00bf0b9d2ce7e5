//! In-memory adapters for tests and dry runs.

mod directory;
mod sink;
mod source;
mod store;

pub use directory::StaticTaskDirectory;
pub use sink::{RecordingTaskSink, SubmittedTask};
pub use source::StaticTransferSource;
pub use store::InMemoryDedupStore;
