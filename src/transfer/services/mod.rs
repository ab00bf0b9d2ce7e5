//! Application services for transfer ingestion.

mod ingest;
mod preview;
mod setup;

pub use ingest::{IngestError, IngestReport, IngestResult, IngestService};
pub use preview::{PreviewEntry, PreviewStatus, TransferPreview, TransferPreviewService};
pub use setup::{SetupError, SetupResult, SetupService, select_entry};
