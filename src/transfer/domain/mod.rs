//! Domain model for transfer ingestion.
//!
//! The transfer domain models upstream manifest records, the task drafts
//! derived from them, and the append-only dedup set, while keeping all
//! network and filesystem concerns outside of the domain boundary.

mod dedup;
mod draft;
mod error;
mod ids;
mod record;
mod target;
mod window;

pub use dedup::DedupRecord;
pub use draft::{DISPLAY_TIMESTAMP_FORMAT, TaskDraft, display_timestamp};
pub use error::TransferDomainError;
pub use ids::TransferId;
pub use record::{Delivery, Package, TransferPage, TransferRecord};
pub use target::{CreatedTask, DirectoryEntry, TaskTarget};
pub use window::{FetchWindow, WindowBounds};
