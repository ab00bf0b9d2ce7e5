//! Adapter implementations for transfer ingestion ports.

pub mod asana;
pub mod file_store;
pub mod memory;
pub mod metrc;

use std::time::Duration;

/// Fixed timeout applied to every outgoing HTTP request.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
