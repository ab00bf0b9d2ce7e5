//! Transfer ingestion for Waybill.
//!
//! This module implements the poll-dedupe-notify pipeline: fetching inbound
//! transfers modified within a trailing window, filtering out transfers that
//! already produced a task, filing a task for each remaining transfer, and
//! persisting the grown dedup set. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
