//! Waybill: inbound transfer manifests to tracking tasks.
//!
//! This crate polls a cannabis compliance API (METRC) for inbound transfer
//! manifests modified within a trailing window and files a tracking task for
//! each new transfer in a project-management service (Asana). Transfers that
//! already produced a task are remembered in a small persisted dedup set so
//! repeated runs never file the same transfer twice.
//!
//! # Architecture
//!
//! Waybill follows hexagonal architecture principles:
//!
//! - **Domain**: Pure transfer, draft, and dedup types with no I/O
//! - **Ports**: Abstract trait interfaces for the upstream, downstream, and
//!   state file collaborators
//! - **Adapters**: HTTP clients, the JSON state file, and in-memory doubles
//! - **Services**: The ingestion pipeline, the diagnostic preview, and the
//!   one-time setup flow
//!
//! # Modules
//!
//! - [`config`]: Immutable runtime configuration sourced at start-up
//! - [`telemetry`]: Tracing subscriber initialisation
//! - [`transfer`]: The poll-dedupe-notify pipeline

pub mod config;
mod fs;
pub mod telemetry;
pub mod transfer;
