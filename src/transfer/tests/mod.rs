//! Unit tests for the transfer module.
//!
//! Tests are organised by concept: domain values, task draft rendering,
//! dedup state, and the three services.
