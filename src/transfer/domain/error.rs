//! Error types for transfer domain validation and derivation.

use thiserror::Error;

/// Errors returned while constructing or deriving transfer domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransferDomainError {
    /// The lookback window is outside the range the upstream API accepts.
    #[error("invalid fetch window of {0} hours, expected 1 to {max}", max = super::FetchWindow::MAX_HOURS)]
    InvalidWindow(u32),

    /// A task target identifier is empty after trimming.
    #[error("task target {0} must not be empty")]
    EmptyTargetField(&'static str),

    /// The task body template failed to render.
    #[error("task body rendering failed: {0}")]
    TemplateRender(String),
}
