//! Upstream port for listing recently modified inbound transfers.

use crate::transfer::domain::{TransferPage, WindowBounds};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for transfer source operations.
pub type TransferSourceResult<T> = Result<T, UpstreamError>;

/// Listing contract for the compliance API.
#[async_trait]
pub trait TransferSource: Send + Sync {
    /// Returns inbound transfers modified within `window`.
    ///
    /// A single response is requested; further pages are never fetched.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on network failure, a non-success HTTP
    /// status, or an undecodable body.
    async fn fetch_window(&self, window: &WindowBounds) -> TransferSourceResult<TransferPage>;
}

/// Errors returned by transfer source adapters.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// The request did not complete.
    #[error("transfer request failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The upstream answered with a non-success status.
    #[error("transfer API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, kept for diagnosis.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("transfer response could not be decoded: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),
}

impl UpstreamError {
    /// Wraps a transport failure.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Wraps a body decoding failure.
    #[must_use]
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }
}
