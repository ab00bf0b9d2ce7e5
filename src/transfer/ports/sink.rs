//! Downstream port for filing tracking tasks.

use crate::transfer::domain::{CreatedTask, TaskDraft, TaskTarget};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task sink operations.
pub type TaskSinkResult<T> = Result<T, DownstreamError>;

/// Task-creation contract for the project-management service.
#[async_trait]
pub trait TaskSink: Send + Sync {
    /// Files one incomplete task built from `draft` under `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DownstreamError`] when the task service rejects or never
    /// receives the request.
    async fn create_task(
        &self,
        draft: &TaskDraft,
        target: &TaskTarget,
    ) -> TaskSinkResult<CreatedTask>;
}

/// Errors returned by task-service adapters.
#[derive(Debug, Clone, Error)]
pub enum DownstreamError {
    /// The request did not complete.
    #[error("task service request failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The task service answered with a non-success status.
    #[error("task service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, kept for diagnosis.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("task service response could not be decoded: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),
}

impl DownstreamError {
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
