//! Recording task sink.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::transfer::{
    domain::{CreatedTask, TaskDraft, TaskTarget},
    ports::{DownstreamError, TaskSink, TaskSinkResult},
};

/// Task accepted by a [`RecordingTaskSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedTask {
    /// Draft as submitted.
    pub draft: TaskDraft,
    /// Target the draft was filed under.
    pub target: TaskTarget,
    /// Identifier handed back to the caller.
    pub gid: String,
}

/// Task sink that records submissions instead of sending them.
///
/// Drafts whose title contains a rejected fragment fail with HTTP 400 and
/// are not recorded.
#[derive(Debug, Clone, Default)]
pub struct RecordingTaskSink {
    rejected_fragments: Vec<String>,
    state: Arc<RwLock<RecordingState>>,
}

#[derive(Debug, Default)]
struct RecordingState {
    submitted: Vec<SubmittedTask>,
    attempts: usize,
}

impl RecordingTaskSink {
    /// Creates a sink that accepts every draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects drafts whose title contains `fragment`.
    #[must_use]
    pub fn rejecting(mut self, fragment: impl Into<String>) -> Self {
        self.rejected_fragments.push(fragment.into());
        self
    }

    /// Returns accepted submissions in arrival order.
    #[must_use]
    pub fn submitted(&self) -> Vec<SubmittedTask> {
        self.state
            .read()
            .map(|state| state.submitted.clone())
            .unwrap_or_default()
    }

    /// Returns how many drafts were offered, accepted or not.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.state.read().map_or(0, |state| state.attempts)
    }
}

#[async_trait]
impl TaskSink for RecordingTaskSink {
    async fn create_task(
        &self,
        draft: &TaskDraft,
        target: &TaskTarget,
    ) -> TaskSinkResult<CreatedTask> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DownstreamError::transport(std::io::Error::other(err.to_string())))?;
        state.attempts += 1;

        if self
            .rejected_fragments
            .iter()
            .any(|fragment| draft.title().contains(fragment.as_str()))
        {
            return Err(DownstreamError::Status {
                status: 400,
                body: format!("rejected task '{}'", draft.title()),
            });
        }

        let gid = format!("task-{}", state.submitted.len() + 1);
        state.submitted.push(SubmittedTask {
            draft: draft.clone(),
            target: target.clone(),
            gid: gid.clone(),
        });
        Ok(CreatedTask::new(gid))
    }
}
