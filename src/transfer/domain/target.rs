//! Task-service destinations and directory entries.

use super::TransferDomainError;
use serde::{Deserialize, Serialize};

/// Workspace and project that transfer tasks are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskTarget {
    workspace_id: String,
    project_id: String,
}

impl TaskTarget {
    /// Creates a validated task target.
    ///
    /// # Errors
    ///
    /// Returns [`TransferDomainError::EmptyTargetField`] when either
    /// identifier is empty after trimming.
    pub fn new(
        workspace_id: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Result<Self, TransferDomainError> {
        let workspace = workspace_id.into().trim().to_owned();
        let project = project_id.into().trim().to_owned();
        if workspace.is_empty() {
            return Err(TransferDomainError::EmptyTargetField("workspace id"));
        }
        if project.is_empty() {
            return Err(TransferDomainError::EmptyTargetField("project id"));
        }
        Ok(Self {
            workspace_id: workspace,
            project_id: project,
        })
    }

    /// Returns the workspace identifier.
    #[must_use]
    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    /// Returns the project identifier.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }
}

/// Task created by the downstream service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedTask {
    gid: String,
}

impl CreatedTask {
    /// Wraps the identifier assigned by the task service.
    #[must_use]
    pub fn new(gid: impl Into<String>) -> Self {
        Self { gid: gid.into() }
    }

    /// Returns the identifier assigned by the task service.
    #[must_use]
    pub fn gid(&self) -> &str {
        &self.gid
    }
}

/// Named workspace or project listed by the task service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Task-service identifier.
    pub gid: String,
    /// Human-readable name.
    pub name: String,
}

impl DirectoryEntry {
    /// Creates a directory entry.
    #[must_use]
    pub fn new(gid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            gid: gid.into(),
            name: name.into(),
        }
    }
}
