//! One-time provisioning of the task target.

use crate::config::ConfigError;
use crate::transfer::{
    domain::DirectoryEntry,
    ports::{DownstreamError, TaskDirectory},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors raised while provisioning the task target.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The task-service directory could not be listed.
    #[error(transparent)]
    Directory(#[from] DownstreamError),

    /// The token cannot see any workspace.
    #[error("no workspaces are visible to the configured token")]
    NoWorkspaces,

    /// The chosen workspace has no projects.
    #[error("workspace {0} has no projects")]
    NoProjects(String),

    /// The chosen target could not be persisted.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for setup operations.
pub type SetupResult<T> = Result<T, SetupError>;

/// Lists candidate workspaces and projects for the operator to choose from.
#[derive(Clone)]
pub struct SetupService<D>
where
    D: TaskDirectory,
{
    directory: Arc<D>,
}

impl<D> SetupService<D>
where
    D: TaskDirectory,
{
    /// Creates a setup service.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Lists the workspaces visible to the configured token.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::NoWorkspaces`] when the listing is empty, and
    /// [`SetupError::Directory`] when the request fails.
    #[instrument(level = "debug", skip(self))]
    pub async fn discover(&self) -> SetupResult<Vec<DirectoryEntry>> {
        let workspaces = self.directory.list_workspaces().await?;
        debug!(count = workspaces.len(), "listed workspaces");
        if workspaces.is_empty() {
            return Err(SetupError::NoWorkspaces);
        }
        Ok(workspaces)
    }

    /// Lists the projects of `workspace_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::NoProjects`] when the listing is empty, and
    /// [`SetupError::Directory`] when the request fails.
    #[instrument(level = "debug", skip(self))]
    pub async fn projects(&self, workspace_id: &str) -> SetupResult<Vec<DirectoryEntry>> {
        let projects = self.directory.list_projects(workspace_id).await?;
        debug!(count = projects.len(), "listed projects");
        if projects.is_empty() {
            return Err(SetupError::NoProjects(workspace_id.to_owned()));
        }
        Ok(projects)
    }
}

/// Resolves a 1-based menu choice against `entries`.
#[must_use]
pub fn select_entry(entries: &[DirectoryEntry], choice: usize) -> Option<&DirectoryEntry> {
    choice.checked_sub(1).and_then(|index| entries.get(index))
}
