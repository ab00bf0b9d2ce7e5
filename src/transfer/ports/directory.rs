//! Directory port used while provisioning the task target.

use super::sink::TaskSinkResult;
use crate::transfer::domain::DirectoryEntry;
use async_trait::async_trait;

/// Read-only listing of the task service's workspaces and projects.
#[async_trait]
pub trait TaskDirectory: Send + Sync {
    /// Lists the workspaces visible to the configured token.
    ///
    /// # Errors
    ///
    /// Returns [`super::DownstreamError`] when the listing request fails.
    async fn list_workspaces(&self) -> TaskSinkResult<Vec<DirectoryEntry>>;

    /// Lists the projects of `workspace_id`.
    ///
    /// # Errors
    ///
    /// Returns [`super::DownstreamError`] when the listing request fails.
    async fn list_projects(&self, workspace_id: &str) -> TaskSinkResult<Vec<DirectoryEntry>>;
}
