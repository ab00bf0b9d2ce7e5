//! Fixed task directory.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::transfer::{
    domain::DirectoryEntry,
    ports::{TaskDirectory, TaskSinkResult},
};

/// Task directory serving a fixed set of workspaces and projects.
#[derive(Debug, Clone, Default)]
pub struct StaticTaskDirectory {
    workspaces: Vec<DirectoryEntry>,
    projects: HashMap<String, Vec<DirectoryEntry>>,
}

impl StaticTaskDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a workspace together with its projects.
    #[must_use]
    pub fn with_workspace(
        mut self,
        workspace: DirectoryEntry,
        projects: impl IntoIterator<Item = DirectoryEntry>,
    ) -> Self {
        self.projects
            .insert(workspace.gid.clone(), projects.into_iter().collect());
        self.workspaces.push(workspace);
        self
    }
}

#[async_trait]
impl TaskDirectory for StaticTaskDirectory {
    async fn list_workspaces(&self) -> TaskSinkResult<Vec<DirectoryEntry>> {
        Ok(self.workspaces.clone())
    }

    async fn list_projects(&self, workspace_id: &str) -> TaskSinkResult<Vec<DirectoryEntry>> {
        Ok(self.projects.get(workspace_id).cloned().unwrap_or_default())
    }
}
