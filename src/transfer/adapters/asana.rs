//! Asana-backed task sink and directory.

use super::HTTP_TIMEOUT;
use crate::config::TaskServiceSettings;
use crate::transfer::{
    domain::{CreatedTask, DirectoryEntry, TaskDraft, TaskTarget},
    ports::{DownstreamError, TaskDirectory, TaskSink, TaskSinkResult},
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::instrument;

const PROJECT_PAGE_LIMIT: &str = "50";

/// Every Asana payload is wrapped in a `data` member.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Serialize)]
struct NewTask<'a> {
    workspace: &'a str,
    projects: [&'a str; 1],
    name: &'a str,
    notes: &'a str,
    completed: bool,
}

#[derive(Debug, Deserialize)]
struct UserProfile {
    #[serde(default)]
    workspaces: Vec<DirectoryEntry>,
}

/// Task sink and directory backed by the Asana REST API.
#[derive(Debug, Clone)]
pub struct AsanaTaskSink {
    client: Client,
    settings: TaskServiceSettings,
}

impl AsanaTaskSink {
    /// Creates a client authenticated with the configured token.
    ///
    /// # Errors
    ///
    /// Returns [`DownstreamError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(settings: TaskServiceSettings) -> TaskSinkResult<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(DownstreamError::transport)?;
        Ok(Self { client, settings })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.settings.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.settings.token.expose())
    }

    async fn send<T>(&self, request: RequestBuilder) -> TaskSinkResult<T>
    where
        T: DeserializeOwned + Send,
    {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(DownstreamError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DownstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope<T> = response.json().await.map_err(DownstreamError::decode)?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl TaskSink for AsanaTaskSink {
    #[instrument(level = "debug", skip_all, fields(title = draft.title()))]
    async fn create_task(
        &self,
        draft: &TaskDraft,
        target: &TaskTarget,
    ) -> TaskSinkResult<CreatedTask> {
        let payload = Envelope {
            data: NewTask {
                workspace: target.workspace_id(),
                projects: [target.project_id()],
                name: draft.title(),
                notes: draft.body(),
                completed: false,
            },
        };
        let request = self.client.post(self.url("/tasks")).json(&payload);
        self.send(request).await
    }
}

#[async_trait]
impl TaskDirectory for AsanaTaskSink {
    async fn list_workspaces(&self) -> TaskSinkResult<Vec<DirectoryEntry>> {
        let request = self.client.get(self.url("/users/me"));
        let profile: UserProfile = self.send(request).await?;
        Ok(profile.workspaces)
    }

    async fn list_projects(&self, workspace_id: &str) -> TaskSinkResult<Vec<DirectoryEntry>> {
        let request = self
            .client
            .get(self.url("/projects"))
            .query(&[("workspace", workspace_id), ("limit", PROJECT_PAGE_LIMIT)]);
        self.send(request).await
    }
}
