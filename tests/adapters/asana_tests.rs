//! Task creation and directory listing against a mock task service.

use super::helpers::{TOKEN, target, task_service_settings};
use rstest::rstest;
use serde_json::json;
use waybill::transfer::{
    adapters::asana::AsanaTaskSink,
    domain::{DirectoryEntry, TaskDraft, TaskTarget},
    ports::{DownstreamError, TaskDirectory, TaskSink},
};
use wiremock::matchers::{bearer_token, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sink_for(server: &MockServer) -> AsanaTaskSink {
    AsanaTaskSink::new(task_service_settings(server.uri())).expect("client should build")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_posts_an_incomplete_task_under_the_target(target: TaskTarget) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .and(bearer_token(TOKEN))
        .and(body_json(json!({
            "data": {
                "workspace": "ws-1",
                "projects": ["proj-1"],
                "name": "Inbound Transfer: Acme - Manifest #42",
                "notes": "**New Inbound Transfer from METRC**\n",
                "completed": false
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "gid": "1209876543210",
                "resource_type": "task",
                "name": "Inbound Transfer: Acme - Manifest #42"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = TaskDraft::new(
        "Inbound Transfer: Acme - Manifest #42",
        "**New Inbound Transfer from METRC**\n",
    );
    let created = sink_for(&server)
        .create_task(&draft, &target)
        .await
        .expect("task should be created");

    assert_eq!(created.gid(), "1209876543210");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_reports_status_and_body_on_rejection(target: TaskTarget) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(403).set_body_string(
            r#"{"errors":[{"message":"Not a member of the project"}]}"#,
        ))
        .mount(&server)
        .await;

    let result = sink_for(&server)
        .create_task(&TaskDraft::new("title", "body"), &target)
        .await;

    assert!(matches!(
        result,
        Err(DownstreamError::Status { status: 403, ref body }) if body.contains("Not a member")
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_rejects_responses_without_a_task(target: TaskTarget) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let result = sink_for(&server)
        .create_task(&TaskDraft::new("title", "body"), &target)
        .await;

    assert!(matches!(result, Err(DownstreamError::Decode(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_workspaces_reads_the_token_owner_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "gid": "user-1",
                "name": "Receiving Desk",
                "workspaces": [
                    { "gid": "ws-1", "name": "Operations", "resource_type": "workspace" },
                    { "gid": "ws-2", "name": "Personal", "resource_type": "workspace" }
                ]
            }
        })))
        .mount(&server)
        .await;

    let workspaces = sink_for(&server)
        .list_workspaces()
        .await
        .expect("workspaces should be listed");

    assert_eq!(
        workspaces,
        vec![
            DirectoryEntry::new("ws-1", "Operations"),
            DirectoryEntry::new("ws-2", "Personal"),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_projects_queries_the_workspace() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("workspace", "ws-1"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "gid": "proj-1", "name": "Inbound Transfers" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let projects = sink_for(&server)
        .list_projects("ws-1")
        .await
        .expect("projects should be listed");

    assert_eq!(projects, vec![DirectoryEntry::new("proj-1", "Inbound Transfers")]);
}
