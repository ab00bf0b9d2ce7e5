//! Transfer listing against a mock compliance API.

use super::helpers::{INTEGRATOR_KEY, LICENSE, USER_KEY, upstream_settings, window_end};
use rstest::rstest;
use serde_json::json;
use waybill::transfer::{
    adapters::metrc::MetrcTransferSource,
    domain::{FetchWindow, TransferId, TransferRecord},
    ports::{TransferSource, UpstreamError},
};
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer) -> MetrcTransferSource {
    MetrcTransferSource::new(upstream_settings(server.uri())).expect("client should build")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fetch_window_sends_license_window_and_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transfers/v2/incoming"))
        .and(basic_auth(INTEGRATOR_KEY, USER_KEY))
        .and(query_param("licenseNumber", LICENSE))
        .and(query_param("lastModifiedStart", "2025-01-15T12:30:00"))
        .and(query_param("lastModifiedEnd", "2025-01-15T14:30:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "Id": 1001, "ManifestNumber": "0000001001" },
            { "Id": 1002, "ManifestNumber": "0000001002" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let page = source_for(&server)
        .fetch_window(&FetchWindow::PRODUCTION.ending_at(window_end()))
        .await
        .expect("fetch should succeed");

    let ids: Vec<_> = page.records().iter().filter_map(TransferRecord::id).collect();
    assert_eq!(ids, vec![&TransferId::Number(1001), &TransferId::Number(1002)]);
    assert!(!page.is_truncated());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fetch_window_reads_paginated_envelopes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transfers/v2/incoming"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Data": [{ "Id": 1 }],
            "Total": 1,
            "TotalRecords": 3,
            "PageSize": 1
        })))
        .mount(&server)
        .await;

    let page = source_for(&server)
        .fetch_window(&FetchWindow::DIAGNOSTIC.ending_at(window_end()))
        .await
        .expect("fetch should succeed");

    assert_eq!(page.records().len(), 1);
    assert_eq!(page.reported_total(), Some(3));
    assert!(page.is_truncated());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fetch_window_reports_status_and_body_on_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let result = source_for(&server)
        .fetch_window(&FetchWindow::PRODUCTION.ending_at(window_end()))
        .await;

    let Err(UpstreamError::Status { status, body }) = result else {
        panic!("expected a status error");
    };
    assert_eq!(status, 401);
    assert_eq!(body, "invalid api key");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fetch_window_rejects_non_json_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = source_for(&server)
        .fetch_window(&FetchWindow::PRODUCTION.ending_at(window_end()))
        .await;

    assert!(matches!(result, Err(UpstreamError::Decode(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fetch_window_reports_unreachable_hosts_as_transport_errors() {
    let source = MetrcTransferSource::new(upstream_settings("http://127.0.0.1:1".to_owned()))
        .expect("client should build");
    let result = source
        .fetch_window(&FetchWindow::PRODUCTION.ending_at(window_end()))
        .await;

    assert!(matches!(result, Err(UpstreamError::Transport(_))));
}
