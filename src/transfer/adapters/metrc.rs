//! METRC-backed transfer source.
//!
//! Lists incoming transfers through the v2 endpoint. The response is either
//! a bare array or a paginated envelope `{"Data": [...], "TotalRecords": n}`;
//! only the first page is read.

use super::HTTP_TIMEOUT;
use crate::config::UpstreamSettings;
use crate::transfer::{
    domain::{TransferPage, TransferRecord, WindowBounds},
    ports::{TransferSource, TransferSourceResult, UpstreamError},
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Query timestamp layout expected by the listing endpoint.
pub const QUERY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const INCOMING_PATH: &str = "/transfers/v2/incoming";

/// Transfer source that queries the METRC REST API.
#[derive(Debug, Clone)]
pub struct MetrcTransferSource {
    client: Client,
    settings: UpstreamSettings,
}

impl MetrcTransferSource {
    /// Creates a source for the configured facility.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(settings: UpstreamSettings) -> TransferSourceResult<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(UpstreamError::transport)?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!("{}{INCOMING_PATH}", self.settings.base_url)
    }
}

#[async_trait]
impl TransferSource for MetrcTransferSource {
    #[instrument(level = "info", skip(self), fields(hours = window.hours()))]
    async fn fetch_window(&self, window: &WindowBounds) -> TransferSourceResult<TransferPage> {
        let start = window.start().format(QUERY_TIMESTAMP_FORMAT).to_string();
        let end = window.end().format(QUERY_TIMESTAMP_FORMAT).to_string();
        debug!(
            license = %self.settings.license_number,
            %start,
            %end,
            "querying incoming transfers"
        );

        let response = self
            .client
            .get(self.endpoint())
            .basic_auth(
                self.settings.integrator_key.expose(),
                Some(self.settings.user_key.expose()),
            )
            .query(&[
                ("licenseNumber", self.settings.license_number.as_str()),
                ("lastModifiedStart", start.as_str()),
                ("lastModifiedEnd", end.as_str()),
            ])
            .send()
            .await
            .map_err(UpstreamError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response.json().await.map_err(UpstreamError::decode)?;
        Ok(decode_page(payload))
    }
}

/// Decodes a listing response body into a page of records.
///
/// Unknown shapes yield an empty page. Individual records that fail to
/// decode are logged and dropped.
#[must_use]
pub fn decode_page(payload: Value) -> TransferPage {
    match payload {
        Value::Array(items) => TransferPage::new(decode_records(items)),
        Value::Object(mut envelope) => {
            let total = envelope.get("TotalRecords").and_then(Value::as_u64);
            let items = match envelope.remove("Data") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            };
            let mut page = TransferPage::new(decode_records(items));
            if let Some(reported) = total {
                page = page.with_reported_total(reported);
            }
            page
        }
        _ => TransferPage::default(),
    }
}

fn decode_records(items: Vec<Value>) -> Vec<TransferRecord> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<TransferRecord>(item) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(%error, "skipping transfer record that could not be decoded");
                None
            }
        })
        .collect()
}
