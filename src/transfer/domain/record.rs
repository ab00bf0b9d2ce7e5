//! Upstream transfer records as returned by the compliance API.

use super::TransferId;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Inbound transfer manifest fetched from the compliance API.
///
/// Records are immutable once fetched and are never persisted. Only the
/// fields needed to derive a task are decoded; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransferRecord {
    #[serde(default, deserialize_with = "deserialize_transfer_id")]
    id: Option<TransferId>,
    #[serde(default)]
    manifest_number: Option<String>,
    #[serde(default, rename = "ShipperFacilityName")]
    shipper_name: Option<String>,
    #[serde(default, rename = "CreatedDateTime")]
    created_at: Option<String>,
    #[serde(default, rename = "EstimatedArrivalDateTime")]
    estimated_arrival: Option<String>,
    #[serde(default)]
    last_modified: Option<String>,
    #[serde(default)]
    deliveries: Option<Vec<Delivery>>,
}

fn deserialize_transfer_id<'de, D>(deserializer: D) -> Result<Option<TransferId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(TransferId::from_json))
}

impl TransferRecord {
    /// Creates a record with the given identifier and no other fields.
    #[must_use]
    pub fn new(id: impl Into<TransferId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Creates a record that carries no usable identifier.
    #[must_use]
    pub fn without_id() -> Self {
        Self::default()
    }

    /// Sets the manifest number.
    #[must_use]
    pub fn with_manifest_number(mut self, manifest_number: impl Into<String>) -> Self {
        self.manifest_number = Some(manifest_number.into());
        self
    }

    /// Sets the shipper facility name.
    #[must_use]
    pub fn with_shipper_name(mut self, shipper_name: impl Into<String>) -> Self {
        self.shipper_name = Some(shipper_name.into());
        self
    }

    /// Sets the raw creation timestamp.
    #[must_use]
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Sets the raw estimated arrival timestamp.
    #[must_use]
    pub fn with_estimated_arrival(mut self, estimated_arrival: impl Into<String>) -> Self {
        self.estimated_arrival = Some(estimated_arrival.into());
        self
    }

    /// Sets the raw last-modified timestamp.
    #[must_use]
    pub fn with_last_modified(mut self, last_modified: impl Into<String>) -> Self {
        self.last_modified = Some(last_modified.into());
        self
    }

    /// Sets the ordered deliveries.
    #[must_use]
    pub fn with_deliveries(mut self, deliveries: impl IntoIterator<Item = Delivery>) -> Self {
        self.deliveries = Some(deliveries.into_iter().collect());
        self
    }

    /// Returns the transfer identifier, if the upstream supplied a usable one.
    #[must_use]
    pub const fn id(&self) -> Option<&TransferId> {
        self.id.as_ref()
    }

    /// Returns the manifest number.
    #[must_use]
    pub fn manifest_number(&self) -> Option<&str> {
        self.manifest_number.as_deref()
    }

    /// Returns the shipper facility name.
    #[must_use]
    pub fn shipper_name(&self) -> Option<&str> {
        self.shipper_name.as_deref()
    }

    /// Returns the raw creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    /// Returns the raw estimated arrival timestamp.
    #[must_use]
    pub fn estimated_arrival(&self) -> Option<&str> {
        self.estimated_arrival.as_deref()
    }

    /// Returns the raw last-modified timestamp.
    #[must_use]
    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }

    /// Returns the deliveries in upstream order.
    #[must_use]
    pub fn deliveries(&self) -> &[Delivery] {
        self.deliveries.as_deref().unwrap_or_default()
    }

    /// Returns the number of packages summed across all deliveries.
    #[must_use]
    pub fn package_count(&self) -> usize {
        self.deliveries().iter().map(Delivery::package_count).sum()
    }
}

/// One delivery leg of a transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Delivery {
    #[serde(default)]
    packages: Option<Vec<Package>>,
}

impl Delivery {
    /// Creates a delivery carrying the given packages.
    #[must_use]
    pub fn from_packages(packages: impl IntoIterator<Item = Package>) -> Self {
        Self {
            packages: Some(packages.into_iter().collect()),
        }
    }

    /// Returns the number of packages in the delivery.
    #[must_use]
    pub fn package_count(&self) -> usize {
        self.packages.as_ref().map_or(0, Vec::len)
    }
}

/// Package entry of a delivery. Its contents are carried but never read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Package(Value);

impl Package {
    /// Wraps raw upstream package content.
    #[must_use]
    pub const fn new(content: Value) -> Self {
        Self(content)
    }
}

/// Records returned for one window query.
///
/// The upstream flattens pagination into a single response but may still
/// truncate it; `reported_total` carries the upstream's own total so the
/// caller can surface the gap. Further pages are never requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferPage {
    records: Vec<TransferRecord>,
    reported_total: Option<u64>,
}

impl TransferPage {
    /// Creates a page from decoded records.
    #[must_use]
    pub const fn new(records: Vec<TransferRecord>) -> Self {
        Self {
            records,
            reported_total: None,
        }
    }

    /// Sets the total record count reported by the upstream envelope.
    #[must_use]
    pub const fn with_reported_total(mut self, total: u64) -> Self {
        self.reported_total = Some(total);
        self
    }

    /// Returns the decoded records in upstream order.
    #[must_use]
    pub fn records(&self) -> &[TransferRecord] {
        &self.records
    }

    /// Returns the total count reported by the upstream, if any.
    #[must_use]
    pub const fn reported_total(&self) -> Option<u64> {
        self.reported_total
    }

    /// Returns `true` when the upstream reported more records than it
    /// returned.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.reported_total
            .is_some_and(|total| u64::try_from(self.records.len()).is_ok_and(|len| total > len))
    }

    /// Consumes the page and returns its records.
    #[must_use]
    pub fn into_records(self) -> Vec<TransferRecord> {
        self.records
    }
}
