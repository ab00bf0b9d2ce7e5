//! Persisted set of transfers that already produced a task.

use super::TransferId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Append-only dedup state carried between pipeline runs.
///
/// Identifiers are only ever added. The set is ordered so that saving an
/// unchanged record produces byte-identical output.
///
/// State files written by the earlier polling script use `transfer_ids` and
/// `last_run` keys, with `last_run` as a naive local timestamp; both are
/// accepted on load and read as UTC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupRecord {
    #[serde(default, alias = "transfer_ids")]
    processed_ids: BTreeSet<TransferId>,
    #[serde(
        default,
        alias = "last_run",
        with = "run_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    last_run_at: Option<DateTime<Utc>>,
}

impl DedupRecord {
    /// Creates an empty record for a first run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record already tracking `ids`.
    #[must_use]
    pub fn with_processed(ids: impl IntoIterator<Item = TransferId>) -> Self {
        Self {
            processed_ids: ids.into_iter().collect(),
            last_run_at: None,
        }
    }

    /// Returns `true` when a task was already filed for `id`.
    #[must_use]
    pub fn contains(&self, id: &TransferId) -> bool {
        self.processed_ids.contains(id)
    }

    /// Marks `id` as notified. Returns `false` when it was already tracked.
    pub fn mark_processed(&mut self, id: TransferId) -> bool {
        self.processed_ids.insert(id)
    }

    /// Records the instant of a completed run.
    pub const fn record_run(&mut self, at: DateTime<Utc>) {
        self.last_run_at = Some(at);
    }

    /// Returns the tracked identifiers in ascending order.
    pub fn processed_ids(&self) -> impl Iterator<Item = &TransferId> {
        self.processed_ids.iter()
    }

    /// Returns the number of tracked identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.processed_ids.len()
    }

    /// Returns `true` when no identifiers are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processed_ids.is_empty()
    }

    /// Returns the instant of the last completed run.
    #[must_use]
    pub const fn last_run_at(&self) -> Option<DateTime<Utc>> {
        self.last_run_at
    }
}

mod run_timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    #[expect(clippy::ref_option, reason = "serde `with` signature")]
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(instant) => {
                serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if let Ok(aware) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(aware.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Some(naive.and_utc()))
            .map_err(|error| D::Error::custom(format!("invalid run timestamp '{raw}': {error}")))
    }
}
