//! Task drafts derived from transfer records.
//!
//! Downstream consumers match on the task text, so the title and body
//! layout below are fixed. Derivation is pure: the only time input is the
//! generation instant passed in by the caller.

use super::{TransferDomainError, TransferRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use minijinja::{Environment, context};

/// Display pattern for every timestamp rendered into a task.
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M %p";

const UNKNOWN: &str = "Unknown";
const UNKNOWN_SHIPPER: &str = "Unknown Shipper";
const NOT_SPECIFIED: &str = "Not specified";

const BODY_TEMPLATE: &str = "\
**New Inbound Transfer from METRC**

**Shipper:** {{ shipper }}
**Manifest Number:** {{ manifest }}
**Transfer ID:** {{ transfer_id }}

**Timing:**
• Created: {{ created }}
• Estimated Arrival: {{ arrival }}

**Contents:**
• {{ deliveries }} delivery/deliveries
• {{ packages }} total packages

**Next Steps:**
1. Review transfer in METRC
2. Verify contents match manifest
3. Accept/reject transfer in METRC
4. Update inventory in Blaze/Distru

---
_Auto-created by METRC Integration on {{ generated }}_
";

/// Title and body of a task about to be filed for a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    body: String,
}

impl TaskDraft {
    /// Creates a draft from already-rendered text.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Derives the task draft for `record`, stamped with `generated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferDomainError::TemplateRender`] when the body
    /// template fails to render.
    pub fn from_transfer(
        record: &TransferRecord,
        generated_at: DateTime<Utc>,
    ) -> Result<Self, TransferDomainError> {
        let shipper = non_empty(record.shipper_name()).unwrap_or(UNKNOWN_SHIPPER);
        let manifest = non_empty(record.manifest_number()).unwrap_or(UNKNOWN);
        let transfer_id = record
            .id()
            .map_or_else(|| UNKNOWN.to_owned(), ToString::to_string);
        let created =
            non_empty(record.created_at()).map_or_else(|| UNKNOWN.to_owned(), display_timestamp);
        let arrival = non_empty(record.estimated_arrival())
            .map_or_else(|| NOT_SPECIFIED.to_owned(), display_timestamp);

        let title = format!("Inbound Transfer: {shipper} - Manifest #{manifest}");

        let mut environment = Environment::new();
        environment.set_keep_trailing_newline(true);
        let body = environment
            .render_str(
                BODY_TEMPLATE,
                context! {
                    shipper => shipper,
                    manifest => manifest,
                    transfer_id => transfer_id,
                    created => created,
                    arrival => arrival,
                    deliveries => record.deliveries().len(),
                    packages => record.package_count(),
                    generated => generated_at.format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
                },
            )
            .map_err(|error| TransferDomainError::TemplateRender(error.to_string()))?;

        Ok(Self { title, body })
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the Markdown task body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// Reformats an upstream timestamp with [`DISPLAY_TIMESTAMP_FORMAT`].
///
/// Offset-qualified timestamps are shown in their own offset (a trailing
/// `Z` is UTC); naive and date-only values are shown as written. Anything
/// that does not parse is returned verbatim.
#[must_use]
pub fn display_timestamp(raw: &str) -> String {
    parse_wall_clock(raw.trim()).map_or_else(
        || raw.to_owned(),
        |wall_clock| wall_clock.format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
    )
}

fn parse_wall_clock(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
        return Some(aware.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
