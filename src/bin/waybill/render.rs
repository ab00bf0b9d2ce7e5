//! Plain-text summaries written to stdout.

use std::io::{self, Write};
use waybill::transfer::{
    domain::TransferRecord,
    services::{IngestReport, PreviewStatus, TransferPreview},
};

const MISSING: &str = "-";
const BODY_PREVIEW_CHARS: usize = 150;

pub(crate) fn write_report<W: Write>(out: &mut W, report: &IngestReport) -> io::Result<()> {
    writeln!(
        out,
        "Fetched {} transfer(s): {} task(s) created, {} already processed, {} without id, {} failed",
        report.fetched, report.created, report.already_processed, report.missing_id, report.failed
    )?;
    writeln!(out, "Total tracked: {} transfer(s)", report.tracked)
}

pub(crate) fn write_preview<W: Write>(out: &mut W, preview: &TransferPreview) -> io::Result<()> {
    let hours = preview.window.hours();
    writeln!(
        out,
        "Currently tracking {} processed transfer(s)",
        preview.tracked
    )?;
    if preview.entries.is_empty() {
        writeln!(out, "No transfers modified in the last {hours} hour(s)")?;
        return Ok(());
    }

    writeln!(
        out,
        "Found {} transfer(s) modified in the last {hours} hour(s)",
        preview.entries.len()
    )?;
    for (position, entry) in preview.entries.iter().enumerate() {
        writeln!(out)?;
        write_record(out, position + 1, &entry.record)?;
        match &entry.status {
            PreviewStatus::New(draft) => {
                writeln!(out, "   Status: NEW (would create a task)")?;
                writeln!(out, "   Title: {}", draft.title())?;
                let excerpt: String = draft.body().chars().take(BODY_PREVIEW_CHARS).collect();
                writeln!(out, "   Body: {}...", excerpt.replace('\n', " "))?;
            }
            PreviewStatus::AlreadyProcessed => {
                writeln!(out, "   Status: ALREADY PROCESSED (would skip)")?;
            }
            PreviewStatus::MissingId => {
                writeln!(out, "   Status: NO ID (would skip)")?;
            }
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "Summary: {} new, {} already processed; no tasks were created",
        preview.new_count(),
        preview.already_processed_count()
    )
}

fn write_record<W: Write>(out: &mut W, position: usize, record: &TransferRecord) -> io::Result<()> {
    let id = record
        .id()
        .map_or_else(|| MISSING.to_owned(), ToString::to_string);
    writeln!(out, "#{position} Transfer ID: {id}")?;
    writeln!(
        out,
        "   Manifest: {}",
        record.manifest_number().unwrap_or(MISSING)
    )?;
    writeln!(out, "   Shipper: {}", record.shipper_name().unwrap_or(MISSING))?;
    writeln!(out, "   Created: {}", record.created_at().unwrap_or(MISSING))?;
    writeln!(
        out,
        "   Last Modified: {}",
        record.last_modified().unwrap_or(MISSING)
    )
}
