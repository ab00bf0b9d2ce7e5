//! Numbered menu prompts for the setup command.

use std::io::{self, BufRead, Write};
use waybill::transfer::{domain::DirectoryEntry, services::select_entry};

/// Lists `entries` and reads a 1-based choice from `input`, asking again
/// until the answer names an entry.
///
/// Returns [`io::ErrorKind::UnexpectedEof`] when input ends first.
pub(crate) fn choose_entry<'a, R, W>(
    input: &mut R,
    output: &mut W,
    label: &str,
    entries: &'a [DirectoryEntry],
) -> io::Result<&'a DirectoryEntry>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Available {label}s:")?;
    for (position, entry) in entries.iter().enumerate() {
        writeln!(output, "  {}. {} ({})", position + 1, entry.name, entry.gid)?;
    }

    let mut line = String::new();
    loop {
        write!(output, "Select a {label} [1-{}]: ", entries.len())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no {label} selected"),
            ));
        }

        let chosen = line
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|choice| select_entry(entries, choice));
        if let Some(entry) = chosen {
            return Ok(entry);
        }
        writeln!(
            output,
            "Please enter a number between 1 and {}.",
            entries.len()
        )?;
    }
}
