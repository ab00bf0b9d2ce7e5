//! Capability-scoped file access helpers.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use std::io;

/// Opens the directory containing `path` and returns it with the file name.
///
/// A bare file name resolves against the working directory.
pub(crate) fn open_parent(path: &Utf8Path) -> io::Result<(Dir, String)> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{path}' does not name a file"),
        )
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name.to_owned()))
}
