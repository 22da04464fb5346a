//! Exporting collections to files and reading binary dumps back.
//!
//! Exports encode the whole collection in memory, write it to a temporary
//! file next to the destination, then rename it into place. A failed export
//! never leaves a partial destination file behind.
//!
//! The rename replaces the destination file rather than rewriting it, so the
//! directory must be writable even when the destination already is, and the
//! new file does not inherit the old one's permissions or hard links.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use reservoir_foundation::{Error, Result};
use tracing::{info, warn};

use crate::codec::{BinaryCodec, BinaryLayout, TextDump};
use crate::collection::ReservoirCollection;

/// Writes `collection` to `path` in the binary format.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns `LengthOverflow` if a record does not fit the layout, or
/// `IoError` if the file cannot be created or written. In both cases the
/// destination is left as it was. The staging file is created in the
/// destination's directory, which must therefore be writable.
pub fn export_binary_file<P: AsRef<Path>>(
    collection: &ReservoirCollection,
    path: P,
    layout: BinaryLayout,
) -> Result<usize> {
    let path = path.as_ref();
    let bytes = BinaryCodec::new(layout).encode(collection)?;
    write_replacing(path, &bytes)?;
    info!(
        path = %path.display(),
        records = collection.len(),
        bytes = bytes.len(),
        "exported binary dump"
    );
    Ok(bytes.len())
}

/// Writes `collection` to `path` as a text dump.
///
/// # Errors
///
/// Returns `IoError` if the file cannot be created or written. The
/// destination is left as it was. As with [`export_binary_file`], the
/// destination is replaced by a new file in the same directory.
pub fn export_text_file<P: AsRef<Path>>(collection: &ReservoirCollection, path: P) -> Result<()> {
    let path = path.as_ref();
    let text = TextDump::render(collection);
    write_replacing(path, text.as_bytes())?;
    info!(
        path = %path.display(),
        records = collection.len(),
        "exported text dump"
    );
    Ok(())
}

/// Reads a binary dump into a new collection.
///
/// The format has no record count, so a file truncated exactly between two
/// records reads back as the records before the cut.
///
/// # Errors
///
/// Returns `IoError` if the file cannot be read, or a decode error if the
/// contents are not a valid dump for `layout`.
pub fn import_binary_file<P: AsRef<Path>>(
    path: P,
    layout: BinaryLayout,
) -> Result<ReservoirCollection> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::io(format!("failed to open file '{}': {e}", path.display()))
    })?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|e| {
        Error::io(format!("failed to read file '{}': {e}", path.display()))
    })?;

    let collection: ReservoirCollection =
        BinaryCodec::new(layout).decode(&bytes)?.into_iter().collect();
    info!(
        path = %path.display(),
        records = collection.len(),
        "imported binary dump"
    );
    Ok(collection)
}

/// Temporary sibling used while writing `path`.
fn staging_path(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| Error::io(format!("'{}' is not a file path", path.display())))?;
    let mut staged = name.to_os_string();
    staged.push(".partial");
    Ok(path.with_file_name(staged))
}

/// Writes `bytes` to `path` through a staging file and a rename.
fn write_replacing(path: &Path, bytes: &[u8]) -> Result<()> {
    let staged = staging_path(path)?;
    if let Err(e) = write_file(&staged, bytes) {
        let _ = fs::remove_file(&staged);
        warn!(path = %path.display(), error = %e, "export failed");
        return Err(e);
    }
    fs::rename(&staged, path).map_err(|e| {
        let _ = fs::remove_file(&staged);
        Error::io(format!(
            "failed to move '{}' into place: {e}",
            path.display()
        ))
    })
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        Error::io(format!("failed to create file '{}': {e}", path.display()))
    })?;

    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(|e| {
        Error::io(format!("failed to write to file '{}': {e}", path.display()))
    })?;

    writer.flush().map_err(|e| {
        Error::io(format!("failed to flush file '{}': {e}", path.display()))
    })?;

    Ok(())
}
