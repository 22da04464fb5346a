//! Collection snapshots using `MessagePack`.
//!
//! A snapshot keeps the whole collection, capacity included, so a reloaded
//! session continues growing from where it left off. Unlike the binary
//! export, the snapshot format is self-describing.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use reservoir_foundation::{Error, ErrorKind, Result};
use reservoir_storage::ReservoirCollection;
use tracing::info;

/// Serializes a collection to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(collection: &ReservoirCollection) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(collection)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes a collection from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<ReservoirCollection> {
    rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Saves a collection snapshot to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(collection: &ReservoirCollection, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(collection)?;

    let file = File::create(path).map_err(|e| {
        Error::io(format!("failed to create file '{}': {e}", path.display()))
    })?;

    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes).map_err(|e| {
        Error::io(format!("failed to write to file '{}': {e}", path.display()))
    })?;

    writer.flush().map_err(|e| {
        Error::io(format!("failed to flush file '{}': {e}", path.display()))
    })?;

    info!(path = %path.display(), records = collection.len(), "saved snapshot");
    Ok(())
}

/// Loads a collection snapshot from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ReservoirCollection> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::io(format!("failed to open file '{}': {e}", path.display()))
    })?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();

    reader.read_to_end(&mut bytes).map_err(|e| {
        Error::io(format!("failed to read file '{}': {e}", path.display()))
    })?;

    let collection = from_bytes(&bytes)?;
    info!(path = %path.display(), records = collection.len(), "loaded snapshot");
    Ok(collection)
}
