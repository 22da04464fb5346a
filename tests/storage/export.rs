//! Integration tests for file exports
//!
//! Tests writing text and binary dumps to disk and reading binary dumps back.

use std::fs;
use std::path::PathBuf;

use reservoir_foundation::{ErrorKind, Reservoir};
use reservoir_storage::{
    BinaryLayout, ReservoirCollection, export_binary_file, export_text_file, import_binary_file,
};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("reservoir_storage_it_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn sample() -> ReservoirCollection {
    [
        Reservoir::new("Pacific", 200.0, 400.0, 30.5, "ocean"),
        Reservoir::new("Black Sea", 100.0, 200.0, 20.0, "sea"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn text_file_lists_fields_one_per_line() {
    let path = scratch("dump.txt");
    export_text_file(&sample(), &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "Pacific\n200\n400\n30.5\nocean\nBlack Sea\n100\n200\n20\nsea\n"
    );
    fs::remove_file(&path).unwrap();
}

#[test]
fn text_export_overwrites_existing_file() {
    let path = scratch("overwrite.txt");
    fs::write(&path, "stale contents that are much longer than the new dump\n").unwrap();

    export_text_file(&ReservoirCollection::new(), &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    fs::remove_file(&path).unwrap();
}

#[test]
fn binary_file_roundtrip() {
    let path = scratch("dump.bin");
    let collection = sample();
    for layout in [BinaryLayout::native(), BinaryLayout::portable()] {
        let written = export_binary_file(&collection, &path, layout).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), written as u64);

        let loaded = import_binary_file(&path, layout).unwrap();
        assert_eq!(loaded.as_slice(), collection.as_slice());
    }
    fs::remove_file(&path).unwrap();
}

#[test]
fn export_to_missing_directory_fails() {
    let path = scratch("missing").join("nested").join("dump.bin");
    let err = export_binary_file(&sample(), &path, BinaryLayout::native()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IoError(_)));
    assert!(!path.exists());
}

#[test]
fn import_missing_file_fails() {
    let err = import_binary_file(scratch("does_not_exist.bin"), BinaryLayout::native()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IoError(_)));
}

#[test]
fn import_truncated_file_fails() {
    let path = scratch("truncated.bin");
    export_binary_file(&sample(), &path, BinaryLayout::portable()).unwrap();
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 1]).unwrap();

    let err = import_binary_file(&path, BinaryLayout::portable()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TruncatedRecord { .. }));
    fs::remove_file(&path).unwrap();
}

#[test]
fn import_cut_on_record_boundary_reads_prefix() {
    // Without a record count, a cut between records looks like a shorter dump.
    let path = scratch("boundary.bin");
    let layout = BinaryLayout::portable();
    let collection = sample();
    export_binary_file(&collection, &path, layout).unwrap();

    let first = collection.get(0).unwrap();
    let first_len = layout.record_size(first.name().len(), first.kind().len());
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..first_len]).unwrap();

    let loaded = import_binary_file(&path, layout).unwrap();
    assert_eq!(loaded.as_slice(), &collection.as_slice()[..1]);
    fs::remove_file(&path).unwrap();
}
