//! Integration tests for the binary export format
//!
//! Tests the byte layout, decoding, and failure modes of binary dumps.

use reservoir_foundation::{ErrorKind, Reservoir};
use reservoir_storage::{BinaryCodec, BinaryLayout, ReservoirCollection};

fn sample() -> ReservoirCollection {
    [
        Reservoir::new("Pacific", 200.0, 400.0, 30.5, "ocean"),
        Reservoir::new("", 0.0, -1.0, f64::INFINITY, ""),
    ]
    .into_iter()
    .collect()
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn portable_record_bytes() {
    let record = Reservoir::new("ab", 1.0, 2.0, 3.0, "c");
    let bytes = BinaryCodec::new(BinaryLayout::portable())
        .encode([&record])
        .unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(&2u32.to_le_bytes());
    expected.extend_from_slice(b"ab");
    expected.extend_from_slice(&1.0f64.to_le_bytes());
    expected.extend_from_slice(&2.0f64.to_le_bytes());
    expected.extend_from_slice(&3.0f64.to_le_bytes());
    expected.extend_from_slice(&1u32.to_le_bytes());
    expected.extend_from_slice(b"c");
    assert_eq!(bytes, expected);
}

#[test]
fn native_length_prefix_is_word_sized() {
    let record = Reservoir::new("", 0.0, 0.0, 0.0, "");
    let bytes = BinaryCodec::default().encode([&record]).unwrap();
    assert_eq!(bytes.len(), 2 * size_of::<usize>() + 3 * size_of::<f64>());
}

#[test]
fn records_are_concatenated_without_header() {
    let collection = sample();
    let layout = BinaryLayout::portable();
    let bytes = BinaryCodec::new(layout).encode(&collection).unwrap();
    let expected: usize = collection
        .iter()
        .map(|r| layout.record_size(r.name().len(), r.kind().len()))
        .sum();
    assert_eq!(bytes.len(), expected);
}

#[test]
fn empty_collection_is_empty_stream() {
    let bytes = BinaryCodec::default()
        .encode(&ReservoirCollection::new())
        .unwrap();
    assert!(bytes.is_empty());
}

// =============================================================================
// Decoding
// =============================================================================

#[test]
fn decode_preserves_bits() {
    let collection = sample();
    for layout in [BinaryLayout::native(), BinaryLayout::portable()] {
        let codec = BinaryCodec::new(layout);
        let decoded = codec.decode(&codec.encode(&collection).unwrap()).unwrap();
        assert_eq!(decoded.len(), 2);
        for (a, b) in decoded.iter().zip(collection.iter()) {
            assert_eq!(a.name(), b.name());
            assert_eq!(a.kind(), b.kind());
            assert_eq!(a.width().to_bits(), b.width().to_bits());
            assert_eq!(a.length().to_bits(), b.length().to_bits());
            assert_eq!(a.max_depth().to_bits(), b.max_depth().to_bits());
        }
    }
}

#[test]
fn truncated_stream_is_rejected() {
    let codec = BinaryCodec::new(BinaryLayout::portable());
    let bytes = codec.encode(&sample()).unwrap();
    let err = codec.decode(&bytes[..bytes.len() - 1]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TruncatedRecord { .. }));
}

#[test]
fn invalid_utf8_name_is_rejected() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.push(0xFF);
    bytes.extend_from_slice(&[0; 24]);
    bytes.extend_from_slice(&0u32.to_le_bytes());

    let err = BinaryCodec::new(BinaryLayout::portable())
        .decode(&bytes)
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidUtf8 { offset: 4, .. }
    ));
}

#[test]
fn reader_yields_records_before_failure() {
    let codec = BinaryCodec::new(BinaryLayout::portable());
    let mut bytes = codec.encode(&sample()).unwrap();
    bytes.extend_from_slice(&[1, 2, 3]);

    let results: Vec<_> = codec.reader(&bytes).collect();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(results[2].is_err());
}
