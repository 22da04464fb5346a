//! Integration tests for Error types
//!
//! Tests error construction, display, and context.

use reservoir_foundation::{Error, ErrorContext, ErrorKind};

#[test]
fn error_display_index_out_of_bounds() {
    let err = Error::index_out_of_bounds(7, 2);
    assert_eq!(format!("{err}"), "index out of bounds: 7 (length 2)");
}

#[test]
fn error_display_io() {
    let err = Error::io("failed to open file 'x.bin'");
    assert!(matches!(err.kind, ErrorKind::IoError(_)));
    assert!(format!("{err}").contains("x.bin"));
}

#[test]
fn error_display_invalid_utf8() {
    let err = Error::new(ErrorKind::InvalidUtf8 {
        offset: 12,
        field: "type",
    });
    assert_eq!(format!("{err}"), "invalid UTF-8 in type at byte 12");
}

#[test]
fn error_display_length_overflow() {
    let err = Error::new(ErrorKind::LengthOverflow {
        field: "name",
        length: 5_000_000_000,
        max: u64::from(u32::MAX),
    });
    let msg = format!("{err}");
    assert!(msg.contains("name"));
    assert!(msg.contains("5000000000"));
}

#[test]
fn context_is_optional() {
    let err = Error::invalid_command("nope");
    assert!(err.context.is_none());

    let err = err.with_context(ErrorContext::new().with_source("demo"));
    assert_eq!(format!("{}", err.context.unwrap()), "at demo");
}

#[test]
fn errors_are_std_errors() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<Error>();
}
