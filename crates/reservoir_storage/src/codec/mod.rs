//! Encodings for exporting reservoir records.
//!
//! - [`binary`] - Length-prefixed binary records, read back by [`RecordReader`]
//! - [`text`] - One field per line, write-only

pub mod binary;
pub mod text;

pub use binary::{BinaryCodec, BinaryLayout, ByteOrder, LengthWidth, RecordReader};
pub use text::TextDump;
