//! Reservoir storage and persistence.
//!
//! This crate provides:
//! - [`ReservoirCollection`] - Ordered, growable collection with doubling growth
//! - [`BinaryCodec`] - The length-prefixed binary record format
//! - [`TextDump`] - The one-field-per-line text dump
//! - File export and import helpers in [`export`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod codec;
pub mod collection;
pub mod export;

pub use codec::{BinaryCodec, BinaryLayout, ByteOrder, LengthWidth, RecordReader, TextDump};
pub use collection::{INITIAL_CAPACITY, ReservoirCollection};
pub use export::{export_binary_file, export_text_file, import_binary_file};
