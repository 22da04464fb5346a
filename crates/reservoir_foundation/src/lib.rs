//! Core types for the reservoir registry.
//!
//! This crate provides:
//! - [`Reservoir`] - One reservoir record with its derived measurements
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod record;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use record::Reservoir;
