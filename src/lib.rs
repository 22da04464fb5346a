//! Reservoir registry
//!
//! This crate re-exports all layers of the reservoir registry for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: reservoir_runtime    | command shell, console display, snapshots, CLI
//! Layer 1: reservoir_storage    | collection, binary codec, text dump, file export
//! Layer 0: reservoir_foundation | Reservoir record, Error
//! ```

pub use reservoir_foundation as foundation;
pub use reservoir_runtime as runtime;
pub use reservoir_storage as storage;
