//! Integration tests for Layer 1: Storage
//!
//! Tests for the reservoir collection, binary codec, and file exports.

mod binary;
mod export;
