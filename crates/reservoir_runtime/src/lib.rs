//! Command shell, console display, and snapshots for the reservoir registry.
//!
//! This crate provides:
//! - [`Shell`] - Interactive and scripted command shell
//! - [`Session`] - The collection and settings a shell operates on
//! - [`display`] - Console rendering of records
//! - [`snapshot`] - `MessagePack` snapshots of a whole collection

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod config;
pub mod display;
pub mod editor;
pub mod shell;
pub mod snapshot;

pub use command::Command;
pub use config::ShellConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use shell::{DEMO_STEPS, DemoStep, Outcome, Session, Shell};
