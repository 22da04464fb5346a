//! One-field-per-line text dump.
//!
//! Every record becomes five lines: name, width, length, max depth, type.
//! Records follow each other with no separator.

use std::fmt::Write;

use reservoir_foundation::Reservoir;

/// Renders reservoirs as a text dump.
pub struct TextDump;

impl TextDump {
    /// Renders all records, in iteration order.
    #[must_use]
    pub fn render<'a, I>(records: I) -> String
    where
        I: IntoIterator<Item = &'a Reservoir>,
    {
        let mut out = String::new();
        for record in records {
            Self::render_record(record, &mut out);
        }
        out
    }

    /// Appends one record's five lines to `out`.
    pub fn render_record(record: &Reservoir, out: &mut String) {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", record.name());
        let _ = writeln!(out, "{}", record.width());
        let _ = writeln!(out, "{}", record.length());
        let _ = writeln!(out, "{}", record.max_depth());
        let _ = writeln!(out, "{}", record.kind());
    }
}
