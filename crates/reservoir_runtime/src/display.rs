//! Console rendering of reservoirs.

use std::fmt::Write;

use reservoir_foundation::Reservoir;
use reservoir_storage::ReservoirCollection;

/// Rule printed after each record in a listing.
pub const SEPARATOR: &str = "--------------------------";

/// Renders one record as a labelled block, derived measurements included.
#[must_use]
pub fn render_reservoir(record: &Reservoir) -> String {
    let name = if record.name().is_empty() {
        "Unnamed"
    } else {
        record.name()
    };

    let mut out = String::new();
    let _ = writeln!(out, "Name: {name}");
    let _ = writeln!(out, "Width: {}", record.width());
    let _ = writeln!(out, "Length: {}", record.length());
    let _ = writeln!(out, "Max depth: {}", record.max_depth());
    let _ = writeln!(out, "Type: {}", record.kind());
    let _ = writeln!(out, "Volume: {}", record.volume());
    let _ = writeln!(out, "Surface area: {}", record.surface_area());
    out
}

/// Renders every record, each followed by [`SEPARATOR`].
#[must_use]
pub fn render_collection(collection: &ReservoirCollection) -> String {
    let mut out = String::new();
    for (index, record) in collection.iter().enumerate() {
        let _ = writeln!(out, "#{index}");
        out.push_str(&render_reservoir(record));
        out.push_str(SEPARATOR);
        out.push('\n');
    }
    out
}
