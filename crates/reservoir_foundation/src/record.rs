//! The reservoir record.
//!
//! A [`Reservoir`] is a plain owned value. Collections take records by value,
//! so a stored record never aliases the caller's copy.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One reservoir: a name, three dimensions, and a free-form type tag.
///
/// Dimensions are not validated. Negative, zero, infinite and NaN values are
/// stored as given and flow through the derived measurements unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reservoir {
    name: String,
    width: f64,
    length: f64,
    max_depth: f64,
    kind: String,
}

impl Reservoir {
    /// Creates a new reservoir record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        width: f64,
        length: f64,
        max_depth: f64,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            width,
            length,
            max_depth,
            kind: kind.into(),
        }
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the width.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Replaces the width.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    /// Returns the length.
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Replaces the length.
    pub fn set_length(&mut self, length: f64) {
        self.length = length;
    }

    /// Returns the maximum depth.
    #[must_use]
    pub const fn max_depth(&self) -> f64 {
        self.max_depth
    }

    /// Replaces the maximum depth.
    pub fn set_max_depth(&mut self, max_depth: f64) {
        self.max_depth = max_depth;
    }

    /// Returns the type tag ("lake", "sea", ...).
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Replaces the type tag.
    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.kind = kind.into();
    }

    /// Surface area: `width * length`.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.width * self.length
    }

    /// Volume: `width * length * max_depth`.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.width * self.length * self.max_depth
    }

    /// Returns true if both records carry byte-identical type tags.
    #[must_use]
    pub fn same_type(&self, other: &Self) -> bool {
        self.kind == other.kind
    }

    /// Returns true if `self` has the strictly larger surface area.
    ///
    /// Records of different types are incomparable, so this returns `false`
    /// for them whatever their areas are.
    #[must_use]
    pub fn has_larger_surface_area(&self, other: &Self) -> bool {
        self.same_type(other) && self.surface_area() > other.surface_area()
    }
}

impl fmt::Display for Reservoir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} x {} x {}",
            self.name, self.kind, self.width, self.length, self.max_depth
        )
    }
}
