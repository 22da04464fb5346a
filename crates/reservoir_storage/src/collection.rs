//! Ordered reservoir storage with doubling growth.
//!
//! `ReservoirCollection` keeps its own logical capacity on top of a `Vec` so
//! that growth is observable and deterministic: when an append finds the
//! collection full, capacity doubles before the record is stored.

use std::io::Write;

use reservoir_foundation::{Error, Reservoir, Result};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::codec::{BinaryCodec, BinaryLayout, TextDump};

/// Capacity of a collection created with [`ReservoirCollection::new`].
pub const INITIAL_CAPACITY: usize = 10;

/// An ordered, index-addressable collection of reservoirs.
///
/// Records are owned by the collection. Elements are never handed out by
/// mutable reference; use [`replace`](Self::replace) or remove-then-append to
/// change a stored record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "CollectionRepr"))]
pub struct ReservoirCollection {
    /// Stored records, in index order.
    records: Vec<Reservoir>,
    /// Logical capacity. Always `>= records.len()` and never decreases.
    capacity: usize,
}

/// Deserialization shape that restores `len <= capacity` on load.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct CollectionRepr {
    records: Vec<Reservoir>,
    capacity: usize,
}

#[cfg(feature = "serde")]
impl From<CollectionRepr> for ReservoirCollection {
    fn from(repr: CollectionRepr) -> Self {
        let capacity = repr.capacity.max(repr.records.len());
        Self {
            records: repr.records,
            capacity,
        }
    }
}

impl Default for ReservoirCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservoirCollection {
    /// Creates an empty collection with [`INITIAL_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty collection with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a record at the end, doubling capacity first if full.
    pub fn append(&mut self, record: Reservoir) {
        if self.records.len() == self.capacity {
            self.grow();
        }
        self.records.push(record);
    }

    /// Doubles the logical capacity. Allocation failure aborts the process.
    fn grow(&mut self) {
        let new_capacity = self.capacity.saturating_mul(2).max(1);
        debug!(
            from = self.capacity,
            to = new_capacity,
            "growing reservoir collection"
        );
        self.records.reserve_exact(new_capacity - self.records.len());
        self.capacity = new_capacity;
    }

    /// Removes the record at `index`, shifting later records down by one.
    ///
    /// An out-of-range index is silently ignored: nothing changes and `false`
    /// is returned. Use [`try_remove`](Self::try_remove) to get an error
    /// instead.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.records.len() {
            return false;
        }
        self.records.remove(index);
        debug!(index, len = self.records.len(), "removed reservoir");
        true
    }

    /// Removes and returns the record at `index`.
    ///
    /// Stricter than [`remove_at`](Self::remove_at): an out-of-range index is
    /// reported rather than ignored.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index >= len()`.
    pub fn try_remove(&mut self, index: usize) -> Result<Reservoir> {
        if index >= self.records.len() {
            return Err(Error::index_out_of_bounds(index, self.records.len()));
        }
        Ok(self.records.remove(index))
    }

    /// Replaces the record at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index >= len()`; the collection is left
    /// unchanged.
    pub fn replace(&mut self, index: usize, record: Reservoir) -> Result<Reservoir> {
        let length = self.records.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or_else(|| Error::index_out_of_bounds(index, length))?;
        Ok(std::mem::replace(slot, record))
    }

    /// Returns the record at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Reservoir> {
        self.records.get(index)
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the logical capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over the records in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Reservoir> {
        self.records.iter()
    }

    /// Returns the records as a slice, in index order.
    #[must_use]
    pub fn as_slice(&self) -> &[Reservoir] {
        &self.records
    }

    /// Writes every record to `sink` in the binary format.
    ///
    /// The whole stream is encoded before anything is written, so an encoding
    /// failure leaves the sink untouched. A sink that fails partway through
    /// may already hold a prefix of the stream. Returns the number of bytes
    /// written.
    ///
    /// # Errors
    ///
    /// Returns `LengthOverflow` if a text field does not fit the layout, or
    /// `IoError` if the sink rejects the write.
    pub fn export_binary<W: Write>(&self, sink: &mut W, layout: BinaryLayout) -> Result<usize> {
        let bytes = BinaryCodec::new(layout).encode(self.iter())?;
        sink.write_all(&bytes)
            .map_err(|e| Error::io(format!("failed to write binary export: {e}")))?;
        Ok(bytes.len())
    }

    /// Writes every record to `sink` as a text dump.
    ///
    /// As with [`export_binary`](Self::export_binary), a sink that fails
    /// partway through may hold a prefix of the dump.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the sink rejects the write.
    pub fn export_text<W: Write>(&self, sink: &mut W) -> Result<()> {
        let text = TextDump::render(self.iter());
        sink.write_all(text.as_bytes())
            .map_err(|e| Error::io(format!("failed to write text export: {e}")))
    }
}

impl FromIterator<Reservoir> for ReservoirCollection {
    fn from_iter<I: IntoIterator<Item = Reservoir>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl Extend<Reservoir> for ReservoirCollection {
    fn extend<I: IntoIterator<Item = Reservoir>>(&mut self, iter: I) {
        for record in iter {
            self.append(record);
        }
    }
}

impl IntoIterator for ReservoirCollection {
    type Item = Reservoir;
    type IntoIter = std::vec::IntoIter<Reservoir>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReservoirCollection {
    type Item = &'a Reservoir;
    type IntoIter = std::slice::Iter<'a, Reservoir>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
