//! Length-prefixed binary records.
//!
//! Each record is written as:
//!
//! ```text
//! name length | name bytes | width | length | max depth | type length | type bytes
//! ```
//!
//! There is no header, footer, or record count; a reader consumes records
//! until the input is exhausted. A stream cut exactly between two records
//! therefore decodes cleanly to the records before the cut. The width of the length prefixes and the
//! byte order of every number come from a [`BinaryLayout`].
//!
//! [`BinaryLayout::native`] uses word-sized lengths and the platform byte
//! order, so its files only read back on the same kind of platform.
//! [`BinaryLayout::portable`] fixes little-endian numbers and 32-bit lengths.

use std::io::{self, Write};

use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian, WriteBytesExt};
use reservoir_foundation::{Error, ErrorKind, Reservoir, Result};

const F64_SIZE: usize = 8;

/// Byte order of every number in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

impl ByteOrder {
    /// The byte order of the current platform.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }
}

/// Width of the length prefix written before each text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthWidth {
    /// 4-byte unsigned length.
    U32,
    /// 8-byte unsigned length.
    U64,
}

impl LengthWidth {
    /// The pointer width of the current platform.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_pointer_width = "64") {
            Self::U64
        } else {
            Self::U32
        }
    }

    /// Number of bytes in the prefix.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }

    /// Largest length the prefix can hold.
    #[must_use]
    pub const fn max(self) -> u64 {
        match self {
            Self::U32 => u32::MAX as u64,
            Self::U64 => u64::MAX,
        }
    }
}

/// Byte order and length width of a binary stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryLayout {
    /// Byte order of lengths and floats.
    pub byte_order: ByteOrder,
    /// Width of the name and type length prefixes.
    pub length_width: LengthWidth,
}

impl Default for BinaryLayout {
    fn default() -> Self {
        Self::native()
    }
}

impl BinaryLayout {
    /// Platform byte order and word-sized lengths.
    #[must_use]
    pub const fn native() -> Self {
        Self {
            byte_order: ByteOrder::native(),
            length_width: LengthWidth::native(),
        }
    }

    /// Little-endian with 32-bit lengths, identical on every platform.
    #[must_use]
    pub const fn portable() -> Self {
        Self {
            byte_order: ByteOrder::Little,
            length_width: LengthWidth::U32,
        }
    }

    /// Encoded size of one record with the given text lengths.
    #[must_use]
    pub const fn record_size(self, name_len: usize, kind_len: usize) -> usize {
        2 * self.length_width.size() + name_len + kind_len + 3 * F64_SIZE
    }
}

/// Encoder and decoder for the binary record format.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec {
    layout: BinaryLayout,
}

impl BinaryCodec {
    /// Creates a codec for the given layout.
    #[must_use]
    pub const fn new(layout: BinaryLayout) -> Self {
        Self { layout }
    }

    /// Returns the layout in use.
    #[must_use]
    pub const fn layout(&self) -> BinaryLayout {
        self.layout
    }

    /// Encodes all records, in iteration order, into one buffer.
    ///
    /// # Errors
    ///
    /// Returns `LengthOverflow` if a name or type is too long for the layout.
    pub fn encode<'a, I>(&self, records: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = &'a Reservoir>,
    {
        let mut out = Vec::new();
        for record in records {
            self.encode_record(record, &mut out)?;
        }
        Ok(out)
    }

    /// Appends one encoded record to `out`.
    ///
    /// On error nothing is appended.
    ///
    /// # Errors
    ///
    /// Returns `LengthOverflow` if a name or type is too long for the layout.
    pub fn encode_record(&self, record: &Reservoir, out: &mut Vec<u8>) -> Result<()> {
        let name_len = self.checked_length("name", record.name())?;
        let kind_len = self.checked_length("type", record.kind())?;

        let start = out.len();
        out.reserve(self.layout.record_size(record.name().len(), record.kind().len()));
        let written = match self.layout.byte_order {
            ByteOrder::Little => self.write_record::<LittleEndian>(record, name_len, kind_len, out),
            ByteOrder::Big => self.write_record::<BigEndian>(record, name_len, kind_len, out),
        };
        written.map_err(|e| {
            out.truncate(start);
            Error::io(format!("failed to encode '{}': {e}", record.name()))
        })
    }

    /// Decodes every record in `bytes`.
    ///
    /// # Errors
    ///
    /// Returns `TruncatedRecord` if the input ends inside a record, or
    /// `InvalidUtf8` if a name or type is not valid UTF-8.
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<Reservoir>> {
        self.reader(bytes).collect()
    }

    /// Returns a streaming reader over the records in `bytes`.
    #[must_use]
    pub fn reader<'a>(&self, bytes: &'a [u8]) -> RecordReader<'a> {
        RecordReader::new(bytes, self.layout)
    }

    fn checked_length(&self, field: &'static str, text: &str) -> Result<u64> {
        let max = self.layout.length_width.max();
        u64::try_from(text.len())
            .ok()
            .filter(|&length| length <= max)
            .ok_or_else(|| {
                Error::new(ErrorKind::LengthOverflow {
                    field,
                    length: text.len(),
                    max,
                })
            })
    }

    fn write_record<B: Endian>(
        &self,
        record: &Reservoir,
        name_len: u64,
        kind_len: u64,
        out: &mut Vec<u8>,
    ) -> io::Result<()> {
        self.write_length::<B>(name_len, out)?;
        out.write_all(record.name().as_bytes())?;
        out.write_f64::<B>(record.width())?;
        out.write_f64::<B>(record.length())?;
        out.write_f64::<B>(record.max_depth())?;
        self.write_length::<B>(kind_len, out)?;
        out.write_all(record.kind().as_bytes())
    }

    fn write_length<B: Endian>(&self, length: u64, out: &mut Vec<u8>) -> io::Result<()> {
        match self.layout.length_width {
            LengthWidth::U32 => {
                let length = u32::try_from(length)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
                out.write_u32::<B>(length)
            }
            LengthWidth::U64 => out.write_u64::<B>(length),
        }
    }
}

/// Streaming decoder over a byte slice.
///
/// Yields one `Result` per record. After the first error the reader is
/// exhausted. Input that ends on a record boundary is indistinguishable from
/// a complete stream.
#[derive(Debug, Clone)]
pub struct RecordReader<'a> {
    bytes: &'a [u8],
    offset: usize,
    layout: BinaryLayout,
    failed: bool,
}

impl<'a> RecordReader<'a> {
    /// Creates a reader over `bytes` using `layout`.
    #[must_use]
    pub const fn new(bytes: &'a [u8], layout: BinaryLayout) -> Self {
        Self {
            bytes,
            offset: 0,
            layout,
            failed: false,
        }
    }

    /// Byte offset of the next unread record.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    fn read_record<B: Endian>(&mut self) -> Result<Reservoir> {
        let name = self.read_text::<B>("name")?;
        let width = B::read_f64(self.take(F64_SIZE)?);
        let length = B::read_f64(self.take(F64_SIZE)?);
        let max_depth = B::read_f64(self.take(F64_SIZE)?);
        let kind = self.read_text::<B>("type")?;
        Ok(Reservoir::new(name, width, length, max_depth, kind))
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8]> {
        let available = self.bytes.len() - self.offset;
        if needed > available {
            return Err(Error::truncated(self.offset, needed, available));
        }
        let start = self.offset;
        self.offset += needed;
        Ok(&self.bytes[start..self.offset])
    }

    fn read_length<B: Endian>(&mut self) -> Result<usize> {
        let width = self.layout.length_width;
        let bytes = self.take(width.size())?;
        let value = match width {
            LengthWidth::U32 => u64::from(B::read_u32(bytes)),
            LengthWidth::U64 => B::read_u64(bytes),
        };
        // A length that does not fit in memory can never be satisfied by the input.
        Ok(usize::try_from(value).unwrap_or(usize::MAX))
    }

    fn read_text<B: Endian>(&mut self, field: &'static str) -> Result<String> {
        let length = self.read_length::<B>()?;
        let offset = self.offset;
        let bytes = self.take(length)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| Error::new(ErrorKind::InvalidUtf8 { offset, field }))
    }
}

impl Iterator for RecordReader<'_> {
    type Item = Result<Reservoir>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.bytes.len() {
            return None;
        }
        let record = match self.layout.byte_order {
            ByteOrder::Little => self.read_record::<LittleEndian>(),
            ByteOrder::Big => self.read_record::<BigEndian>(),
        };
        self.failed = record.is_err();
        Some(record)
    }
}
