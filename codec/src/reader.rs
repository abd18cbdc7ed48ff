//! Cursor-based decoder.

use crate::{
    pack::{unpack, Endian, FixedWidth},
    varint::{self, UInt},
    Error, RangeCfg, Serializable, Writer, U256,
};
use bytes::Bytes;
use podwire_utils::{from_hex, hex};
use std::{
    fmt::{Display, Formatter},
    ops::{Bound, RangeBounds},
    str::FromStr,
};
use tracing::{debug, trace};

/// Replays an encoded message through a cursor.
///
/// Values must be read with the same sequence of typed calls used to write them. Reading out of
/// order is not detected: it yields wrong values or [Error::EndOfBuffer], never a format error.
///
/// Every read accepts a `peek` flag. When set, the value is returned but the cursor does not move.
/// A read that fails leaves the cursor where it was.
#[derive(Clone, Debug, Default)]
pub struct Reader {
    buffer: Bytes,
    offset: usize,
    items: RangeCfg<usize>,
}

impl Reader {
    /// Creates a reader positioned at the start of `buffer`.
    pub fn new(buffer: impl Into<Bytes>) -> Self {
        Self {
            buffer: buffer.into(),
            offset: 0,
            items: RangeCfg::default(),
        }
    }

    /// Creates a reader over the bytes decoded from `text`.
    pub fn from_hex(text: &str) -> Result<Self, Error> {
        Ok(Self::new(from_hex(text)?))
    }

    /// Limits the element count accepted by composite reads.
    ///
    /// Counts outside `items` fail with [Error::InvalidLength].
    pub fn with_items(mut self, items: impl Into<RangeCfg<usize>>) -> Self {
        self.items = items.into();
        self
    }

    pub fn boolean(&mut self, peek: bool) -> Result<bool, Error> {
        Ok(self.uint8(peek)? == 1)
    }

    pub fn uint8(&mut self, peek: bool) -> Result<u8, Error> {
        self.fixed(peek, Endian::Little)
    }

    pub fn uint16(&mut self, peek: bool, endian: Endian) -> Result<u16, Error> {
        self.fixed(peek, endian)
    }

    pub fn uint32(&mut self, peek: bool, endian: Endian) -> Result<u32, Error> {
        self.fixed(peek, endian)
    }

    pub fn uint64(&mut self, peek: bool, endian: Endian) -> Result<u64, Error> {
        self.fixed(peek, endian)
    }

    pub fn uint128(&mut self, peek: bool, endian: Endian) -> Result<u128, Error> {
        self.fixed(peek, endian)
    }

    pub fn uint256(&mut self, peek: bool, endian: Endian) -> Result<U256, Error> {
        self.fixed(peek, endian)
    }

    /// Reads a value packed to its full width.
    pub fn fixed<T: FixedWidth>(&mut self, peek: bool, endian: Endian) -> Result<T, Error> {
        let value = unpack(&self.buffer, self.offset, endian)?;
        if !peek {
            self.offset += T::SIZE;
        }
        Ok(value)
    }

    /// Reads `count` raw bytes.
    pub fn bytes(&mut self, count: usize, peek: bool) -> Result<Bytes, Error> {
        let end = self.offset.checked_add(count).ok_or(Error::EndOfBuffer)?;
        if end > self.buffer.len() {
            return Err(Error::EndOfBuffer);
        }
        let data = self.buffer.slice(self.offset..end);
        if !peek {
            self.offset = end;
        }
        Ok(data)
    }

    /// Reads `length` raw bytes and returns them as hex.
    pub fn hex(&mut self, length: usize, peek: bool) -> Result<String, Error> {
        Ok(hex(&self.bytes(length, peek)?))
    }

    pub fn varint<T: UInt>(&mut self, peek: bool) -> Result<T, Error> {
        let (value, len) = varint::decode(&self.buffer, self.offset)?;
        if !peek {
            self.offset += len;
        }
        Ok(value)
    }

    /// Reads a count followed by that many varints.
    pub fn varint_vec<T: UInt>(&mut self, peek: bool) -> Result<Vec<T>, Error> {
        self.restoring(peek, |reader| {
            let count = reader.count()?;
            let mut values = Vec::with_capacity(reader.capacity_hint(count));
            for _ in 0..count {
                values.push(reader.varint::<T>(false)?);
            }
            Ok(values)
        })
    }

    /// Reads a serializable value.
    pub fn pod<T: Serializable>(&mut self, peek: bool) -> Result<T, Error> {
        self.restoring(peek, T::deserialize)
    }

    /// Reads a count followed by that many serializable values.
    pub fn pod_vec<T: Serializable>(&mut self, peek: bool) -> Result<Vec<T>, Error> {
        self.restoring(peek, |reader| {
            let count = reader.count()?;
            let mut values = Vec::with_capacity(reader.capacity_hint(count));
            for _ in 0..count {
                let start = reader.offset;
                values.push(T::deserialize(reader)?);
                if reader.offset == start {
                    reader.check_unconsumed(count)?;
                }
            }
            Ok(values)
        })
    }

    /// Reads an outer count followed by that many count-prefixed lists.
    pub fn pod_vec_vec<T: Serializable>(&mut self, peek: bool) -> Result<Vec<Vec<T>>, Error> {
        self.restoring(peek, |reader| {
            let count = reader.count()?;
            let mut values = Vec::with_capacity(reader.capacity_hint(count));
            for _ in 0..count {
                values.push(reader.pod_vec::<T>(false)?);
            }
            Ok(values)
        })
    }

    // Runs `read`, rewinding the cursor afterwards when peeking or on failure.
    fn restoring<T>(
        &mut self,
        peek: bool,
        read: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let start = self.offset;
        let result = read(self);
        if peek || result.is_err() {
            self.offset = start;
        }
        result
    }

    fn count(&mut self) -> Result<usize, Error> {
        let count = self.varint::<u64>(false)?;
        let count = usize::try_from(count).map_err(|_| Error::InvalidVarint)?;
        if !self.items.contains(&count) {
            return Err(Error::InvalidLength(count));
        }
        Ok(count)
    }

    // An element that consumed no bytes cannot bound `count` by the remaining input, so
    // without an upper item limit the count must not exceed the unread bytes.
    fn check_unconsumed(&self, count: usize) -> Result<(), Error> {
        if matches!(self.items.end_bound(), Bound::Unbounded) && count > self.unread_bytes() {
            return Err(Error::InvalidLength(count));
        }
        Ok(())
    }

    // Reservations never exceed the unread bytes. Zero-sized elements are bounded
    // separately by `check_unconsumed`.
    fn capacity_hint(&self, count: usize) -> usize {
        count.min(self.unread_bytes())
    }

    /// Advances the cursor by `count` bytes.
    pub fn skip(&mut self, count: usize) -> Result<(), Error> {
        let position = self.offset.checked_add(count).ok_or(Error::EndOfBuffer)?;
        self.reset(position)
    }

    /// Moves the cursor to `position`, which may be before the current one.
    pub fn reset(&mut self, position: usize) -> Result<(), Error> {
        if position > self.buffer.len() {
            return Err(Error::EndOfBuffer);
        }
        if position < self.offset {
            trace!(from = self.offset, to = position, "rewound reader");
        }
        self.offset = position;
        Ok(())
    }

    /// Discards all bytes before the cursor, releasing their memory.
    pub fn compact(&mut self) {
        if self.offset == 0 {
            return;
        }
        let discarded = self.offset;
        self.buffer = Bytes::copy_from_slice(&self.buffer[self.offset..]);
        self.offset = 0;
        debug!(discarded, remaining = self.buffer.len(), "compacted reader");
    }

    /// Returns the cursor position.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Returns the total number of buffered bytes (read and unread).
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    pub fn unread_bytes(&self) -> usize {
        self.buffer.len() - self.offset
    }

    pub fn unread_data(&self) -> Bytes {
        self.buffer.slice(self.offset..)
    }

    /// Returns true when no unread bytes remain.
    pub fn is_exhausted(&self) -> bool {
        self.unread_bytes() == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns the whole buffer (read and unread) as hex.
    pub fn to_hex(&self) -> String {
        hex(&self.buffer)
    }
}

impl From<Bytes> for Reader {
    fn from(value: Bytes) -> Self {
        Self::new(value)
    }
}

impl From<Vec<u8>> for Reader {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

impl From<&[u8]> for Reader {
    fn from(value: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(value))
    }
}

impl<const N: usize> From<[u8; N]> for Reader {
    fn from(value: [u8; N]) -> Self {
        Self::from(&value[..])
    }
}

impl From<&Writer> for Reader {
    fn from(value: &Writer) -> Self {
        Self::from(value.data())
    }
}

impl From<Writer> for Reader {
    fn from(value: Writer) -> Self {
        Self::new(value.freeze())
    }
}

impl FromStr for Reader {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Display for Reader {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
