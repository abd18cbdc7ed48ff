//! Append-only encoder.

use crate::{
    pack::{pack, Endian, FixedWidth},
    varint::{self, UInt},
    Error, Serializable, U256,
};
use bytes::{BufMut, Bytes, BytesMut};
use podwire_utils::{from_hex, hex};
use std::{
    fmt::{Display, Formatter},
    ops::{Index, IndexMut},
};

/// Accumulates an encoded message through ordered, typed appends.
///
/// The bytes produced by a sequence of calls are decoded by driving a [crate::Reader] through the
/// same sequence of reads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Writer {
    buffer: BytesMut,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Appends `1` for true and `0` for false.
    pub fn boolean(&mut self, value: bool) {
        self.buffer.put_u8(u8::from(value));
    }

    pub fn uint8(&mut self, value: u8) {
        self.buffer.put_u8(value);
    }

    pub fn uint16(&mut self, value: u16, endian: Endian) {
        self.fixed(value, endian);
    }

    pub fn uint32(&mut self, value: u32, endian: Endian) {
        self.fixed(value, endian);
    }

    pub fn uint64(&mut self, value: u64, endian: Endian) {
        self.fixed(value, endian);
    }

    pub fn uint128(&mut self, value: u128, endian: Endian) {
        self.fixed(value, endian);
    }

    pub fn uint256(&mut self, value: U256, endian: Endian) {
        self.fixed(value, endian);
    }

    /// Appends `value` packed to its full width.
    pub fn fixed<T: FixedWidth>(&mut self, value: T, endian: Endian) {
        match endian {
            Endian::Little => value.write_le(&mut self.buffer),
            Endian::Big => self.buffer.put_slice(&pack(value, endian)),
        }
    }

    /// Appends raw bytes verbatim.
    pub fn bytes(&mut self, data: &[u8]) {
        self.buffer.put_slice(data);
    }

    /// Appends `len` bytes starting at `data`.
    ///
    /// Fails with [Error::InvalidArgument] if `data` is null and `len` is nonzero.
    ///
    /// # Safety
    ///
    /// If `data` is non-null it must be valid for reads of `len` bytes.
    pub unsafe fn bytes_raw(&mut self, data: *const u8, len: usize) -> Result<(), Error> {
        if len == 0 {
            return Ok(());
        }
        if data.is_null() {
            return Err(Error::InvalidArgument("cannot read bytes from null pointer"));
        }
        // SAFETY: the caller guarantees `data` is valid for `len` bytes.
        let data = std::slice::from_raw_parts(data, len);
        self.bytes(data);
        Ok(())
    }

    /// Decodes `text` as hex and appends the bytes.
    pub fn hex(&mut self, text: &str) -> Result<(), Error> {
        let decoded = from_hex(text)?;
        self.bytes(&decoded);
        Ok(())
    }

    /// Appends `value` as a varint.
    pub fn varint<T: UInt>(&mut self, value: T) -> Result<(), Error> {
        varint::write(value, &mut self.buffer)
    }

    /// Appends a count followed by each value as a varint.
    pub fn varint_vec<T: UInt>(&mut self, values: &[T]) -> Result<(), Error> {
        self.count(values.len())?;
        for value in values {
            self.varint(*value)?;
        }
        Ok(())
    }

    /// Appends a serializable value.
    pub fn pod<T: Serializable>(&mut self, value: &T) -> Result<(), Error> {
        value.serialize(self)
    }

    /// Appends a count followed by each serializable value.
    pub fn pod_vec<T: Serializable>(&mut self, values: &[T]) -> Result<(), Error> {
        self.count(values.len())?;
        for value in values {
            self.pod(value)?;
        }
        Ok(())
    }

    /// Appends an outer count followed by each inner list, itself count-prefixed.
    pub fn pod_vec_vec<T: Serializable>(&mut self, values: &[Vec<T>]) -> Result<(), Error> {
        self.count(values.len())?;
        for inner in values {
            self.pod_vec(inner)?;
        }
        Ok(())
    }

    fn count(&mut self, len: usize) -> Result<(), Error> {
        let len = u64::try_from(len).map_err(|_| Error::InvalidLength(len))?;
        self.varint(len)
    }

    /// Clears all written bytes.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Returns the number of bytes written.
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns a copy of the written bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_vec()
    }

    pub fn to_hex(&self) -> String {
        hex(&self.buffer)
    }

    /// Consumes the writer, returning its bytes without copying.
    pub fn freeze(self) -> Bytes {
        self.buffer.freeze()
    }
}

impl Index<usize> for Writer {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.buffer[index]
    }
}

impl IndexMut<usize> for Writer {
    fn index_mut(&mut self, index: usize) -> &mut u8 {
        &mut self.buffer[index]
    }
}

impl From<&[u8]> for Writer {
    fn from(value: &[u8]) -> Self {
        Self {
            buffer: BytesMut::from(value),
        }
    }
}

impl From<Vec<u8>> for Writer {
    fn from(value: Vec<u8>) -> Self {
        Self::from(value.as_slice())
    }
}

impl<const N: usize> From<[u8; N]> for Writer {
    fn from(value: [u8; N]) -> Self {
        Self::from(&value[..])
    }
}

impl Display for Writer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean() {
        let mut writer = Writer::new();
        writer.boolean(true);
        writer.boolean(false);
        assert_eq!(writer.data(), &[0x01, 0x00]);
    }

    #[test]
    fn test_fixed_width() {
        let mut writer = Writer::new();
        writer.uint8(0xAB);
        writer.uint16(0x0102, Endian::Little);
        writer.uint16(0x0102, Endian::Big);
        writer.uint32(1, Endian::Little);
        writer.uint64(1, Endian::Big);
        assert_eq!(writer.size(), 1 + 2 + 2 + 4 + 8);
        assert_eq!(writer.to_hex(), "ab02010102010000000000000000000001");

        writer.reset();
        writer.uint128(u128::MAX, Endian::Little);
        writer.uint256(U256::from(1u8), Endian::Big);
        assert_eq!(writer.size(), 16 + 32);
        assert!(writer.data()[..16].iter().all(|b| *b == 0xFF));
        assert_eq!(writer[47], 0x01);
    }

    #[test]
    fn test_bytes_and_hex() {
        let mut writer = Writer::new();
        writer.bytes(&[0xDE, 0xAD]);
        writer.hex("beef").unwrap();
        assert_eq!(writer.to_string(), "deadbeef");

        assert!(matches!(writer.hex("abc"), Err(Error::Hex(_))));
        assert!(matches!(writer.hex("zz"), Err(Error::Hex(_))));
        assert_eq!(writer.size(), 4);
    }

    #[test]
    fn test_bytes_raw() {
        let mut writer = Writer::new();
        let data = [1u8, 2, 3];
        unsafe {
            writer.bytes_raw(data.as_ptr(), data.len()).unwrap();
            writer.bytes_raw(std::ptr::null(), 0).unwrap();
            assert!(matches!(
                writer.bytes_raw(std::ptr::null(), 1),
                Err(Error::InvalidArgument(_))
            ));
        }
        assert_eq!(writer.to_bytes(), vec![1, 2, 3]);
    }

    #[test]
    fn test_varint_vec() {
        let mut writer = Writer::new();
        writer.varint_vec(&[1u64, 300]).unwrap();
        assert_eq!(writer.data(), &[0x02, 0x01, 0xAC, 0x02]);

        writer.reset();
        writer.varint_vec::<u32>(&[]).unwrap();
        assert_eq!(writer.data(), &[0x00]);
    }

    #[test]
    fn test_index_and_reset() {
        let mut writer = Writer::from([1u8, 2, 3]);
        assert_eq!(writer[1], 2);
        writer[1] = 9;
        assert_eq!(writer.to_bytes(), vec![1, 9, 3]);

        writer.reset();
        assert!(writer.is_empty());
        assert_eq!(writer.size(), 0);
        assert_eq!(writer.to_hex(), "");
    }
}
