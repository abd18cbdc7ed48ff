//! Fixed-size binary values such as hashes and keys.

use crate::{json, Error, Reader, Serializable, Writer};
use podwire_utils::{from_hex, hex};
use serde_json::Value;
use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
    ops::{Deref, Index, IndexMut},
    str::FromStr,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A plain binary value of exactly `N` bytes (32 by default).
///
/// A `Pod` is serialized as its `N` raw bytes with no length prefix and projected to JSON as a
/// hex string. The default value is all-zero ("empty"). Values are ordered from the
/// highest-index byte down, treating the bytes as a little-endian number.
///
/// The backing bytes are zeroized when the value is dropped.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Pod<const N: usize = 32>([u8; N]);

impl<const N: usize> Pod<N> {
    /// Creates a new `Pod` from an array of length `N`.
    pub fn new(value: [u8; N]) -> Self {
        Self(value)
    }

    /// Returns true if every byte is zero.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|byte| *byte == 0)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Default for Pod<N> {
    fn default() -> Self {
        Self([0u8; N])
    }
}

impl<const N: usize> Drop for Pod<N> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl<const N: usize> Zeroize for Pod<N> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<const N: usize> ZeroizeOnDrop for Pod<N> {}

impl<const N: usize> Ord for Pod<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

impl<const N: usize> PartialOrd for Pod<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Serializable for Pod<N> {
    fn size(&self) -> usize {
        N
    }

    fn serialize(&self, writer: &mut Writer) -> Result<(), Error> {
        writer.bytes(&self.0);
        Ok(())
    }

    fn deserialize(reader: &mut Reader) -> Result<Self, Error> {
        let data = reader.bytes(N, false)?;
        Self::try_from(&data[..])
    }

    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        json::get_json_string(value)?.parse()
    }

    fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        Self::try_from(data)
    }
}

impl<const N: usize> TryFrom<&[u8]> for Pod<N> {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; N] = value.try_into().map_err(|_| Error::SizeMismatch {
            expected: N,
            found: value.len(),
        })?;
        Ok(Self(array))
    }
}

impl<const N: usize> TryFrom<Vec<u8>> for Pod<N> {
    type Error = Error;

    fn try_from(mut value: Vec<u8>) -> Result<Self, Self::Error> {
        let result = Self::try_from(value.as_slice());
        value.zeroize();
        result
    }
}

impl<const N: usize> FromStr for Pod<N> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(from_hex(s)?)
    }
}

impl<const N: usize> AsRef<[u8]> for Pod<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Deref for Pod<N> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Index<usize> for Pod<N> {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.0[index]
    }
}

impl<const N: usize> IndexMut<usize> for Pod<N> {
    fn index_mut(&mut self, index: usize) -> &mut u8 {
        &mut self.0[index]
    }
}

impl<const N: usize> Display for Pod<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.0))
    }
}

impl<const N: usize> Debug for Pod<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pod({})", hex(&self.0))
    }
}
