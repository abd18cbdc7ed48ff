//! The contract shared by values that take part in composite framing.

use crate::{json, varint, Error, Reader, Writer};
use podwire_utils::{from_hex, hex};
use serde_json::Value;

/// A value that can write itself into a [Writer], rebuild itself from a [Reader], and project
/// itself to and from JSON.
///
/// Collections of serializable values are framed as a varint count followed by each element, so
/// any implementor can be nested inside [Writer::pod_vec] and [Reader::pod_vec].
pub trait Serializable: Sized {
    /// Returns the number of bytes written by [Serializable::serialize].
    ///
    /// This method MUST return the exact number of bytes that will be written.
    fn size(&self) -> usize;

    /// Writes the value into `writer`.
    fn serialize(&self, writer: &mut Writer) -> Result<(), Error>;

    /// Reads a value from the cursor of `reader`, consuming the necessary bytes.
    fn deserialize(reader: &mut Reader) -> Result<Self, Error>;

    /// Projects the value to JSON.
    fn to_json(&self) -> Value;

    /// Loads a value from its JSON projection.
    fn from_json(value: &Value) -> Result<Self, Error>;

    /// Loads a value from the member `key` of a JSON object.
    fn from_json_key(value: &Value, key: &str) -> Result<Self, Error> {
        Self::from_json(json::get_json_value(value, key)?)
    }

    /// Returns the serialized bytes.
    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let len = self.size();
        let mut writer = Writer::with_capacity(len);
        self.serialize(&mut writer)?;
        debug_assert_eq!(writer.size(), len, "serialize() did not write expected bytes");
        Ok(writer.to_bytes())
    }

    /// Rebuilds a value from `data`, which must be consumed entirely.
    fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        let mut reader = Reader::from(data);
        let value = Self::deserialize(&mut reader)?;
        let remaining = reader.unread_bytes();
        if remaining > 0 {
            return Err(Error::ExtraData(remaining));
        }
        Ok(value)
    }

    /// Returns the serialized bytes as hex.
    fn to_hex(&self) -> Result<String, Error> {
        Ok(hex(&self.to_bytes()?))
    }

    /// Rebuilds a value from the hex form of its serialized bytes.
    fn from_hex(text: &str) -> Result<Self, Error> {
        Self::from_bytes(&from_hex(text)?)
    }
}

impl<T: Serializable> Serializable for Vec<T> {
    fn size(&self) -> usize {
        varint::size(self.len() as u64) + self.iter().map(Serializable::size).sum::<usize>()
    }

    fn serialize(&self, writer: &mut Writer) -> Result<(), Error> {
        writer.pod_vec(self)
    }

    fn deserialize(reader: &mut Reader) -> Result<Self, Error> {
        reader.pod_vec(false)
    }

    fn to_json(&self) -> Value {
        json::to_json_vec(self)
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        json::from_json_vec(value)
    }
}
