//! A growable sequence of serializable elements.

use crate::{Error, Reader, Serializable, Writer};
use serde_json::Value;
use std::{
    fmt::{Display, Formatter},
    ops::{Deref, Index, IndexMut},
    str::FromStr,
};

/// An ordered collection that serializes as a varint element count followed by each element.
///
/// Nesting composes: a `SerializableVector<SerializableVector<T>>` has the same framing as
/// [Writer::pod_vec_vec].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SerializableVector<T> {
    container: Vec<T>,
}

impl<T> SerializableVector<T> {
    pub fn new() -> Self {
        Self {
            container: Vec::new(),
        }
    }

    /// Appends an element.
    pub fn push(&mut self, value: T) {
        self.container.push(value);
    }

    /// Returns the last element, if any.
    pub fn back(&self) -> Option<&T> {
        self.container.last()
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.container.last_mut()
    }

    /// Appends all elements of `other`, in order.
    pub fn extend(&mut self, other: &Self)
    where
        T: Clone,
    {
        self.container.extend_from_slice(&other.container);
    }

    pub fn extend_from_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        self.container.extend_from_slice(values);
    }

    pub fn clear(&mut self) {
        self.container.clear();
    }

    pub fn into_inner(self) -> Vec<T> {
        self.container
    }
}

impl<T> Default for SerializableVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for SerializableVector<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.container
    }
}

impl<T> Index<usize> for SerializableVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.container[index]
    }
}

impl<T> IndexMut<usize> for SerializableVector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.container[index]
    }
}

impl<T> From<Vec<T>> for SerializableVector<T> {
    fn from(container: Vec<T>) -> Self {
        Self { container }
    }
}

impl<T> FromIterator<T> for SerializableVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            container: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for SerializableVector<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.container.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SerializableVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.container.iter()
    }
}

impl<T: Serializable> Serializable for SerializableVector<T> {
    fn size(&self) -> usize {
        self.container.size()
    }

    fn serialize(&self, writer: &mut Writer) -> Result<(), Error> {
        self.container.serialize(writer)
    }

    fn deserialize(reader: &mut Reader) -> Result<Self, Error> {
        Vec::<T>::deserialize(reader).map(Self::from)
    }

    fn to_json(&self) -> Value {
        self.container.to_json()
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        Vec::<T>::from_json(value).map(Self::from)
    }
}

impl<T: Serializable> FromStr for SerializableVector<T> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl<T: Serializable> Display for SerializableVector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let hex = self.to_hex().map_err(|_| std::fmt::Error)?;
        f.write_str(&hex)
    }
}
