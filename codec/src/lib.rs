//! Write and read binary data through a cursor.
//!
//! # Overview
//!
//! A [Writer] appends values to a growable buffer and a [Reader] consumes them from an
//! immutable one, tracking its position. Both sides support:
//! - Fixed-width unsigned integers from 8 to 256 bits, little-endian unless requested otherwise
//! - Variable-length unsigned integers (7 data bits per byte, high bit marks continuation)
//! - Raw bytes and hex text
//! - Plain binary values ([Pod]) and lists of them, framed with a varint count
//!
//! Every read accepts a `peek` flag: when set, the value is returned and the cursor stays where
//! it was. A read that fails never moves the cursor.
//!
//! User-defined types take part in composite framing by implementing [Serializable], which also
//! provides a JSON projection.
//!
//! # Example
//!
//! ```
//! use podwire_codec::{Endian, Error, Pod, Reader, Serializable, Writer};
//!
//! # fn main() -> Result<(), Error> {
//! let hash = Pod::new([7u8; 32]);
//!
//! let mut writer = Writer::new();
//! writer.uint32(0x0102_0304, Endian::Little);
//! writer.varint(300u64)?;
//! writer.pod_vec(&[hash.clone()])?;
//! assert_eq!(writer.size(), 4 + 2 + 1 + 32);
//!
//! let mut reader = Reader::from(&writer);
//! assert_eq!(reader.uint32(false, Endian::Little)?, 0x0102_0304);
//! assert_eq!(reader.varint::<u64>(true)?, 300);
//! assert_eq!(reader.varint::<u64>(false)?, 300);
//! let hashes: Vec<Pod> = reader.pod_vec(false)?;
//! assert_eq!(hashes, vec![hash.clone()]);
//! assert!(reader.is_exhausted());
//!
//! assert_eq!(Pod::<32>::from_json(&hash.to_json())?, hash);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod json;
pub mod pack;
pub mod pod;
pub mod reader;
pub mod serializable;
pub mod varint;
pub mod vector;
pub mod writer;

pub use config::RangeCfg;
pub use error::Error;
pub use pack::{Endian, FixedWidth};
pub use pod::Pod;
pub use reader::Reader;
pub use ruint::aliases::U256;
pub use serializable::Serializable;
pub use varint::UInt;
pub use vector::SerializableVector;
pub use writer::Writer;
