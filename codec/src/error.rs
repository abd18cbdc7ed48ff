//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("invalid varint")]
    InvalidVarint,
    #[error("varint exceeds the encoding bound for a {0}-bit value")]
    VarintOverflow(usize),
    #[error("size mismatch: expected {expected} bytes, found {found}")]
    SizeMismatch { expected: usize, found: usize },
    #[error("invalid length: {0}")]
    InvalidLength(usize),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("invalid hex: {0}")]
    Hex(#[from] podwire_utils::hex::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("JSON value is of the wrong type: expected {expected}, got {found}")]
    JsonType {
        expected: &'static str,
        found: &'static str,
    },
    #[error("missing JSON key: '{0}'")]
    MissingKey(String),
}
