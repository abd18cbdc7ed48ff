//! Leverage common text helpers across the podwire crates.

pub mod hex;
pub use hex::{from_hex, from_hex_formatted, hex};
pub mod string;
pub use string::{str_join, str_pad, str_split, str_trim};
