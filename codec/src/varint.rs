//! Variable-length integer encoding and decoding
//!
//! Each encoded byte uses:
//! - 7 bits for the value
//! - 1 "continuation" bit to indicate if more bytes follow
//!
//! Groups are written least-significant first, so small values cost a single byte. An unsigned
//! integer of `W` bits never encodes to more than `ceil(W/7) + 1` bytes; longer sequences, and
//! sequences carrying bits that do not fit in `W`, are rejected when decoding.

use crate::{Error, U256};
use bytes::{Buf, BufMut};
use std::ops::{BitOrAssign, Shl, ShrAssign};

const DATA_BITS_PER_BYTE: usize = 7;
const DATA_BITS_MASK: u8 = 0x7F;
const CONTINUATION_BIT_MASK: u8 = 0x80;

/// Scratch space large enough for the longest supported encoding (a 256-bit value).
const MAX_ENCODED_LEN: usize = 40;

/// A trait for unsigned integers that can be varint encoded.
pub trait UInt:
    Copy
    + Sized
    + ShrAssign<usize>
    + Shl<usize, Output = Self>
    + BitOrAssign<Self>
    + PartialOrd
{
    /// Width of the integer in bits.
    const BITS: usize;

    /// Returns the number of leading zeros in the integer.
    fn leading_zeros(self) -> u32;

    /// Returns the least significant byte of the integer.
    fn as_u8(self) -> u8;

    /// Widens a byte into the integer.
    fn from_u8(byte: u8) -> Self;
}

// Implements the `UInt` trait for all unsigned integer types.
macro_rules! impl_uint {
    ($type:ty) => {
        impl UInt for $type {
            const BITS: usize = <$type>::BITS as usize;

            #[inline]
            fn leading_zeros(self) -> u32 {
                self.leading_zeros()
            }

            #[inline]
            fn as_u8(self) -> u8 {
                self as u8
            }

            #[inline]
            fn from_u8(byte: u8) -> Self {
                <$type>::from(byte)
            }
        }
    };
}
impl_uint!(u8);
impl_uint!(u16);
impl_uint!(u32);
impl_uint!(u64);
impl_uint!(u128);

impl UInt for U256 {
    const BITS: usize = 256;

    #[inline]
    fn leading_zeros(self) -> u32 {
        U256::leading_zeros(&self) as u32
    }

    #[inline]
    fn as_u8(self) -> u8 {
        self.as_limbs()[0] as u8
    }

    #[inline]
    fn from_u8(byte: u8) -> Self {
        U256::from(byte)
    }
}

/// Returns the maximum number of bytes a `T` may occupy when varint encoded.
pub const fn max_size<T: UInt>() -> usize {
    T::BITS.div_ceil(DATA_BITS_PER_BYTE) + 1
}

/// Encodes an unsigned integer as a varint.
///
/// Nothing is written to `buf` if the encoding would exceed [max_size].
pub fn write<T: UInt>(value: T, buf: &mut impl BufMut) -> Result<(), Error> {
    let continuation_threshold = T::from_u8(CONTINUATION_BIT_MASK);
    if value < continuation_threshold {
        // Fast path for small values (common case for lengths).
        // `as_u8()` does not truncate the value or leave a continuation bit.
        buf.put_u8(value.as_u8());
        return Ok(());
    }

    let bound = max_size::<T>();
    let mut scratch = [0u8; MAX_ENCODED_LEN];
    let mut len = 0;
    let mut val = value;
    while val >= continuation_threshold {
        if len + 1 >= bound {
            return Err(Error::VarintOverflow(T::BITS));
        }
        scratch[len] = val.as_u8() | CONTINUATION_BIT_MASK;
        len += 1;
        val >>= DATA_BITS_PER_BYTE;
    }
    scratch[len] = val.as_u8();
    buf.put_slice(&scratch[..=len]);
    Ok(())
}

/// Encodes an unsigned integer as a varint into a new byte vector.
pub fn encode<T: UInt>(value: T) -> Result<Vec<u8>, Error> {
    let mut encoded = Vec::with_capacity(size(value));
    write(value, &mut encoded)?;
    Ok(encoded)
}

// Shared decoding loop over any byte source.
fn decode_with<T: UInt>(mut next: impl FnMut() -> Option<u8>) -> Result<(T, usize), Error> {
    let max_bytes = max_size::<T>();
    let mut result = T::from_u8(0);
    let mut shift = 0;
    let mut consumed = 0;

    loop {
        let byte = next().ok_or(Error::EndOfBuffer)?;
        consumed += 1;

        // Any data bits that land beyond the width of T cannot be represented.
        let data = byte & DATA_BITS_MASK;
        if data != 0 {
            if shift >= T::BITS {
                return Err(Error::InvalidVarint);
            }
            let remaining_bits = T::BITS - shift;
            if remaining_bits < DATA_BITS_PER_BYTE && (data >> remaining_bits) != 0 {
                return Err(Error::InvalidVarint);
            }
            result |= T::from_u8(data) << shift;
        }

        if byte & CONTINUATION_BIT_MASK == 0 {
            return Ok((result, consumed));
        }
        if consumed == max_bytes {
            return Err(Error::InvalidVarint);
        }
        shift += DATA_BITS_PER_BYTE;
    }
}

/// Decodes a varint from `packed` starting at `offset`.
///
/// Returns the value and the number of bytes it occupied.
pub fn decode<T: UInt>(packed: &[u8], offset: usize) -> Result<(T, usize), Error> {
    if offset > packed.len() {
        return Err(Error::EndOfBuffer);
    }
    let mut bytes = packed[offset..].iter().copied();
    decode_with(|| bytes.next())
}

/// Decodes a varint from the front of `buf`, consuming it.
pub fn read<T: UInt>(buf: &mut impl Buf) -> Result<T, Error> {
    decode_with(|| {
        if buf.has_remaining() {
            Some(buf.get_u8())
        } else {
            None
        }
    })
    .map(|(value, _)| value)
}

/// Calculates the number of bytes needed to encode an unsigned integer as a varint.
pub fn size<T: UInt>(value: T) -> usize {
    let leading_zeros = value.leading_zeros() as usize;
    let data_bits = T::BITS - leading_zeros;
    usize::max(1, data_bits.div_ceil(DATA_BITS_PER_BYTE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use paste::paste;

    macro_rules! impl_boundary_test {
        ($type:ty) => {
            paste! {
                #[test]
                fn [<test_boundaries_ $type:lower>]() {
                    let max = <$type>::MAX;
                    for value in [<$type>::from(0u8), max >> 1usize, max] {
                        let encoded = encode(value).unwrap();
                        assert_eq!(encoded.len(), size(value));
                        assert!(encoded.len() <= max_size::<$type>());

                        let (decoded, consumed) = decode::<$type>(&encoded, 0).unwrap();
                        assert_eq!(decoded, value);
                        assert_eq!(consumed, encoded.len());
                    }
                }
            }
        };
    }

    impl_boundary_test!(u8);
    impl_boundary_test!(u16);
    impl_boundary_test!(u32);
    impl_boundary_test!(u64);
    impl_boundary_test!(u128);
    impl_boundary_test!(U256);

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode(0u64).unwrap(), vec![0x00]);
        assert_eq!(encode(1u64).unwrap(), vec![0x01]);
        assert_eq!(encode(127u64).unwrap(), vec![0x7F]);
        assert_eq!(encode(128u64).unwrap(), vec![0x80, 0x01]);
        assert_eq!(encode(300u64).unwrap(), vec![0xAC, 0x02]);
        assert_eq!(encode(0x81u8).unwrap(), vec![0x81, 0x01]);
        assert_eq!(encode(u64::MAX).unwrap().len(), 10);
        assert_eq!(encode(u128::MAX).unwrap().len(), 19);
        assert_eq!(encode(U256::MAX).unwrap().len(), 37);
    }

    #[test]
    fn test_varint_encoding() {
        let test_cases = [
            0u64,
            1,
            127,
            128,
            129,
            0xFF,
            0x100,
            0x3FFF,
            0x4000,
            0x1FFFFF,
            0xFFFFFF,
            0x1FFFFFFF,
            0xFFFFFFFF,
            0x1FFFFFFFFFF,
            0xFFFFFFFFFFFFFF,
            u64::MAX,
        ];

        for &value in &test_cases {
            let mut buf = Vec::new();
            write(value, &mut buf).unwrap();

            assert_eq!(buf.len(), size(value));

            let mut read_buf = &buf[..];
            let decoded: u64 = read(&mut read_buf).unwrap();

            assert_eq!(decoded, value);
            assert_eq!(read_buf.len(), 0);
        }
    }

    #[test]
    fn test_decode_narrowing() {
        // 300 does not fit in a u8
        assert!(matches!(
            decode::<u8>(&[0xAC, 0x02], 0),
            Err(Error::InvalidVarint)
        ));
        assert_eq!(decode::<u16>(&[0xAC, 0x02], 0).unwrap(), (300, 2));

        // u32::MAX + 1 does not fit in a u32
        let encoded = encode(u32::MAX as u64 + 1).unwrap();
        assert!(matches!(decode::<u32>(&encoded, 0), Err(Error::InvalidVarint)));
        assert_eq!(
            decode::<u64>(&encoded, 0).unwrap().0,
            u32::MAX as u64 + 1
        );

        // u64::MAX does not fit in a u16
        let encoded = encode(u64::MAX).unwrap();
        assert!(matches!(decode::<u16>(&encoded, 0), Err(Error::InvalidVarint)));

        // The final group of a u128 carries 2 bits
        let mut encoded = encode(u128::MAX).unwrap();
        assert_eq!(encoded.last(), Some(&0x03));
        *encoded.last_mut().unwrap() = 0x07;
        assert!(matches!(decode::<u128>(&encoded, 0), Err(Error::InvalidVarint)));
        assert_eq!(
            decode::<U256>(&encoded, 0).unwrap().0,
            (U256::from(u128::MAX) << 1usize) | U256::from(1u8)
        );

        // The final group of a U256 carries 4 bits
        let mut encoded = encode(U256::MAX).unwrap();
        assert_eq!(encoded.last(), Some(&0x0F));
        *encoded.last_mut().unwrap() = 0x1F;
        assert!(matches!(decode::<U256>(&encoded, 0), Err(Error::InvalidVarint)));
    }

    #[test]
    fn test_decode_offset() {
        let packed = [0xFF, 0xFF, 0xAC, 0x02, 0x05];
        assert_eq!(decode::<u64>(&packed, 2).unwrap(), (300, 2));
        assert_eq!(decode::<u64>(&packed, 4).unwrap(), (5, 1));
        assert!(matches!(decode::<u64>(&packed, 5), Err(Error::EndOfBuffer)));
        assert!(matches!(decode::<u64>(&packed, 6), Err(Error::EndOfBuffer)));
    }

    #[test]
    fn test_varint_insufficient_buffer() {
        let mut buf = Bytes::from_static(&[0x80]);
        assert!(matches!(read::<u64>(&mut buf), Err(Error::EndOfBuffer)));
        assert!(matches!(decode::<u64>(&[], 0), Err(Error::EndOfBuffer)));
    }

    #[test]
    fn test_varint_invalid() {
        let mut buf =
            Bytes::from_static(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x02]);
        assert!(matches!(read::<u64>(&mut buf), Err(Error::InvalidVarint)));

        // A continuation bit that never terminates within the bound
        let overlong = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01];
        assert!(matches!(decode::<u32>(&overlong, 0), Err(Error::InvalidVarint)));
    }

    #[test]
    fn test_padding_within_bound() {
        // Zero-valued continuation groups are tolerated up to the size bound.
        assert_eq!(decode::<u8>(&[0x80, 0x00], 0).unwrap(), (0, 2));
        assert_eq!(decode::<u16>(&[0x81, 0x80, 0x00], 0).unwrap(), (1, 3));

        assert_eq!(decode::<u8>(&[0x80, 0x80, 0x00], 0).unwrap(), (0, 3));

        // ...but not beyond it.
        assert!(matches!(
            decode::<u8>(&[0x80, 0x80, 0x80, 0x00], 0),
            Err(Error::InvalidVarint)
        ));
    }
}
