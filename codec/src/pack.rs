//! Fixed-width packing of unsigned integers.
//!
//! A packed value always occupies the full width of its type, regardless of magnitude. Values are
//! laid out little-endian by default; [Endian::Big] reverses the byte sequence.

use crate::{Error, U256};
use bytes::{Buf, BufMut};

/// Widest supported value, in bytes.
const MAX_WIDTH: usize = 32;

/// Byte order of a packed value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

/// An integer with a constant packed width.
pub trait FixedWidth: Copy {
    /// Number of bytes occupied by a packed value.
    const SIZE: usize;

    /// Writes the value to `buf` in little-endian order.
    fn write_le(&self, buf: &mut impl BufMut);

    /// Reads a value from exactly [Self::SIZE] little-endian bytes.
    ///
    /// Panics if `bytes` holds fewer than [Self::SIZE] bytes.
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_fixed_width {
    ($type:ty, $get_method:ident, $put_method:ident) => {
        impl FixedWidth for $type {
            const SIZE: usize = std::mem::size_of::<$type>();

            #[inline]
            fn write_le(&self, buf: &mut impl BufMut) {
                buf.$put_method(*self);
            }

            #[inline]
            fn read_le(mut bytes: &[u8]) -> Self {
                bytes.$get_method()
            }
        }
    };
}

impl_fixed_width!(u8, get_u8, put_u8);
impl_fixed_width!(u16, get_u16_le, put_u16_le);
impl_fixed_width!(u32, get_u32_le, put_u32_le);
impl_fixed_width!(u64, get_u64_le, put_u64_le);
impl_fixed_width!(u128, get_u128_le, put_u128_le);

impl FixedWidth for U256 {
    const SIZE: usize = 32;

    #[inline]
    fn write_le(&self, buf: &mut impl BufMut) {
        buf.put_slice(&self.to_le_bytes::<32>());
    }

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        let mut raw = [0u8; 32];
        raw.copy_from_slice(&bytes[..32]);
        U256::from_le_bytes(raw)
    }
}

/// Packs `value` into exactly `T::SIZE` bytes.
pub fn pack<T: FixedWidth>(value: T, endian: Endian) -> Vec<u8> {
    let mut packed = Vec::with_capacity(T::SIZE);
    value.write_le(&mut packed);
    if endian == Endian::Big {
        packed.reverse();
    }
    packed
}

/// Unpacks a `T` from `packed`, starting at `offset`.
///
/// Fails with [Error::EndOfBuffer] if fewer than `T::SIZE` bytes remain after `offset`.
pub fn unpack<T: FixedWidth>(packed: &[u8], offset: usize, endian: Endian) -> Result<T, Error> {
    let end = offset.checked_add(T::SIZE).ok_or(Error::EndOfBuffer)?;
    if end > packed.len() {
        return Err(Error::EndOfBuffer);
    }

    let mut scratch = [0u8; MAX_WIDTH];
    let scratch = &mut scratch[..T::SIZE];
    scratch.copy_from_slice(&packed[offset..end]);
    if endian == Endian::Big {
        scratch.reverse();
    }
    Ok(T::read_le(scratch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paste::paste;

    macro_rules! impl_pack_test {
        ($type:ty) => {
            paste! {
                #[test]
                fn [<test_pack_ $type:lower>]() {
                    let values = [<$type>::from(0u8), <$type>::from(1u8), <$type>::from(42u8), <$type>::MAX];
                    for value in values {
                        for endian in [Endian::Little, Endian::Big] {
                            let packed = pack(value, endian);
                            assert_eq!(packed.len(), <$type as FixedWidth>::SIZE);
                            assert_eq!(unpack::<$type>(&packed, 0, endian).unwrap(), value);
                        }
                    }
                }
            }
        };
    }

    impl_pack_test!(u8);
    impl_pack_test!(u16);
    impl_pack_test!(u32);
    impl_pack_test!(u64);
    impl_pack_test!(u128);
    impl_pack_test!(U256);

    #[test]
    fn test_byte_order() {
        assert_eq!(pack(0x0102u16, Endian::Little), vec![0x02, 0x01]);
        assert_eq!(pack(0x0102u16, Endian::Big), vec![0x01, 0x02]);
        assert_eq!(
            pack(0x01020304u32, Endian::Little),
            vec![0x04, 0x03, 0x02, 0x01]
        );

        let wide = U256::from(1u8) << 248usize;
        let little = pack(wide, Endian::Little);
        assert_eq!(little[31], 0x01);
        assert!(little[..31].iter().all(|b| *b == 0));
        let big = pack(wide, Endian::Big);
        assert_eq!(big[0], 0x01);
    }

    #[test]
    fn test_small_values_keep_full_width() {
        assert_eq!(pack(1u64, Endian::Little), vec![1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(pack(0u128, Endian::Big).len(), 16);
    }

    #[test]
    fn test_unpack_offset() {
        let packed = [0xff, 0x02, 0x01, 0xff];
        assert_eq!(unpack::<u16>(&packed, 1, Endian::Little).unwrap(), 0x0102);
        assert_eq!(unpack::<u16>(&packed, 1, Endian::Big).unwrap(), 0x0201);
    }

    #[test]
    fn test_unpack_insufficient() {
        let packed = [0x01, 0x02, 0x03];
        assert!(matches!(
            unpack::<u32>(&packed, 0, Endian::Little),
            Err(Error::EndOfBuffer)
        ));
        assert!(matches!(
            unpack::<u16>(&packed, 2, Endian::Little),
            Err(Error::EndOfBuffer)
        ));
        assert!(matches!(
            unpack::<u8>(&packed, usize::MAX, Endian::Little),
            Err(Error::EndOfBuffer)
        ));
    }
}
