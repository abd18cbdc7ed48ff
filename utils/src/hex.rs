//! Lossless conversion between bytes and lowercase hexadecimal text.

use thiserror::Error;

/// Errors returned when decoding hexadecimal text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid hex length: {0}")]
    OddLength(usize),
    #[error("invalid hex character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
}

/// Digits used when encoding.
const HEX_CHARS: [u8; 16] = *b"0123456789abcdef";

/// Sentinel marking a byte that is not a hexadecimal digit.
const INVALID: u8 = 0xff;

/// Maps every byte to its nibble value (or [INVALID]).
const HEX_VALUES: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < 10 {
        table[b'0' as usize + i] = i as u8;
        i += 1;
    }
    let mut i = 0;
    while i < 6 {
        table[b'a' as usize + i] = 10 + i as u8;
        table[b'A' as usize + i] = 10 + i as u8;
        i += 1;
    }
    table
};

/// Converts bytes to a hexadecimal string.
pub fn hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        hex.push(HEX_CHARS[(byte >> 4) as usize] as char);
        hex.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
    }
    hex
}

#[inline]
fn nibble(text: &[u8], position: usize) -> Result<u8, Error> {
    let value = HEX_VALUES[text[position] as usize];
    if value == INVALID {
        // Recover the full character (may be multi-byte) for the error message.
        let character = std::str::from_utf8(&text[position..])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(text[position] as char);
        return Err(Error::InvalidCharacter {
            character,
            position,
        });
    }
    Ok(value)
}

/// Converts a hexadecimal string to bytes.
///
/// Both lowercase and uppercase digits are accepted.
pub fn from_hex(hex: &str) -> Result<Vec<u8>, Error> {
    let text = hex.as_bytes();
    if text.len() % 2 != 0 {
        return Err(Error::OddLength(text.len()));
    }

    let mut result = Vec::with_capacity(text.len() / 2);
    for i in (0..text.len()).step_by(2) {
        result.push(nibble(text, i)? << 4 | nibble(text, i + 1)?);
    }
    Ok(result)
}

/// Converts a hexadecimal string to bytes, stripping whitespace and/or a `0x` prefix. Commonly used
/// in testing to encode external test vectors without modification.
pub fn from_hex_formatted(hex: &str) -> Result<Vec<u8>, Error> {
    let hex = hex.replace(['\t', '\n', '\r', ' '], "");
    let res = hex.strip_prefix("0x").unwrap_or(&hex);
    from_hex(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, RngCore, SeedableRng};

    #[test]
    fn test_hex() {
        // Test case 0: empty bytes
        let b = &[];
        let h = hex(b);
        assert_eq!(h, "");
        assert_eq!(from_hex(&h).unwrap(), b.to_vec());

        // Test case 1: single byte
        let b = &[0x01];
        let h = hex(b);
        assert_eq!(h, "01");
        assert_eq!(from_hex(&h).unwrap(), b.to_vec());

        // Test case 2: multiple bytes
        let b = &[0x01, 0x02, 0x03, 0xab, 0xff];
        let h = hex(b);
        assert_eq!(h, "010203abff");
        assert_eq!(from_hex(&h).unwrap(), b.to_vec());

        // Test case 3: odd number of characters
        assert_eq!(from_hex("0102030"), Err(Error::OddLength(7)));

        // Test case 4: invalid hexadecimal character
        assert_eq!(
            from_hex("01g3"),
            Err(Error::InvalidCharacter {
                character: 'g',
                position: 2
            })
        );
        assert!(matches!(
            from_hex("zz"),
            Err(Error::InvalidCharacter { character: 'z', .. })
        ));
    }

    #[test]
    fn test_from_hex_uppercase() {
        assert_eq!(from_hex("ABCDEF").unwrap(), vec![0xab, 0xcd, 0xef]);
        assert_eq!(from_hex("aBcD").unwrap(), vec![0xab, 0xcd]);
    }

    #[test]
    fn test_from_hex_multibyte_character() {
        assert!(matches!(
            from_hex("0é0"),
            Err(Error::InvalidCharacter { character: 'é', position: 1 })
        ));
    }

    #[test]
    fn test_from_hex_formatted() {
        let b = &[0x01, 0x02, 0x03];

        // Whitespace
        assert_eq!(from_hex_formatted("01 02 03").unwrap(), b.to_vec());

        // 0x prefix
        assert_eq!(from_hex_formatted("0x010203").unwrap(), b.to_vec());

        // 0x prefix + different whitespace chars
        let h = "    \n\n0x\r\n01
                            02\t03\n";
        assert_eq!(from_hex_formatted(h).unwrap(), b.to_vec());

        // Still rejects bad input
        assert!(from_hex_formatted("0x0102030").is_err());
    }

    #[test]
    fn test_hex_random() {
        let mut rng = StdRng::seed_from_u64(0);
        for len in [0, 1, 31, 32, 33, 1024] {
            let mut bytes = vec![0u8; len];
            rng.fill_bytes(&mut bytes);
            let h = hex(&bytes);
            assert_eq!(h.len(), len * 2);
            assert_eq!(from_hex(&h).unwrap(), bytes);
        }
    }
}
