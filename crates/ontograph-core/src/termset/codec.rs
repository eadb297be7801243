//! Compact string form of a set of term codes.
//!
//! Each code becomes one fixed-width block of [`BLOCK_WIDTH`] characters and
//! blocks are concatenated without separators, so the string can be split
//! back without delimiters.
//!
//! Two formats are read:
//!
//! - current: `64$` followed by radix-64 blocks over [`ALPHABET`]
//! - legacy: radix-36 blocks with no prefix
//!
//! Only the current format is ever written. The empty set encodes to `""`.

use thiserror::Error;

/// Radix-64 digits: `0-9`, `A-Z`, `a-z`, `[`, `]`.
pub const ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz[]";

/// Prefix marking the radix-64 format.
pub const SENTINEL: &str = "64$";

pub const BLOCK_WIDTH: usize = 4;

/// Largest code representable in one radix-64 block.
pub const MAX_CODE: u32 = 64 * 64 * 64 * 64 - 1;

/// Largest code representable in one legacy radix-36 block.
pub const MAX_LEGACY_CODE: u32 = 36 * 36 * 36 * 36 - 1;

/// Errors raised by the term-set codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Encoded term set has {len} characters, not a multiple of 4")]
    Length { len: usize },

    #[error("Invalid radix-{radix} digit {symbol:?}")]
    Symbol { symbol: char, radix: u32 },

    #[error("Term code {0} does not fit in 4 digits")]
    CodeOutOfRange(u32),
}

/// Minimal radix-64 digits of `value` (`"0"` for zero).
pub fn to_radix64(value: u32) -> String {
    to_radix(value, 64)
}

// ALPHABET doubles as the radix-36 digit set: its first 36 symbols are 0-9A-Z.
fn to_radix(mut value: u32, radix: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % radix) as usize]);
        value /= radix;
    }
    digits.iter().rev().map(|b| *b as char).collect()
}

pub fn from_radix64(digits: &str) -> Result<u32, CodecError> {
    digits.chars().try_fold(0u32, |acc, c| {
        let digit = ALPHABET
            .iter()
            .position(|b| *b as char == c)
            .ok_or(CodecError::Symbol { symbol: c, radix: 64 })?;
        acc.checked_mul(64)
            .and_then(|v| v.checked_add(digit as u32))
            .ok_or(CodecError::Symbol { symbol: c, radix: 64 })
    })
}

/// Encode codes in the current format.
pub fn encode(codes: impl IntoIterator<Item = u32>) -> Result<String, CodecError> {
    let mut out = String::new();
    for code in codes {
        if code > MAX_CODE {
            return Err(CodecError::CodeOutOfRange(code));
        }
        out.push_str(&format!("{:0>width$}", to_radix64(code), width = BLOCK_WIDTH));
    }
    if out.is_empty() {
        return Ok(out);
    }
    Ok(format!("{SENTINEL}{out}"))
}

/// Encode codes in the legacy radix-36 format.
///
/// Kept for producing fixtures and migrating stored strings; term sets never
/// emit it.
pub fn encode_legacy(codes: impl IntoIterator<Item = u32>) -> Result<String, CodecError> {
    let mut out = String::new();
    for code in codes {
        if code > MAX_LEGACY_CODE {
            return Err(CodecError::CodeOutOfRange(code));
        }
        out.push_str(&format!("{:0>width$}", to_radix(code, 36), width = BLOCK_WIDTH));
    }
    Ok(out)
}

/// Decode either format back into codes, in block order.
pub fn decode(encoded: &str) -> Result<Vec<u32>, CodecError> {
    match encoded.strip_prefix(SENTINEL) {
        Some(body) => decode_blocks(body, from_radix64),
        None => decode_blocks(encoded, from_radix36),
    }
}

fn from_radix36(digits: &str) -> Result<u32, CodecError> {
    digits.chars().try_fold(0u32, |acc, c| {
        let digit = c
            .to_digit(36)
            .ok_or(CodecError::Symbol { symbol: c, radix: 36 })?;
        Ok(acc * 36 + digit)
    })
}

fn decode_blocks(
    body: &str,
    block: fn(&str) -> Result<u32, CodecError>,
) -> Result<Vec<u32>, CodecError> {
    let chars: Vec<char> = body.chars().collect();
    if chars.len() % BLOCK_WIDTH != 0 {
        return Err(CodecError::Length { len: chars.len() });
    }
    chars
        .chunks(BLOCK_WIDTH)
        .map(|chunk| block(&chunk.iter().collect::<String>()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radix64_digits() {
        assert_eq!(to_radix64(0), "0");
        assert_eq!(to_radix64(63), "]");
        assert_eq!(to_radix64(64), "10");
        assert_eq!(from_radix64("10").unwrap(), 64);
        assert_eq!(from_radix64("]]]]").unwrap(), MAX_CODE);
    }

    #[test]
    fn test_encode_pads_blocks() {
        assert_eq!(encode([1, 64]).unwrap(), "64$00010010");
    }

    #[test]
    fn test_empty_set_has_no_sentinel() {
        assert_eq!(encode(Vec::new()).unwrap(), "");
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_legacy_fixture() {
        let encoded = encode_legacy([1, 36, 1295]).unwrap();
        assert_eq!(encoded, "0001001000ZZ");
        assert_eq!(decode(&encoded).unwrap(), vec![1, 36, 1295]);
    }

    #[test]
    fn test_legacy_digits_are_case_insensitive() {
        assert_eq!(decode("00zz").unwrap(), vec![1295]);
    }

    #[test]
    fn test_bad_length_is_reported() {
        assert_eq!(decode("64$00010"), Err(CodecError::Length { len: 5 }));
        assert_eq!(decode("000"), Err(CodecError::Length { len: 3 }));
    }

    #[test]
    fn test_bad_symbol_is_reported() {
        assert_eq!(
            decode("64$00$1"),
            Err(CodecError::Symbol { symbol: '$', radix: 64 })
        );
        assert_eq!(
            decode("00_1"),
            Err(CodecError::Symbol { symbol: '_', radix: 36 })
        );
    }

    #[test]
    fn test_out_of_range_code() {
        assert_eq!(encode([MAX_CODE + 1]), Err(CodecError::CodeOutOfRange(MAX_CODE + 1)));
    }
}
