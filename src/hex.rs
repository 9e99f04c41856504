// Hexadecimal text representation of byte buffers.
//
// Lowercase, two digits per byte, no separators and no prefix. Parsing is
// case-insensitive and rejects dangling digits instead of dropping them.

use thiserror::Error;

/// Encode alphabet (lowercase).
const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

/// Marker for bytes that are not hex digits in `HEX_TABLE`.
const INVALID: u8 = 0xFF;

/// Decode lookup table: ASCII byte -> nibble value, or `INVALID`.
const HEX_TABLE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0usize;
    while i < 256 {
        let c = i as u8;
        table[i] = match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            _ => INVALID,
        };
        i += 1;
    }
    table
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Malformed hex text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    /// The input has an odd number of bytes, so the last digit has no pair.
    #[error("odd-length hex string ({len} bytes)")]
    OddLength { len: usize },
    /// A character that is not a hexadecimal digit.
    #[error("invalid hex digit {character:?} at byte offset {position}")]
    InvalidDigit { position: usize, character: char },
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Render `bytes` as lowercase hex, two digits per byte.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    to_hex_into(bytes, &mut out);
    out
}

/// Append the lowercase hex rendering of `bytes` to `out`.
pub fn to_hex_into(bytes: &[u8], out: &mut String) {
    out.reserve(bytes.len() * 2);
    for &byte in bytes {
        out.push(HEX_CHARS[(byte >> 4) as usize] as char);
        out.push(HEX_CHARS[(byte & 0x0F) as usize] as char);
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Parse hex text back into bytes.
///
/// Accepts upper- and lowercase digits. Fails with [`HexError::OddLength`]
/// when the length is odd and with [`HexError::InvalidDigit`] on the first
/// character that is not a hex digit.
pub fn from_hex(hex: &str) -> Result<Vec<u8>, HexError> {
    let raw = hex.as_bytes();
    if raw.len() % 2 != 0 {
        return Err(HexError::OddLength { len: raw.len() });
    }

    let mut out = Vec::with_capacity(raw.len() / 2);
    for (pair_idx, pair) in raw.chunks_exact(2).enumerate() {
        let offset = pair_idx * 2;
        let hi = nibble(hex, offset, pair[0])?;
        let lo = nibble(hex, offset + 1, pair[1])?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

#[inline]
fn nibble(hex: &str, position: usize, byte: u8) -> Result<u8, HexError> {
    match HEX_TABLE[byte as usize] {
        INVALID => Err(HexError::InvalidDigit {
            position,
            // Every byte before `position` was an ASCII digit, so it is a
            // char boundary.
            character: hex
                .get(position..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or(char::REPLACEMENT_CHARACTER),
        }),
        value => Ok(value),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
