// Text path: UTF-8 string <-> RLE <-> hex string.
//
// Used when the data is typed or pasted rather than read from a file. The
// file path skips hex entirely and runs the RLE codec on raw bytes.

use thiserror::Error;

use crate::hex::{self, HexError};
use crate::rle::{self, RleError};

/// Failure of a text-path decode. Wraps the component error unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Hex(#[from] HexError),
    #[error(transparent)]
    Rle(#[from] RleError),
}

/// RLE-encode the UTF-8 bytes of `text` and render the result as hex.
///
/// ```
/// assert_eq!(oxirle::text::encode_text("aaab"), "03610162");
/// ```
pub fn encode_text(text: &str) -> String {
    hex::to_hex(&rle::encode(text.as_bytes()))
}

/// Parse hex, RLE-decode, and return the raw decoded bytes.
pub fn decode_text_bytes(hex_text: &str) -> Result<Vec<u8>, Error> {
    let encoded = hex::from_hex(hex_text)?;
    Ok(rle::decode(&encoded)?)
}

/// Inverse of [`encode_text`].
///
/// Decoded bytes are interpreted as UTF-8; invalid sequences become
/// U+FFFD. Use [`decode_text_bytes`] to validate them yourself.
pub fn decode_text(hex_text: &str) -> Result<String, Error> {
    let bytes = decode_text_bytes(hex_text)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
