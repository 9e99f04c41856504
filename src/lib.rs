//! Oxirle: byte-oriented run-length encoding with a hex text form.
//!
//! The crate provides:
//! - The RLE codec (`rle`): `(count, value)` byte pairs, runs split at 255
//! - A hex text representation (`hex`)
//! - The text path combining both (`text`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use oxirle::{rle, text};
//!
//! let encoded = rle::encode(b"aaab");
//! assert_eq!(encoded, [3, b'a', 1, b'b']);
//! assert_eq!(rle::decode(&encoded).unwrap(), b"aaab");
//!
//! assert_eq!(text::encode_text("aaab"), "03610162");
//! assert_eq!(text::decode_text("03610162").unwrap(), "aaab");
//! ```

pub mod hex;
pub mod io;
pub mod rle;
pub mod text;

#[cfg(feature = "cli")]
pub mod cli;

pub use hex::HexError;
pub use rle::RleError;
pub use text::{Error, decode_text, encode_text};
