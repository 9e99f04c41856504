// Byte-oriented run-length encoding.
//
// Wire format: a flat sequence of two-byte records, `count` then `value`,
// with no header and no separators.
//
// # Modules
//
// - `record`  — Record/Run types and the run iterator
// - `encoder` — runs to records, splitting runs longer than 255
// - `decoder` — records back to bytes, with length validation

pub mod decoder;
pub mod encoder;
pub mod record;

pub use decoder::{RecordIter, RleError, decode, decode_into, decoded_len, records};
pub use encoder::{encode, encode_into, encoded_len};
pub use record::{RECORD_LEN, Record, Run, Runs, runs};
