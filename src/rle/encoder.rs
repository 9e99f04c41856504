// RLE encoder.
//
// Every maximal run becomes one or more `(count, value)` records. Runs longer
// than 255 bytes are split so the count never wraps.

use super::record::{RECORD_LEN, runs};

/// Encode `data` into `(count, value)` records.
///
/// Empty input yields empty output. Output length is always even and at most
/// twice the input length.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(data));
    encode_into(data, &mut out);
    out
}

/// Append the encoding of `data` to `out`.
pub fn encode_into(data: &[u8], out: &mut Vec<u8>) {
    for run in runs(data) {
        for record in run.records() {
            out.extend_from_slice(&record.to_bytes());
        }
    }
}

/// Exact size of `encode(data)` without producing it.
pub fn encoded_len(data: &[u8]) -> usize {
    runs(data).map(|run| run.record_count() * RECORD_LEN).sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
