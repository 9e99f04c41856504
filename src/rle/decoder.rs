// RLE decoder.
//
// Input is validated up front: an odd-length buffer is rejected before any
// output is produced, so callers never see a partial result.

use std::iter::FusedIterator;
use std::slice::ChunksExact;

use thiserror::Error;

use super::record::{RECORD_LEN, Record};

/// Malformed RLE data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RleError {
    /// The buffer does not split into whole `(count, value)` pairs.
    #[error("odd-length RLE data ({len} bytes): last record is incomplete")]
    OddLength { len: usize },
}

fn validate(encoded: &[u8]) -> Result<(), RleError> {
    if encoded.len() % RECORD_LEN != 0 {
        return Err(RleError::OddLength { len: encoded.len() });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Record iterator
// ---------------------------------------------------------------------------

/// Iterator over the records of a validated encoded buffer.
#[derive(Debug, Clone)]
pub struct RecordIter<'a> {
    chunks: ChunksExact<'a, u8>,
}

impl Iterator for RecordIter<'_> {
    type Item = Record;

    #[inline]
    fn next(&mut self) -> Option<Record> {
        self.chunks
            .next()
            .map(|pair| Record::from_bytes([pair[0], pair[1]]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for RecordIter<'_> {}
impl FusedIterator for RecordIter<'_> {}

/// Iterate the records of `encoded`, failing if its length is odd.
pub fn records(encoded: &[u8]) -> Result<RecordIter<'_>, RleError> {
    validate(encoded)?;
    Ok(RecordIter {
        chunks: encoded.chunks_exact(RECORD_LEN),
    })
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Exact size of `decode(encoded)`.
pub fn decoded_len(encoded: &[u8]) -> Result<usize, RleError> {
    Ok(records(encoded)?.map(Record::expanded_len).sum())
}

/// Expand `(count, value)` records back into the original bytes.
///
/// A count of zero is legal and contributes nothing.
pub fn decode(encoded: &[u8]) -> Result<Vec<u8>, RleError> {
    let mut out = Vec::with_capacity(decoded_len(encoded)?);
    decode_into(encoded, &mut out)?;
    Ok(out)
}

/// Append the decoding of `encoded` to `out`.
///
/// `out` is left untouched on error.
pub fn decode_into(encoded: &[u8], out: &mut Vec<u8>) -> Result<(), RleError> {
    for record in records(encoded)? {
        out.resize(out.len() + record.expanded_len(), record.value);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert!(decode(&[]).unwrap().is_empty());
        assert_eq!(records(&[]).unwrap().len(), 0);
    }

    #[test]
    fn literal_scenario() {
        assert_eq!(decode(&[3, 0x61, 1, 0x62]).unwrap(), b"aaab");
    }

    #[test]
    fn zero_count_is_empty() {
        assert_eq!(decode(&[0, b'x', 2, b'y', 0, b'z']).unwrap(), b"yy");
    }

    #[test]
    fn odd_length_rejected() {
        assert_eq!(decode(&[0x05]), Err(RleError::OddLength { len: 1 }));
        assert_eq!(decode(&[1, 2, 3]), Err(RleError::OddLength { len: 3 }));
        assert!(decoded_len(&[1, 2, 3]).is_err());
    }

    #[test]
    fn decode_into_untouched_on_error() {
        let mut out = vec![1, 2];
        assert!(decode_into(&[4, 4, 4], &mut out).is_err());
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn max_count() {
        let out = decode(&[255, 0xFF, 255, 0xFF]).unwrap();
        assert_eq!(out.len(), 510);
        assert!(out.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn records_iterates_pairs() {
        let recs: Vec<Record> = records(&[2, b'a', 0, b'b']).unwrap().collect();
        assert_eq!(recs, vec![Record::new(2, b'a'), Record::new(0, b'b')]);
    }

    #[test]
    fn decoded_len_sums_counts() {
        assert_eq!(decoded_len(&[10, 0, 255, 1, 0, 2]).unwrap(), 265);
    }

    #[test]
    fn error_display() {
        let msg = RleError::OddLength { len: 7 }.to_string();
        assert!(msg.contains("7 bytes"), "{msg}");
    }
}
