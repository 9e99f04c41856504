// RLE record and run types.
//
// A record is the two-byte wire unit: count followed by value. A run is the
// in-memory grouping of equal adjacent bytes, which may need several records.

use std::iter::FusedIterator;

/// Serialized size of one record.
pub const RECORD_LEN: usize = 2;

/// One `(count, value)` pair of an encoded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Record {
    pub count: u8,
    pub value: u8,
}

impl Record {
    /// Largest run length a single record can carry.
    pub const MAX_COUNT: usize = u8::MAX as usize;

    pub const fn new(count: u8, value: u8) -> Self {
        Self { count, value }
    }

    /// Wire form: count byte then value byte.
    #[inline]
    pub const fn to_bytes(self) -> [u8; RECORD_LEN] {
        [self.count, self.value]
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; RECORD_LEN]) -> Self {
        Self {
            count: bytes[0],
            value: bytes[1],
        }
    }

    /// Number of bytes this record expands to.
    #[inline]
    pub const fn expanded_len(self) -> usize {
        self.count as usize
    }
}

/// A maximal sequence of equal bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub value: u8,
    pub len: usize,
}

impl Run {
    /// Number of records needed to serialize this run.
    #[inline]
    pub const fn record_count(&self) -> usize {
        self.len.div_ceil(Record::MAX_COUNT)
    }

    /// Split the run into records of at most [`Record::MAX_COUNT`].
    ///
    /// Full records come first; the last one carries the remainder and is
    /// never empty.
    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        let value = self.value;
        let mut remaining = self.len;
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let count = remaining.min(Record::MAX_COUNT);
            remaining -= count;
            Some(Record::new(count as u8, value))
        })
    }
}

// ---------------------------------------------------------------------------
// Run iterator
// ---------------------------------------------------------------------------

/// Iterator over the maximal runs of a byte slice.
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    data: &'a [u8],
}

impl<'a> Runs<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let (&value, rest) = self.data.split_first()?;
        let len = 1 + rest.iter().take_while(|&&b| b == value).count();
        self.data = &self.data[len..];
        Some(Run { value, len })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.data.is_empty() {
            (0, Some(0))
        } else {
            (1, Some(self.data.len()))
        }
    }
}

impl FusedIterator for Runs<'_> {}

/// Maximal runs of `data`, left to right.
pub fn runs(data: &[u8]) -> Runs<'_> {
    Runs::new(data)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
