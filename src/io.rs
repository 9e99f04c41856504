// File-level helpers for RLE encoding/decoding.
//
// Provides `encode_file()` and `decode_file()`, which read the whole input
// into memory and run the codec before touching the output. The result is
// written to a temporary file in the output's directory and renamed over the
// output only once fully flushed, so neither a malformed input nor a failed
// write leaves a truncated output behind.
// Optionally computes SHA-256 digests (feature-gated behind `file-io`).

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

#[cfg(feature = "file-io")]
use sha2::{Digest, Sha256};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use thiserror::Error;

use crate::rle::{self, RECORD_LEN, RleError};

/// Suffix appended to the input path by encode.
pub const ENCODED_SUFFIX: &str = ".encoded";
/// Suffix appended to the input path by decode.
pub const DECODED_SUFFIX: &str = ".decoded";

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// Reading the input or writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The input is not valid RLE data.
    #[error("decode error: {0}")]
    Rle(#[from] RleError),
    /// In a batch, this file's output path is another file's input.
    #[error("output {} is also an input of this batch", .path.display())]
    OutputIsInput { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `encode_file()` / `decode_file()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    /// Input file size in bytes.
    pub input_size: u64,
    /// Output file size in bytes.
    pub output_size: u64,
    /// Number of RLE records written (encode) or read (decode).
    pub records: u64,
    /// SHA-256 of the input (if `file-io` feature is enabled).
    pub input_sha256: Option<[u8; 32]>,
    /// SHA-256 of the output (if `file-io` feature is enabled).
    pub output_sha256: Option<[u8; 32]>,
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Which way a file goes through the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

impl Direction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Encode => "encode",
            Self::Decode => "decode",
        }
    }

    /// Sibling path the output is written to by default.
    pub fn output_path(self, input: &Path) -> PathBuf {
        match self {
            Self::Encode => encoded_path(input),
            Self::Decode => decoded_path(input),
        }
    }

    /// Run the codec over an in-memory buffer.
    pub fn apply(self, data: &[u8]) -> Result<Vec<u8>, RleError> {
        match self {
            Self::Encode => Ok(rle::encode(data)),
            Self::Decode => rle::decode(data),
        }
    }
}

/// `<path>.encoded`; the suffix is appended, the extension is kept.
pub fn encoded_path(path: &Path) -> PathBuf {
    with_suffix(path, ENCODED_SUFFIX)
}

/// `<path>.decoded`; the suffix is appended, the extension is kept.
pub fn decoded_path(path: &Path) -> PathBuf {
    with_suffix(path, DECODED_SUFFIX)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

// ---------------------------------------------------------------------------
// encode_file / decode_file
// ---------------------------------------------------------------------------

/// RLE-encode `input_path` into `output_path`.
///
/// Existing output files are overwritten; callers own the overwrite policy.
pub fn encode_file(input_path: &Path, output_path: &Path) -> Result<FileStats, IoError> {
    process_file(Direction::Encode, input_path, output_path)
}

/// RLE-decode `input_path` into `output_path`.
///
/// Fails with [`IoError::Rle`] before touching `output_path` if the input
/// has an odd length.
pub fn decode_file(input_path: &Path, output_path: &Path) -> Result<FileStats, IoError> {
    process_file(Direction::Decode, input_path, output_path)
}

/// Shared body of `encode_file()` and `decode_file()`.
pub fn process_file(
    direction: Direction,
    input_path: &Path,
    output_path: &Path,
) -> Result<FileStats, IoError> {
    let input = std::fs::read(input_path)?;
    let output = direction.apply(&input)?;

    let record_bytes = match direction {
        Direction::Encode => output.len(),
        Direction::Decode => input.len(),
    };
    let records = (record_bytes / RECORD_LEN) as u64;

    write_output(output_path, |file| write_all_buffered(file, &output))?;

    log::debug!(
        "{}: {} ({} bytes) -> {} ({} bytes), {records} records",
        direction.name(),
        input_path.display(),
        input.len(),
        output_path.display(),
        output.len(),
    );

    Ok(FileStats {
        input_size: input.len() as u64,
        output_size: output.len() as u64,
        records,
        input_sha256: sha256(&input),
        output_sha256: sha256(&output),
    })
}

/// Replace `output_path` with whatever `fill` writes, or leave it untouched.
///
/// `fill` writes into a temporary sibling file, which is removed on error and
/// renamed over `output_path` on success.
fn write_output<F>(output_path: &Path, fill: F) -> Result<(), IoError>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    // Same creation mode as `File::create`; the umask still applies.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp: NamedTempFile = builder.tempfile_in(dir)?;
    fill(tmp.as_file_mut())?;
    tmp.persist(output_path).map_err(|e| e.error)?;
    Ok(())
}

fn write_all_buffered<W: Write>(writer: W, data: &[u8]) -> io::Result<()> {
    let mut writer = BufWriter::with_capacity(BUF_SIZE, writer);
    writer.write_all(data)?;
    writer.flush()
}

#[cfg(feature = "file-io")]
fn sha256(data: &[u8]) -> Option<[u8; 32]> {
    Some(Sha256::digest(data).into())
}

#[cfg(not(feature = "file-io"))]
fn sha256(_data: &[u8]) -> Option<[u8; 32]> {
    None
}

// ---------------------------------------------------------------------------
// Batch helpers
// ---------------------------------------------------------------------------

/// Outcome of one file in a batch.
#[derive(Debug)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: Result<FileStats, IoError>,
}

/// Process each input into its derived sibling path.
///
/// Repeated inputs are processed once; entries come back in first-seen
/// order. An input whose derived output is another input of the batch is not
/// processed and reports [`IoError::OutputIsInput`]. With the `parallel`
/// feature the files are processed on the rayon pool.
pub fn process_files(direction: Direction, inputs: &[PathBuf]) -> Vec<BatchEntry> {
    let mut seen = HashSet::new();
    let unique: Vec<&PathBuf> = inputs
        .iter()
        .filter(|input| seen.insert(path_key(input)))
        .collect();

    log::trace!(
        "{}: batch of {} files ({} unique)",
        direction.name(),
        inputs.len(),
        unique.len()
    );

    let run_one = |input: &&PathBuf| {
        let output = direction.output_path(input);
        let result = if seen.contains(&path_key(&output)) {
            Err(IoError::OutputIsInput {
                path: output.clone(),
            })
        } else {
            process_file(direction, input, &output)
        };
        BatchEntry {
            input: (*input).clone(),
            output,
            result,
        }
    };

    #[cfg(feature = "parallel")]
    let entries: Vec<BatchEntry> = unique.par_iter().map(run_one).collect();
    #[cfg(not(feature = "parallel"))]
    let entries: Vec<BatchEntry> = unique.iter().map(run_one).collect();

    entries
}

/// Lexically absolute form of `path`, used to compare batch paths.
fn path_key(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Encode each input into `<input>.encoded`.
pub fn encode_files(inputs: &[PathBuf]) -> Vec<BatchEntry> {
    process_files(Direction::Encode, inputs)
}

/// Decode each input into `<input>.decoded`.
pub fn decode_files(inputs: &[PathBuf]) -> Vec<BatchEntry> {
    process_files(Direction::Decode, inputs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
