use oxirle::io::{decode_file, decoded_path, encode_file, encoded_path};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::io::Read;
use tempfile::{NamedTempFile, tempdir};

/// Random bytes with runs of random length, some longer than one record.
fn runny_payload(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        let value: u8 = rng.random();
        let run = rng.random_range(1..=600usize).min(len - out.len());
        out.extend(std::iter::repeat_n(value, run));
    }
    out
}

#[test]
fn named_temp_file_roundtrip() {
    let input = NamedTempFile::new().unwrap();
    let encoded = NamedTempFile::new().unwrap();
    let decoded = NamedTempFile::new().unwrap();

    let data = runny_payload(256 * 1024, 7);
    std::fs::write(input.path(), &data).unwrap();

    let enc = encode_file(input.path(), encoded.path()).unwrap();
    assert_eq!(enc.input_size, data.len() as u64);
    assert!(enc.output_size < enc.input_size);
    assert_eq!(enc.output_size % 2, 0);

    let dec = decode_file(encoded.path(), decoded.path()).unwrap();
    assert_eq!(dec.output_size, data.len() as u64);
    assert_eq!(dec.records, enc.records);
    assert_eq!(std::fs::read(decoded.path()).unwrap(), data);
}

#[test]
fn incompressible_file_doubles() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("ramp.bin");
    let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
    std::fs::write(&input, &data).unwrap();

    let stats = encode_file(&input, &encoded_path(&input)).unwrap();
    assert_eq!(stats.output_size, 2 * data.len() as u64);
    assert_eq!(stats.records, data.len() as u64);
}

#[test]
fn decode_overwrites_existing_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.encoded");
    std::fs::write(&input, [5u8, b'!']).unwrap();
    let out = decoded_path(&input);
    std::fs::write(&out, b"old contents that are longer").unwrap();

    decode_file(&input, &out).unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), b"!!!!!");
}

#[test]
#[ignore = "large file test is opt-in due runtime and disk requirements"]
fn large_sparse_file_roundtrip() {
    let input = NamedTempFile::new().unwrap();
    let encoded = NamedTempFile::new().unwrap();
    let decoded = NamedTempFile::new().unwrap();

    // 256 MiB of zeros: one record per 255 bytes.
    let size: u64 = 256 * 1024 * 1024;
    input.as_file().set_len(size).unwrap();

    let enc = encode_file(input.path(), encoded.path()).unwrap();
    assert_eq!(enc.records, size.div_ceil(255));

    let dec = decode_file(encoded.path(), decoded.path()).unwrap();
    assert_eq!(dec.output_size, size);

    let mut f = std::fs::File::open(decoded.path()).unwrap();
    let mut buf = vec![0u8; 1 << 20];
    loop {
        let n = f.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        assert!(buf[..n].iter().all(|&b| b == 0));
    }
}
