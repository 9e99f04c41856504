#![no_main]
use libfuzzer_sys::fuzz_target;
use oxirle::rle;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode or fail with OddLength, never panic.
    match rle::decode(data) {
        Ok(out) => assert_eq!(out.len(), rle::decoded_len(data).unwrap()),
        Err(rle::RleError::OddLength { len }) => assert_eq!(len % 2, 1),
    }
});
