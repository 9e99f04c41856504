#![no_main]
use libfuzzer_sys::fuzz_target;
use oxirle::{hex, rle};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Use the first byte to stretch the payload into long runs.
    let stretch = data[0] as usize + 1;
    let payload: Vec<u8> = data[1..]
        .iter()
        .flat_map(|&b| std::iter::repeat_n(b, stretch))
        .collect();

    let encoded = rle::encode(&payload);
    assert_eq!(encoded.len(), rle::encoded_len(&payload));
    assert_eq!(rle::decode(&encoded).unwrap(), payload);

    let text = hex::to_hex(&encoded);
    assert_eq!(hex::from_hex(&text).unwrap(), encoded);
});
