#![no_main]
use libfuzzer_sys::fuzz_target;
use oxirle::{hex, text};

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    if let Ok(bytes) = hex::from_hex(&s) {
        assert_eq!(hex::to_hex(&bytes), s.to_ascii_lowercase());
    }
    let _ = text::decode_text(&s);
});
