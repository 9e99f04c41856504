use oxirle::{hex, rle, text};
use proptest::prelude::*;

/// Byte buffers made of a handful of runs, some longer than one record.
fn runny_bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec((any::<u8>(), 1usize..700), 0..12).prop_map(|runs| {
        runs.into_iter()
            .flat_map(|(value, len)| std::iter::repeat_n(value, len))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_rle_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let encoded = rle::encode(&data);
        prop_assert_eq!(rle::decode(&encoded).unwrap(), data);
    }

    #[test]
    fn prop_rle_roundtrip_long_runs(data in runny_bytes()) {
        let encoded = rle::encode(&data);
        prop_assert_eq!(rle::decode(&encoded).unwrap(), data);
    }

    #[test]
    fn prop_encoded_size_follows_runs(data in runny_bytes()) {
        let encoded = rle::encode(&data);
        let expected: usize = rle::runs(&data)
            .map(|run| 2 * run.len.div_ceil(255))
            .sum();
        prop_assert_eq!(encoded.len(), expected);
        prop_assert_eq!(rle::encoded_len(&data), expected);
        prop_assert!(encoded.len() % 2 == 0);
        prop_assert!(encoded.len() <= 2 * data.len());
    }

    #[test]
    fn prop_no_zero_counts_emitted(data in runny_bytes()) {
        let encoded = rle::encode(&data);
        prop_assert!(rle::records(&encoded).unwrap().all(|r| r.count > 0));
    }

    #[test]
    fn prop_adjacent_records_split_only_full_runs(data in runny_bytes()) {
        // Two adjacent records may share a value only when the first is full.
        let encoded = rle::encode(&data);
        let recs: Vec<_> = rle::records(&encoded).unwrap().collect();
        for pair in recs.windows(2) {
            if pair[0].value == pair[1].value {
                prop_assert_eq!(pair[0].count, 255);
            }
        }
    }

    #[test]
    fn prop_decoded_len_matches(encoded in proptest::collection::vec(any::<u8>(), 0..512)
        .prop_map(|mut v| { v.truncate(v.len() & !1); v }))
    {
        let decoded = rle::decode(&encoded).unwrap();
        prop_assert_eq!(rle::decoded_len(&encoded).unwrap(), decoded.len());
    }

    #[test]
    fn prop_odd_length_always_rejected(
        encoded in proptest::collection::vec(any::<u8>(), 0..512)
            .prop_map(|mut v| { if v.len() % 2 == 0 { v.push(0) } v })
    ) {
        let is_odd_length = matches!(rle::decode(&encoded), Err(rle::RleError::OddLength { .. }));
        prop_assert!(is_odd_length);
    }

    #[test]
    fn prop_hex_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let h = hex::to_hex(&data);
        prop_assert_eq!(h.len(), data.len() * 2);
        prop_assert_eq!(hex::from_hex(&h).unwrap(), data);
    }

    #[test]
    fn prop_hex_case_insensitive(s in "([0-9a-fA-F]{2}){0,64}") {
        let bytes = hex::from_hex(&s).unwrap();
        prop_assert_eq!(hex::to_hex(&bytes), s.to_ascii_lowercase());
    }

    #[test]
    fn prop_hex_parse_never_panics(s in "\\PC{0,64}") {
        let _ = hex::from_hex(&s);
    }

    #[test]
    fn prop_text_roundtrip(s in "\\PC{0,256}") {
        let h = text::encode_text(&s);
        prop_assert_eq!(text::decode_text(&h).unwrap(), s);
    }
}
