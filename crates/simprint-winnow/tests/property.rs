//! Property coverage for the winnowing guarantee and stream invariants
//! that hold for arbitrary input, not just hand-picked fixtures.

use proptest::prelude::*;
use simprint_hash::{SumOfCharsHasher, WindowHasher};
use simprint_span::FileId;
use simprint_winnow::{winnow, PreprocessedStream, WinnowConfig};

fn by_char(s: &str) -> PreprocessedStream {
    PreprocessedStream::ByChar(s.char_indices().collect())
}

proptest! {
    #[test]
    fn every_emitted_span_covers_exactly_k_items(
        text in "[a-z]{0,80}",
        k in 1usize..6,
        extra in 0usize..6,
    ) {
        let t = k + extra;
        let cfg = WinnowConfig::new(k, t).unwrap();
        let out = winnow(FileId(0), by_char(&text), &cfg, &SumOfCharsHasher);
        for span in &out {
            prop_assert_eq!(span.end() - span.start(), k);
            prop_assert!(span.start() < span.end());
            prop_assert!(span.end() <= text.len());
        }
    }

    #[test]
    fn spans_are_emitted_in_non_decreasing_start_order(
        text in "[a-z]{0,80}",
        k in 1usize..6,
        extra in 0usize..6,
    ) {
        let t = k + extra;
        let cfg = WinnowConfig::new(k, t).unwrap();
        let out = winnow(FileId(0), by_char(&text), &cfg, &SumOfCharsHasher);
        for pair in out.windows(2) {
            prop_assert!(pair[0].start() <= pair[1].start());
        }
    }

    #[test]
    fn winnowing_guarantee_holds(
        text in "[a-z]{0,80}",
        k in 1usize..6,
        extra in 0usize..6,
    ) {
        let t = k + extra;
        let cfg = WinnowConfig::new(k, t).unwrap();
        let w = cfg.w();
        let items: Vec<String> = text.chars().map(|c| c.to_string()).collect();
        if items.len() >= k {
            let hash_count = items.len() - k + 1;
            let raw_hashes: Vec<u64> = (0..hash_count)
                .map(|i| {
                    let refs: Vec<&str> = items[i..i + k].iter().map(String::as_str).collect();
                    SumOfCharsHasher.hash_window(&refs)
                })
                .collect();
            let out = winnow(FileId(0), by_char(&text), &cfg, &SumOfCharsHasher);
            let emitted: std::collections::HashSet<u64> = out.iter().map(|s| s.hash()).collect();
            for window in raw_hashes.windows(w) {
                prop_assert!(window.iter().any(|h| emitted.contains(h)));
            }
        }
    }

    #[test]
    fn identical_inputs_produce_identical_hash_sequences(
        text in "[a-z]{0,80}",
        k in 1usize..6,
        extra in 0usize..6,
    ) {
        let t = k + extra;
        let cfg = WinnowConfig::new(k, t).unwrap();
        let a = winnow(FileId(0), by_char(&text), &cfg, &SumOfCharsHasher);
        let b = winnow(FileId(1), by_char(&text), &cfg, &SumOfCharsHasher);
        let a_hashes: Vec<u64> = a.iter().map(|s| s.hash()).collect();
        let b_hashes: Vec<u64> = b.iter().map(|s| s.hash()).collect();
        prop_assert_eq!(a_hashes, b_hashes);
    }
}
