//! The robust-winnowing algorithm itself.
//!
//! Uses a ring buffer that re-scans leftmost on eviction and only emits
//! on strict improvement, rather than a monotonic deque with rightmost
//! tie-breaking — this keeps the emitted fingerprint position stable and
//! reproducible across re-scans of the same window.

use simprint_hash::WindowHasher;
use simprint_span::{FileId, Span};

use crate::config::WinnowConfig;
use crate::stream::PreprocessedStream;

/// Run robust winnowing over one file's preprocessed stream.
///
/// Returns fingerprint spans ordered by `start` ascending (ties broken by
/// hash, i.e. insertion order). An empty or too-short stream (fewer than
/// `k` items) yields an empty stream rather than an error.
pub fn winnow<H: WindowHasher>(
    file_id: FileId,
    stream: PreprocessedStream,
    cfg: &WinnowConfig,
    hasher: &H,
) -> Vec<Span> {
    let Some(table) = stream.into_item_table() else {
        return Vec::new();
    };
    let n = table.items.len();
    let k = cfg.k();
    if n < k {
        return Vec::new();
    }

    let hash_count = n - k + 1;
    let hashes: Vec<u64> = (0..hash_count)
        .map(|i| {
            let refs: Vec<&str> = table.items[i..i + k].iter().map(String::as_str).collect();
            hasher.hash_window(&refs)
        })
        .collect();

    let w = cfg.w();
    let sentinel = Span::new(file_id, 0, 0, u64::MAX);
    let mut buf: Vec<Span> = vec![sentinel; w];
    let mut min_idx = 0usize;
    let mut fingerprints = Vec::new();

    for i in 0..hash_count {
        let idx = i % w;
        buf[idx] = Span::new(file_id, table.indices[i], table.indices[i + k], hashes[i]);

        if min_idx == idx {
            // The prior minimum has just been overwritten or left the
            // window. Re-scan newest-to-oldest and keep the leftmost
            // position whose hash is strictly less than the current min.
            for step in 1..w {
                let search_idx = (idx + w - step) % w;
                if buf[search_idx].hash() < buf[min_idx].hash() {
                    min_idx = search_idx;
                }
            }
            fingerprints.push(buf[min_idx]);
        } else if buf[idx].hash() < buf[min_idx].hash() {
            min_idx = idx;
            fingerprints.push(buf[min_idx]);
        }
    }

    fingerprints
}

#[cfg(test)]
mod tests {
    use simprint_hash::SumOfCharsHasher;

    use super::*;

    fn by_char(s: &str) -> PreprocessedStream {
        PreprocessedStream::ByChar(s.char_indices().collect())
    }

    #[test]
    fn empty_input_yields_empty_stream() {
        let cfg = WinnowConfig::new(3, 5).unwrap();
        let out = winnow(FileId(0), by_char(""), &cfg, &SumOfCharsHasher);
        assert!(out.is_empty());
    }

    #[test]
    fn file_shorter_than_k_yields_empty_stream() {
        let cfg = WinnowConfig::new(5, 5).unwrap();
        let out = winnow(FileId(0), by_char("ab"), &cfg, &SumOfCharsHasher);
        assert!(out.is_empty());
    }

    #[test]
    fn emitted_spans_are_strictly_ordered_by_start() {
        let cfg = WinnowConfig::new(3, 5).unwrap();
        let out = winnow(
            FileId(0),
            by_char("the quick brown fox jumps over the lazy dog"),
            &cfg,
            &SumOfCharsHasher,
        );
        for pair in out.windows(2) {
            assert!(pair[0].start() <= pair[1].start());
        }
    }

    #[test]
    fn every_span_covers_exactly_k_items() {
        let cfg = WinnowConfig::new(3, 5).unwrap();
        let out = winnow(FileId(0), by_char("abcabcabcabc"), &cfg, &SumOfCharsHasher);
        for span in &out {
            assert_eq!(span.end() - span.start(), 3);
            assert!(span.start() < span.end());
            assert!(span.end() <= 12);
        }
    }

    #[test]
    fn identical_files_produce_identical_fingerprint_streams() {
        let cfg = WinnowConfig::new(3, 5).unwrap();
        let a = winnow(FileId(0), by_char("abcabc"), &cfg, &SumOfCharsHasher);
        let b = winnow(FileId(1), by_char("abcabc"), &cfg, &SumOfCharsHasher);
        let a_hashes: Vec<u64> = a.iter().map(|s| s.hash()).collect();
        let b_hashes: Vec<u64> = b.iter().map(|s| s.hash()).collect();
        assert_eq!(a_hashes, b_hashes);
    }

    #[test]
    fn identical_files_emit_overlapping_hash_sets() {
        // k=3, t=5, w=3, "abcabc" vs "abcabc".
        let cfg = WinnowConfig::new(3, 5).unwrap();
        let a = winnow(FileId(0), by_char("abcabc"), &cfg, &SumOfCharsHasher);
        let b = winnow(FileId(1), by_char("abcabc"), &cfg, &SumOfCharsHasher);
        assert!(!a.is_empty());
        assert!(!b.is_empty());
        let a_hashes: std::collections::HashSet<u64> = a.iter().map(|s| s.hash()).collect();
        let b_hashes: std::collections::HashSet<u64> = b.iter().map(|s| s.hash()).collect();
        assert!(a_hashes.intersection(&b_hashes).next().is_some());
    }

    #[test]
    fn short_file_yields_empty_index_material() {
        let cfg = WinnowConfig::new(3, 5).unwrap();
        let out = winnow(FileId(0), by_char("ab"), &cfg, &SumOfCharsHasher);
        assert!(out.is_empty());
    }

    #[test]
    fn by_span_mode_produces_spans_from_token_ranges() {
        let cfg = WinnowConfig::new(2, 3).unwrap();
        let tokens = PreprocessedStream::BySpan(vec![
            ("foo".into(), 0, 3),
            ("bar".into(), 4, 7),
            ("baz".into(), 8, 11),
            ("qux".into(), 12, 15),
        ]);
        let out = winnow(FileId(0), tokens, &cfg, &SumOfCharsHasher);
        assert!(!out.is_empty());
        for span in &out {
            assert!(span.start() < span.end());
            assert!(span.end() <= 15);
        }
    }

    #[test]
    fn winnowing_guarantee_holds_over_random_like_text() {
        // The winnowing guarantee: in any window of t consecutive items, at
        // least one of its w k-grams' hash appears as an emitted
        // fingerprint. We check this directly by re-deriving the hash
        // sequence and confirming every w-wide window of hashes intersects
        // the emitted hash set.
        let cfg = WinnowConfig::new(4, 7).unwrap();
        let text = "the quick brown fox jumps over the lazy dog and then some more words";
        let stream = by_char(text);
        let items: Vec<String> = text.chars().map(|c| c.to_string()).collect();
        let k = cfg.k();
        let hash_count = items.len() - k + 1;
        let raw_hashes: Vec<u64> = (0..hash_count)
            .map(|i| {
                let refs: Vec<&str> = items[i..i + k].iter().map(String::as_str).collect();
                SumOfCharsHasher.hash_window(&refs)
            })
            .collect();

        let out = winnow(FileId(0), stream, &cfg, &SumOfCharsHasher);
        let emitted: std::collections::HashSet<u64> = out.iter().map(|s| s.hash()).collect();

        let w = cfg.w();
        for window in raw_hashes.windows(w) {
            assert!(
                window.iter().any(|h| emitted.contains(h)),
                "no emitted fingerprint in window {window:?}"
            );
        }
    }
}
