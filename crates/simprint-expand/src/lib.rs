//! Context expansion.
//!
//! A matched hash group is a set of spans, drawn from both sides of a
//! submission pair, that all produced the same fingerprint hash. This
//! crate grows every span in a group outward, one character at a time,
//! for as long as *every* span in the group agrees on the next character
//! in that direction — content identical at every occurrence of a shared
//! fingerprint is, by construction, also part of the matched region.
//!
//! Pure function over borrowed file bytes, no state held across calls.

use std::collections::HashSet;

use simprint_span::{FileId, Span};
use thiserror::Error;

/// Errors raised while expanding a match group.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpandError {
    #[error("span [{start}, {end}) on file {file_id} exceeds its content length {file_len}")]
    SpanOutOfBounds {
        file_id: FileId,
        start: usize,
        end: usize,
        file_len: usize,
    },
}

/// Read-only access to a file's bytes by id, supplied by the pipeline's
/// file cache. Kept minimal so this crate never depends on the driver
/// crate that owns the actual cache.
pub trait FileBytes {
    fn bytes(&self, file_id: FileId) -> &[u8];
}

/// All spans, from both submissions of a pair, that produced one shared
/// fingerprint hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    pub hash: u64,
    pub spans_a: Vec<Span>,
    pub spans_b: Vec<Span>,
}

impl MatchGroup {
    pub fn new(hash: u64, spans_a: Vec<Span>, spans_b: Vec<Span>) -> Self {
        MatchGroup {
            hash,
            spans_a,
            spans_b,
        }
    }

    fn all_spans(&self) -> impl Iterator<Item = &Span> {
        self.spans_a.iter().chain(self.spans_b.iter())
    }
}

/// Grow every span in `group` outward while all occurrences agree on the
/// next boundary character, per side. Returns the grown spans for side A
/// followed by the grown spans for side B, in original order, each still
/// carrying its original `hash`.
pub fn expand_group(group: &MatchGroup, files: &dyn FileBytes) -> Result<Vec<Span>, ExpandError> {
    let mut bounds: Vec<(FileId, usize, usize)> = group
        .all_spans()
        .map(|s| (s.file_id(), s.start(), s.end()))
        .collect();

    for &(file_id, _, end) in &bounds {
        let len = files.bytes(file_id).len();
        if end > len {
            return Err(ExpandError::SpanOutOfBounds {
                file_id,
                start: 0,
                end,
                file_len: len,
            });
        }
    }

    loop {
        let mut changed = false;

        let prev: HashSet<Option<u8>> = bounds
            .iter()
            .map(|&(file_id, start, _)| {
                if start > 0 {
                    Some(files.bytes(file_id)[start - 1])
                } else {
                    None
                }
            })
            .collect();
        if prev.len() == 1 {
            if let Some(&Some(_)) = prev.iter().next() {
                for b in &mut bounds {
                    b.1 -= 1;
                }
                changed = true;
            }
        }

        let next: HashSet<Option<u8>> = bounds
            .iter()
            .map(|&(file_id, _, end)| {
                let content = files.bytes(file_id);
                if end < content.len() {
                    Some(content[end])
                } else {
                    None
                }
            })
            .collect();
        if next.len() == 1 {
            if let Some(&Some(_)) = next.iter().next() {
                for b in &mut bounds {
                    b.2 += 1;
                }
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    Ok(group
        .all_spans()
        .zip(bounds.into_iter())
        .map(|(original, (_, start, end))| original.with_bounds(start, end))
        .collect())
}

/// Expand every group in a pair's matched-hash mapping. Groups are
/// independent, safe to run in parallel by the caller.
pub fn expand_all(
    groups: &[MatchGroup],
    files: &dyn FileBytes,
) -> Result<Vec<(u64, Vec<Span>)>, ExpandError> {
    groups
        .iter()
        .map(|group| expand_group(group, files).map(|spans| (group.hash, spans)))
        .collect()
}
