//! Fragment slicing.
//!
//! Turns a file plus a set of possibly-overlapping matched spans into a
//! flat, non-overlapping sequence of fragments, each carrying the set of
//! spans active across its entire extent. A pure sweep-line function,
//! with no state outliving a single call.

use std::collections::BTreeSet;

use simprint_span::Span;

/// A span is identified by its position in the caller's slice for the
/// duration of one `slice` call — callers map indices back to whatever
/// identity (group hash, submission side) they need downstream.
pub type SpanIndex = usize;

/// One contiguous, non-overlapping piece of a file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub content: &'a [u8],
    pub active: BTreeSet<SpanIndex>,
}

/// Slice `content` according to `spans`, in the order the spans appear in
/// the slice (their position becomes their [`SpanIndex`]).
///
/// Concatenating `fragment.content` across the returned sequence, in
/// order, reproduces `content` exactly. Adjacent fragments never share
/// the same active set.
pub fn slice<'a>(content: &'a [u8], spans: &[Span]) -> Vec<Fragment<'a>> {
    let file_len = content.len();

    let mut marks: Vec<usize> = spans
        .iter()
        .flat_map(|s| [s.start(), s.end()])
        .filter(|&m| m != 0)
        .collect();
    marks.sort_unstable();
    marks.dedup();

    match marks.last() {
        Some(&last) if last < file_len => marks.push(file_len),
        None if file_len > 0 => marks.push(file_len),
        _ => {}
    }

    let mut active: BTreeSet<SpanIndex> = spans
        .iter()
        .enumerate()
        .filter(|(_, s)| s.start() == 0)
        .map(|(i, _)| i)
        .collect();

    let mut fragments = Vec::with_capacity(marks.len());
    let mut prev = 0usize;

    for m in marks {
        if m > prev {
            fragments.push(Fragment {
                content: &content[prev..m],
                active: active.clone(),
            });
        }
        for (i, s) in spans.iter().enumerate() {
            if s.start() == m {
                active.insert(i);
            }
        }
        for (i, s) in spans.iter().enumerate() {
            if s.end() == m {
                active.remove(&i);
            }
        }
        prev = m;
    }

    fragments
}
