//! Value types shared across the simprint similarity engine.
//!
//! This crate defines the smallest building blocks of the pipeline: opaque
//! identifiers for submissions and files, and the immutable [`Span`] that
//! every other component (winnower, index, expander, slicer) passes around.
//! Nothing here performs I/O or owns file content; it only describes byte
//! ranges and the hashes that produced them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a submission within one pipeline run.
///
/// Submissions are dense non-negative integers assigned by the caller; the
/// engine never interprets the value beyond ordering (`sid1 < sid2`) and
/// equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub u32);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "submission#{}", self.0)
    }
}

/// Opaque identifier for a single file owned by a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileId(pub u32);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

/// Name of a `(preprocessor, k, t)` configuration run.
///
/// Multiple passes may run over the same corpus and must not have their
/// fingerprints mixed; tagging indices and result records with the pass
/// name that produced them keeps that straight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PassName(pub String);

impl fmt::Display for PassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PassName {
    fn from(s: &str) -> Self {
        PassName(s.to_string())
    }
}

/// An immutable byte-range fingerprint: `(file_id, start, end, hash)`.
///
/// Two spans are equal iff all four fields are equal. Spans are shared by
/// reference across the index and scoring tables but are never mutated
/// after construction — every field is private and only reachable through
/// read-only accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    file_id: FileId,
    start: usize,
    end: usize,
    hash: u64,
}

/// Violation of a [`Span`]'s bounds invariant (`0 <= start < end <= file_len`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("span [{start}, {end}) on {file_id} is out of bounds for file of length {file_len}")]
pub struct SpanBoundsError {
    pub file_id: FileId,
    pub start: usize,
    pub end: usize,
    pub file_len: usize,
}

impl Span {
    /// Construct a span without checking it against a file length.
    ///
    /// Callers that know the file length up front (the winnower does, via
    /// its own `indices` table) should prefer [`Span::checked`].
    pub fn new(file_id: FileId, start: usize, end: usize, hash: u64) -> Self {
        Span {
            file_id,
            start,
            end,
            hash,
        }
    }

    /// Construct a span, validating `0 <= start < end <= file_len`.
    pub fn checked(
        file_id: FileId,
        start: usize,
        end: usize,
        hash: u64,
        file_len: usize,
    ) -> Result<Self, SpanBoundsError> {
        if start < end && end <= file_len {
            Ok(Span::new(file_id, start, end, hash))
        } else {
            Err(SpanBoundsError {
                file_id,
                start,
                end,
                file_len,
            })
        }
    }

    /// Re-validate an existing span's bounds against a (possibly different)
    /// file length, e.g. after the expander has grown it.
    pub fn validate(&self, file_len: usize) -> Result<(), SpanBoundsError> {
        if self.start < self.end && self.end <= file_len {
            Ok(())
        } else {
            Err(SpanBoundsError {
                file_id: self.file_id,
                start: self.start,
                end: self.end,
                file_len,
            })
        }
    }

    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Return a copy of this span with new bounds, keeping `file_id`/`hash`.
    ///
    /// Used by the expander, which only ever widens `start`/`end` and never
    /// touches which file or hash the span belongs to.
    pub fn with_bounds(&self, start: usize, end: usize) -> Self {
        Span {
            file_id: self.file_id,
            start,
            end,
            hash: self.hash,
        }
    }
}
