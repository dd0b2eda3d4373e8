use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use simprint_span::{FileId, SubmissionId};

/// One non-overlapping slice of a file plus the fingerprint groups active
/// across its whole extent, indexed by group id into the owning
/// [`MatchReport::span_groups`] table — the mapping from span to its
/// group that a renderer needs for cross-file highlighting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentView {
    pub text: String,
    pub active_groups: BTreeSet<usize>,
}

/// One file's fragments within a [`SubmissionReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub file_id: FileId,
    pub fragments: Vec<FragmentView>,
}

/// One submission's side of a matched pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReport {
    pub submission_id: SubmissionId,
    pub files: Vec<FileReport>,
}

/// A matched fingerprint hash, after expansion, with the group id the
/// fragments above reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanGroup {
    pub group_id: usize,
    pub hash: u64,
}

/// Everything a renderer needs for one top-scoring pair: both submission
/// ids, their files broken into fragments, and the hash each fragment
/// group corresponds to for cross-file highlighting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub sid1: SubmissionId,
    pub sid2: SubmissionId,
    pub score: usize,
    pub side_a: SubmissionReport,
    pub side_b: SubmissionReport,
    pub span_groups: Vec<SpanGroup>,
}
