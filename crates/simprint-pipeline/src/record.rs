use serde::{Deserialize, Serialize};
use simprint_index::ScoredPair;
use simprint_span::{FileId, PassName};

/// One fingerprint in a pass's result set: `(hash, file_id, start, end)`.
/// The core makes no assumptions about how this is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintRecord {
    pub hash: u64,
    pub file_id: FileId,
    pub start: usize,
    pub end: usize,
}

/// Everything one pass produced: the fingerprint set plus per-pair scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassResult {
    pub pass_name: PassName,
    pub fingerprints: Vec<FingerprintRecord>,
    pub pair_scores: Vec<ScoredPair>,
}
