//! Reverse fingerprint index: `hash -> {(submission_id, span)}`.
//!
//! Construction from a fingerprint stream, commutative merge, key-deleting
//! subtract (used to strip distro/boilerplate fingerprints), and a
//! deterministic top-N pairwise `compare`. A small data-owning struct plus
//! a comparison routine that returns plain result structs — no backend
//! abstraction needed since the whole index lives in memory for one
//! pipeline run.

mod error;

pub use error::IndexError;

use std::collections::{HashMap, HashSet};

use simprint_span::{Span, SubmissionId};

/// Contract under which [`WinnowingIndex::compare`] dedupes a submission
/// pair (the "ordered-pair hack": avoid counting an unordered pair twice
/// without materializing a seen-set).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOrder {
    /// `self` and `other` are the same corpus index (or overlap); only
    /// pairs with `sid_a < sid_b` are counted, which simultaneously
    /// excludes self-pairs and avoids counting each unordered pair twice.
    SameCorpus,
    /// `self` and `other` are known to be disjoint id ranges, ordered so
    /// that every id in `self` is `<` every id in `other` (or vice versa,
    /// per `self_is_lower`). Violations are tolerated (the pair is still
    /// reported, normalized to `(min, max)`) but logged loudly — an
    /// accidental inversion here silently halves recall.
    Disjoint { self_is_lower: bool },
}

/// A single scored, matched submission pair from [`WinnowingIndex::compare`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScoredPair {
    pub sid1: SubmissionId,
    pub sid2: SubmissionId,
    pub score: usize,
}

/// Reverse index mapping fingerprint hashes to the `(submission, span)`
/// pairs that produced them.
#[derive(Debug, Clone)]
pub struct WinnowingIndex {
    k: usize,
    map: HashMap<u64, HashSet<(SubmissionId, Span)>>,
}

impl WinnowingIndex {
    /// An empty index for n-gram length `k`.
    pub fn empty(k: usize) -> Self {
        WinnowingIndex {
            k,
            map: HashMap::new(),
        }
    }

    /// Build an index from one submission's fingerprint stream.
    pub fn build(k: usize, fingerprints: impl IntoIterator<Item = Span>, sid: SubmissionId) -> Self {
        let mut index = WinnowingIndex::empty(k);
        for span in fingerprints {
            index.insert(span.hash(), sid, span);
        }
        index
    }

    fn insert(&mut self, hash: u64, sid: SubmissionId, span: Span) {
        self.map.entry(hash).or_default().insert((sid, span));
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn hash_count(&self) -> usize {
        self.map.len()
    }

    fn check_k(&self, other: &WinnowingIndex) -> Result<(), IndexError> {
        if self.k != other.k {
            Err(IndexError::ConfigMismatch {
                expected_k: self.k,
                actual_k: other.k,
            })
        } else {
            Ok(())
        }
    }

    /// Union `other`'s entries into `self` (append-only, commutative).
    pub fn merge(&mut self, other: &WinnowingIndex) -> Result<(), IndexError> {
        self.check_k(other)?;
        for (hash, entries) in &other.map {
            let slot = self.map.entry(*hash).or_default();
            for entry in entries {
                slot.insert(*entry);
            }
        }
        Ok(())
    }

    /// Return a new index that is the union of `self` and `other`.
    pub fn merged(&self, other: &WinnowingIndex) -> Result<WinnowingIndex, IndexError> {
        let mut result = self.clone();
        result.merge(other)?;
        Ok(result)
    }

    /// Remove every key present in `other`, regardless of which submission
    /// produced it in either index. Used to strip distro/boilerplate
    /// fingerprints from a corpus index before comparison.
    pub fn subtract(&mut self, other: &WinnowingIndex) -> Result<(), IndexError> {
        self.check_k(other)?;
        for hash in other.map.keys() {
            self.map.remove(hash);
        }
        Ok(())
    }

    /// Return a new index equal to `self` with every key in `other` removed.
    pub fn subtracted(&self, other: &WinnowingIndex) -> Result<WinnowingIndex, IndexError> {
        let mut result = self.clone();
        result.subtract(other)?;
        Ok(result)
    }

    /// Compare two indices, returning the `n` highest-scoring submission
    /// pairs and the union of spans that back them.
    ///
    /// Ties in score are broken by `(sid1, sid2)` lexicographic order, so
    /// repeated calls are deterministic. If fewer than `n` pairs exist, all
    /// are returned.
    pub fn compare(
        &self,
        other: &WinnowingIndex,
        n: usize,
        order: ComparisonOrder,
    ) -> Result<(Vec<ScoredPair>, HashSet<Span>), IndexError> {
        self.check_k(other)?;

        let mut scores: HashMap<(SubmissionId, SubmissionId), usize> = HashMap::new();
        let mut matches: HashMap<(SubmissionId, SubmissionId), HashSet<Span>> = HashMap::new();

        for (hash, self_entries) in &self.map {
            let Some(other_entries) = other.map.get(hash) else {
                continue;
            };

            let self_by_sid = group_by_submission(self_entries);
            let other_by_sid = group_by_submission(other_entries);

            for (&sid_a, spans_a) in &self_by_sid {
                for (&sid_b, spans_b) in &other_by_sid {
                    let Some(pair) = normalize_pair(sid_a, sid_b, order) else {
                        continue;
                    };

                    *scores.entry(pair).or_insert(0) += 1;
                    let slot = matches.entry(pair).or_default();
                    slot.extend(spans_a.iter().copied());
                    slot.extend(spans_b.iter().copied());
                }
            }
        }

        let mut ranked: Vec<(SubmissionId, SubmissionId, usize)> = scores
            .into_iter()
            .map(|((a, b), score)| (a, b, score))
            .collect();
        ranked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| (a.0, a.1).cmp(&(b.0, b.1))));
        ranked.truncate(n);

        let mut top_spans = HashSet::new();
        let top_pairs: Vec<ScoredPair> = ranked
            .into_iter()
            .map(|(sid1, sid2, score)| {
                if let Some(spans) = matches.get(&(sid1, sid2)) {
                    top_spans.extend(spans.iter().copied());
                }
                ScoredPair { sid1, sid2, score }
            })
            .collect();

        Ok((top_pairs, top_spans))
    }

    /// Raw per-hash span groups shared between `self` and `other`,
    /// ignoring submission ids and scoring — the input the expander needs
    /// for one already-selected pair, grouped by hash. Typically called
    /// with two single-submission indices, one per side of a pair.
    pub fn shared_hash_groups(&self, other: &WinnowingIndex) -> Result<Vec<(u64, Vec<Span>, Vec<Span>)>, IndexError> {
        self.check_k(other)?;

        let mut out = Vec::new();
        for (hash, self_entries) in &self.map {
            let Some(other_entries) = other.map.get(hash) else {
                continue;
            };
            let spans_a: Vec<Span> = self_entries.iter().map(|(_, s)| *s).collect();
            let spans_b: Vec<Span> = other_entries.iter().map(|(_, s)| *s).collect();
            out.push((*hash, spans_a, spans_b));
        }
        Ok(out)
    }
}

fn group_by_submission(
    entries: &HashSet<(SubmissionId, Span)>,
) -> HashMap<SubmissionId, Vec<Span>> {
    let mut out: HashMap<SubmissionId, Vec<Span>> = HashMap::new();
    for (sid, span) in entries {
        out.entry(*sid).or_default().push(*span);
    }
    out
}

fn normalize_pair(
    sid_a: SubmissionId,
    sid_b: SubmissionId,
    order: ComparisonOrder,
) -> Option<(SubmissionId, SubmissionId)> {
    match order {
        ComparisonOrder::SameCorpus => {
            if sid_a < sid_b {
                Some((sid_a, sid_b))
            } else {
                None
            }
        }
        ComparisonOrder::Disjoint { self_is_lower } => {
            let (expected_low, expected_high) = if self_is_lower {
                (sid_a, sid_b)
            } else {
                (sid_b, sid_a)
            };
            if expected_low < expected_high {
                Some((expected_low, expected_high))
            } else {
                tracing::warn!(
                    sid_a = sid_a.0,
                    sid_b = sid_b.0,
                    self_is_lower,
                    "compare() disjoint-order contract violated; pair recovered but recall may be affected"
                );
                let (lo, hi) = if sid_a < sid_b {
                    (sid_a, sid_b)
                } else {
                    (sid_b, sid_a)
                };
                if lo == hi {
                    None
                } else {
                    Some((lo, hi))
                }
            }
        }
    }
}
