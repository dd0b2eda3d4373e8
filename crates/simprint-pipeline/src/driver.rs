use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use rayon::prelude::*;
use simprint_expand::MatchGroup;
use simprint_hash::WindowHasher;
use simprint_index::{ComparisonOrder, ScoredPair, WinnowingIndex};
use simprint_span::{FileId, Span, SubmissionId};
use simprint_winnow::winnow;

use crate::config::PassConfig;
use crate::error::PipelineError;
use crate::file_cache::FileCache;
use crate::file_store::FileStore;
use crate::metrics::{NoopMetrics, PipelineMetrics};
use crate::preprocessor::Preprocessor;
use crate::record::{FingerprintRecord, PassResult};
use crate::report::{FileReport, FragmentView, MatchReport, SpanGroup, SubmissionReport};

/// A file owned by a [`Submission`]: an opaque id plus a path kept purely
/// for diagnostics (the core never inspects path text).
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub file_id: FileId,
    pub path: String,
}

/// A submission: a dense id plus the files it owns. The core never
/// mutates submissions.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: SubmissionId,
    pub files: Vec<SourceFile>,
}

/// Everything one call to [`Pipeline::run_pass`] produces.
pub struct PassOutcome {
    pub pass_result: PassResult,
    pub top_pairs: Vec<ScoredPair>,
    pub reports: Vec<MatchReport>,
    pub archive_hits: Option<Vec<ScoredPair>>,
}

/// Composes indexing, distro subtraction, comparison, expansion, and
/// slicing into one pass over a corpus.
pub struct Pipeline<H: WindowHasher + Sync> {
    hasher: H,
    metrics: Box<dyn PipelineMetrics>,
}

impl<H: WindowHasher + Sync> Pipeline<H> {
    pub fn new(hasher: H) -> Self {
        Pipeline {
            hasher,
            metrics: Box::new(NoopMetrics),
        }
    }

    pub fn with_metrics(hasher: H, metrics: Box<dyn PipelineMetrics>) -> Self {
        Pipeline { hasher, metrics }
    }

    /// Fingerprint a single file: read, preprocess, winnow.
    fn index_file(
        &self,
        store: &dyn FileStore,
        cache: &FileCache,
        preprocessor: &dyn Preprocessor,
        cfg: &PassConfig,
        sid: SubmissionId,
        file: &SourceFile,
    ) -> Result<(WinnowingIndex, Vec<FingerprintRecord>), PipelineError> {
        let winnow_cfg = cfg.winnow_config()?;
        let bytes = cache.get_or_fetch(file.file_id, store)?;
        let stream = preprocessor.preprocess(file.file_id, &bytes)?;
        let spans = winnow(file.file_id, stream, &winnow_cfg, &self.hasher);
        let fingerprints = spans
            .iter()
            .map(|span| FingerprintRecord {
                hash: span.hash(),
                file_id: span.file_id(),
                start: span.start(),
                end: span.end(),
            })
            .collect();
        let index = WinnowingIndex::build(cfg.k, spans, sid);
        Ok((index, fingerprints))
    }

    /// Build one submission's fingerprint index by preprocessing and
    /// winnowing each of its files, fanned out over `rayon` when
    /// `cfg.parallel` is set — per-file fingerprinting is embarrassingly
    /// parallel over immutable inputs.
    fn index_submission(
        &self,
        store: &dyn FileStore,
        cache: &FileCache,
        preprocessor: &dyn Preprocessor,
        cfg: &PassConfig,
        submission: &Submission,
    ) -> Result<(WinnowingIndex, Vec<FingerprintRecord>), PipelineError> {
        let per_file: Vec<(WinnowingIndex, Vec<FingerprintRecord>)> = if cfg.parallel {
            submission
                .files
                .par_iter()
                .map(|file| self.index_file(store, cache, preprocessor, cfg, submission.id, file))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            submission
                .files
                .iter()
                .map(|file| self.index_file(store, cache, preprocessor, cfg, submission.id, file))
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut index = WinnowingIndex::empty(cfg.k);
        let mut fingerprints = Vec::new();
        for (file_index, file_fingerprints) in per_file {
            index.merge(&file_index)?;
            fingerprints.extend(file_fingerprints);
        }

        Ok((index, fingerprints))
    }

    /// Run one pass over a corpus, optionally subtracting a distro index
    /// and comparing against an archive of prior submissions.
    #[tracing::instrument(skip_all, fields(pass = %cfg.pass_name, corpus_size = corpus.len()))]
    pub fn run_pass(
        &self,
        store: &dyn FileStore,
        preprocessor: &dyn Preprocessor,
        cfg: &PassConfig,
        corpus: &[Submission],
        distro: &[SourceFile],
        archive: Option<&[Submission]>,
    ) -> Result<PassOutcome, PipelineError> {
        let cache = FileCache::new();
        let start = Instant::now();

        let mut per_submission: HashMap<SubmissionId, WinnowingIndex> = HashMap::new();
        let mut corpus_index = WinnowingIndex::empty(cfg.k);
        let mut all_fingerprints = Vec::new();

        for submission in corpus {
            match self.index_submission(store, &cache, preprocessor, cfg, submission) {
                Ok((index, fingerprints)) => {
                    corpus_index.merge(&index)?;
                    all_fingerprints.extend(fingerprints);
                    per_submission.insert(submission.id, index);
                }
                Err(PipelineError::IoFailure { file_id, source }) => {
                    tracing::warn!(
                        submission = %submission.id,
                        file_id = %file_id,
                        %source,
                        "skipping submission: file read failed"
                    );
                }
                Err(e) => return Err(e),
            }
        }
        self.metrics.record_phase("index_corpus", start.elapsed());

        let distro_start = Instant::now();
        if !distro.is_empty() {
            let winnow_cfg = cfg.winnow_config()?;
            let mut distro_index = WinnowingIndex::empty(cfg.k);
            for file in distro {
                let bytes = cache.get_or_fetch(file.file_id, store)?;
                let stream = preprocessor.preprocess(file.file_id, &bytes)?;
                let spans = winnow(file.file_id, stream, &winnow_cfg, &self.hasher);
                distro_index.merge(&WinnowingIndex::build(cfg.k, spans, SubmissionId(u32::MAX)))?;
            }
            corpus_index.subtract(&distro_index)?;
            for index in per_submission.values_mut() {
                index.subtract(&distro_index)?;
            }
        }
        self.metrics.record_phase("subtract_distro", distro_start.elapsed());

        let archive_hits = if let Some(archive) = archive {
            let archive_start = Instant::now();
            let mut archive_index = WinnowingIndex::empty(cfg.k);
            for submission in archive {
                match self.index_submission(store, &cache, preprocessor, cfg, submission) {
                    Ok((index, _)) => archive_index.merge(&index)?,
                    Err(PipelineError::IoFailure { file_id, source }) => {
                        tracing::warn!(
                            submission = %submission.id,
                            file_id = %file_id,
                            %source,
                            "skipping archive submission: file read failed"
                        );
                    }
                    Err(e) => return Err(e),
                }
            }
            let (hits, _) = corpus_index.compare(
                &archive_index,
                cfg.top_n,
                ComparisonOrder::Disjoint { self_is_lower: true },
            )?;
            self.metrics.record_phase("compare_archive", archive_start.elapsed());
            Some(hits)
        } else {
            None
        };

        let compare_start = Instant::now();
        let (top_pairs, _) = corpus_index.compare(&corpus_index, cfg.top_n, ComparisonOrder::SameCorpus)?;
        self.metrics.record_phase("compare_corpus", compare_start.elapsed());

        let file_to_submission: HashMap<FileId, SubmissionId> = corpus
            .iter()
            .filter(|s| per_submission.contains_key(&s.id))
            .flat_map(|s| s.files.iter().map(move |f| (f.file_id, s.id)))
            .collect();

        let snapshot_start = Instant::now();
        let mut all_file_ids: BTreeSet<FileId> = file_to_submission.keys().copied().collect();
        all_file_ids.extend(distro.iter().map(|f| f.file_id));
        cache.fill(store, all_file_ids)?;
        let snapshot = cache.snapshot();
        self.metrics.record_phase("fill_cache", snapshot_start.elapsed());

        let report_start = Instant::now();
        let build_one = |pair: &ScoredPair| -> Result<MatchReport, PipelineError> {
            let idx_a = per_submission
                .get(&pair.sid1)
                .expect("top pair references a known submission");
            let idx_b = per_submission
                .get(&pair.sid2)
                .expect("top pair references a known submission");

            let groups = idx_a
                .shared_hash_groups(idx_b)?
                .into_iter()
                .map(|(hash, spans_a, spans_b)| MatchGroup::new(hash, spans_a, spans_b))
                .collect::<Vec<_>>();

            let expanded = simprint_expand::expand_all(&groups, &snapshot)?;

            build_match_report(*pair, &expanded, corpus, &snapshot)
        };
        let raw_reports: Vec<Result<MatchReport, PipelineError>> = if cfg.parallel {
            top_pairs.par_iter().map(build_one).collect()
        } else {
            top_pairs.iter().map(build_one).collect()
        };

        let mut reports = Vec::with_capacity(raw_reports.len());
        for (pair, result) in top_pairs.iter().zip(raw_reports) {
            match result {
                Ok(report) => reports.push(report),
                Err(PipelineError::IoFailure { file_id, source }) => {
                    tracing::warn!(
                        sid1 = %pair.sid1,
                        sid2 = %pair.sid2,
                        file_id = %file_id,
                        %source,
                        "skipping pair report: file read failed"
                    );
                }
                Err(e) => return Err(e),
            }
        }
        self.metrics.record_phase("expand_and_slice", report_start.elapsed());

        Ok(PassOutcome {
            pass_result: PassResult {
                pass_name: cfg.pass_name.clone(),
                fingerprints: all_fingerprints,
                pair_scores: top_pairs.clone(),
            },
            top_pairs,
            reports,
            archive_hits,
        })
    }
}

/// Build a [`MatchReport`] from one pair's expanded match groups: route
/// grown spans back to their owning file, slice each file, and carry the
/// group id each fragment belongs to.
fn build_match_report(
    pair: ScoredPair,
    expanded_groups: &[(u64, Vec<Span>)],
    corpus: &[Submission],
    snapshot: &crate::file_cache::FileSnapshot,
) -> Result<MatchReport, PipelineError> {
    let mut spans_by_file: HashMap<FileId, Vec<(usize, Span)>> = HashMap::new();
    let mut span_groups = Vec::with_capacity(expanded_groups.len());

    for (group_id, (hash, spans)) in expanded_groups.iter().enumerate() {
        span_groups.push(SpanGroup {
            group_id,
            hash: *hash,
        });
        for span in spans {
            spans_by_file.entry(span.file_id()).or_default().push((group_id, *span));
        }
    }

    let submission_for = |sid: SubmissionId| -> Result<SubmissionReport, PipelineError> {
        let files: Result<Vec<FileReport>, PipelineError> = corpus
            .iter()
            .find(|s| s.id == sid)
            .map(|s| s.files.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|file| {
                let entries = match spans_by_file.get(&file.file_id) {
                    Some(entries) => entries,
                    None => return Ok(None),
                };
                let content = snapshot.get(file.file_id).unwrap_or(&[]);
                for (_, span) in entries {
                    span.validate(content.len()).map_err(|e| PipelineError::InvariantViolation {
                        file_id: e.file_id,
                        start: e.start,
                        end: e.end,
                        file_len: e.file_len,
                    })?;
                }
                let spans: Vec<Span> = entries.iter().map(|(_, s)| *s).collect();
                let fragments = simprint_slice::slice(content, &spans)
                    .into_iter()
                    .map(|fragment| FragmentView {
                        text: String::from_utf8_lossy(fragment.content).into_owned(),
                        active_groups: fragment
                            .active
                            .into_iter()
                            .map(|span_idx| entries[span_idx].0)
                            .collect(),
                    })
                    .collect();
                Ok(Some(FileReport {
                    file_id: file.file_id,
                    fragments,
                }))
            })
            .filter_map(|r| r.transpose())
            .collect::<Result<Vec<_>, PipelineError>>();
        let files = files?;
        Ok(SubmissionReport {
            submission_id: sid,
            files,
        })
    };

    Ok(MatchReport {
        sid1: pair.sid1,
        sid2: pair.sid2,
        score: pair.score,
        side_a: submission_for(pair.sid1)?,
        side_b: submission_for(pair.sid2)?,
        span_groups,
    })
}
