use serde::{Deserialize, Serialize};
use simprint_span::PassName;
use simprint_winnow::WinnowConfig;

/// Options for one pass over a corpus: `k`/`t` (via [`WinnowConfig`]),
/// `by_span`, and `top_n`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassConfig {
    pub pass_name: PassName,
    pub k: usize,
    pub t: usize,
    /// Whether the configured preprocessor should run in by-span (token)
    /// mode rather than by-character mode. Purely informational here; the
    /// preprocessor implementation decides which [`simprint_winnow::PreprocessedStream`]
    /// variant it actually produces.
    #[serde(default)]
    pub by_span: bool,
    /// Number of top-scoring pairs to report.
    pub top_n: usize,
    /// Fan out per-file fingerprinting and per-pair expansion/slicing via
    /// `rayon`. Off by default for deterministic single-threaded tests.
    #[serde(default)]
    pub parallel: bool,
}

impl PassConfig {
    pub fn winnow_config(&self) -> Result<WinnowConfig, simprint_winnow::WinnowError> {
        WinnowConfig::new(self.k, self.t)
    }
}
