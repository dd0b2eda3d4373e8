use simprint_span::FileId;
use thiserror::Error;

/// Errors surfaced at the driver boundary. Each inner crate keeps its own
/// narrower error type; this enum wraps them via `#[from]` at the point
/// where the driver composes them.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// merge/subtract/compare attempted across indices built with different `k`.
    #[error("incompatible index configuration: {0}")]
    ConfigMismatch(#[from] simprint_index::IndexError),

    /// Reading a file's content failed. The driver aborts only the affected
    /// pair, not the whole run.
    #[error("failed to read file {file_id}: {source}")]
    IoFailure {
        file_id: FileId,
        #[source]
        source: std::io::Error,
    },

    /// Match-group expansion hit a span outside its file's content.
    #[error("expansion failed: {0}")]
    Expansion(#[from] simprint_expand::ExpandError),

    /// A span fed to the slicer fell outside its file's bounds. Fatal —
    /// indicates a preprocessor/core contract breach, not a transient failure.
    #[error("invariant violated: span [{start}, {end}) on file {file_id} outside content bounds (len {file_len})")]
    InvariantViolation {
        file_id: FileId,
        start: usize,
        end: usize,
        file_len: usize,
    },

    /// Winnowing configuration (`k`, `t`) rejected at pass setup.
    #[error("invalid winnow configuration: {0}")]
    WinnowConfig(#[from] simprint_winnow::WinnowError),

    /// A renderer failed to emit its report.
    #[error("render failed: {0}")]
    Render(String),
}
