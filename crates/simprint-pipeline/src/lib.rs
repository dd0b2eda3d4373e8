//! Pipeline driver: composes the winnower, index, expander, and slicer
//! into one pass over a corpus, plus the external-interface traits
//! (`Preprocessor`, `FileStore`, `Renderer`) the core consumes and exposes
//! at its boundary.

mod config;
mod driver;
mod error;
mod file_cache;
mod file_store;
mod metrics;
mod preprocessor;
mod record;
mod renderer;
mod report;

pub use config::PassConfig;
pub use driver::{PassOutcome, Pipeline, SourceFile, Submission};
pub use error::PipelineError;
pub use file_cache::{FileCache, FileSnapshot};
pub use file_store::{DiskFileStore, FileStore, MemoryFileStore};
pub use metrics::{NoopMetrics, PipelineMetrics};
pub use preprocessor::{Preprocessor, WhitespacePreprocessor};
pub use record::{FingerprintRecord, PassResult};
pub use renderer::{JsonRenderer, Renderer, TerminalRenderer};
pub use report::{FileReport, FragmentView, MatchReport, SpanGroup, SubmissionReport};
