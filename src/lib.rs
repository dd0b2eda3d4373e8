//! Umbrella crate for `simprint`, a winnowing-based textual similarity
//! engine.
//!
//! `simprint` re-exports the hashing, winnowing, indexing, expansion, and
//! slicing layers so applications can drive a full comparison pass through
//! a single dependency. [`config::SimprintConfig`] loads a YAML pass
//! configuration; [`simprint_pipeline::Pipeline::run_pass`] runs it over a
//! corpus and returns ranked, fragment-annotated match reports.
//!
//! ## Quick start
//!
//! ```ignore
//! use simprint::config::SimprintConfig;
//! use simprint_hash::Xxh3WindowHasher;
//! use simprint_pipeline::{DiskFileStore, Pipeline, WhitespacePreprocessor};
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SimprintConfig::from_file("simprint.yaml")?;
//! let pass_config = config.to_pass_config();
//!
//! let store = DiskFileStore::new();
//! let preprocessor = WhitespacePreprocessor::new("default");
//! let pipeline = Pipeline::new(Xxh3WindowHasher::default());
//!
//! let outcome = pipeline.run_pass(&store, &preprocessor, &pass_config, &[], &[], None)?;
//! for pair in &outcome.top_pairs {
//!     println!("{} vs {}: score {}", pair.sid1, pair.sid2, pair.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;

pub use simprint_expand as expand;
pub use simprint_hash as hash;
pub use simprint_index as index;
pub use simprint_pipeline as pipeline;
pub use simprint_slice as slice;
pub use simprint_span as span;
pub use simprint_winnow as winnow;

pub use simprint_pipeline::{
    DiskFileStore, FileStore, MemoryFileStore, PassConfig, Pipeline, Preprocessor, SourceFile,
    Submission, WhitespacePreprocessor,
};
pub use simprint_span::{FileId, PassName, SubmissionId};
