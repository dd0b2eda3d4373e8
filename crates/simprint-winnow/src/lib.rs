//! Robust winnowing: turns a preprocessed file stream into a fingerprint
//! stream of [`simprint_span::Span`]s.

mod config;
mod stream;
mod winnow;

pub use config::{WinnowConfig, WinnowError};
pub use stream::PreprocessedStream;
pub use winnow::winnow;
