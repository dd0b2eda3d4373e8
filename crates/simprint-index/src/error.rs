use thiserror::Error;

/// Errors from index construction, merge/subtract, or comparison.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("cannot combine indices with different n-gram lengths: {expected_k} vs {actual_k}")]
    ConfigMismatch { expected_k: usize, actual_k: usize },
}
