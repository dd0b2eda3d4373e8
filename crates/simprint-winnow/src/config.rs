//! Configuration and error types for the winnowing stage.
//!
//! Kept free of any I/O so that winnowing stays a pure function of
//! `(preprocessed stream, config, hasher)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Winnowing configuration: n-gram length `k` and guarantee threshold `t`.
///
/// `w = t - k + 1` is the derived window size: any window of `t`
/// consecutive preprocessed items is guaranteed to contribute at least one
/// emitted fingerprint (the "winnowing guarantee").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnowConfig {
    k: usize,
    t: usize,
}

impl WinnowConfig {
    /// Build a validated config. `k` must be >= 1 and `t` must be >= `k`.
    pub fn new(k: usize, t: usize) -> Result<Self, WinnowError> {
        if k < 1 {
            return Err(WinnowError::InvalidK { k });
        }
        if t < k {
            return Err(WinnowError::InvalidT { t, k });
        }
        Ok(WinnowConfig { k, t })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn t(&self) -> usize {
        self.t
    }

    /// Derived window size `w = t - k + 1`.
    pub fn w(&self) -> usize {
        self.t - self.k + 1
    }
}

/// Errors surfaced while configuring or running the winnower.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WinnowError {
    #[error("invalid winnow config: k must be >= 1 (got {k})")]
    InvalidK { k: usize },

    #[error("invalid winnow config: t must be >= k (t={t}, k={k})")]
    InvalidT { t: usize, k: usize },
}
