use simprint_span::{FileId, PassName};
use simprint_winnow::PreprocessedStream;

use crate::error::PipelineError;

/// Consumed external interface. The core treats implementations as opaque,
/// identified only by a pass name.
pub trait Preprocessor: Send + Sync {
    fn pass_name(&self) -> &PassName;

    /// Produce a preprocessed stream for one file's content. `file_id` is
    /// supplied only for diagnostics; offsets in the returned stream must
    /// still index into `content` as given (the core never re-reads the
    /// file to reinterpret offsets).
    fn preprocess(&self, file_id: FileId, content: &[u8]) -> Result<PreprocessedStream, PipelineError>;
}

/// The simplest possible preprocessor: collapses runs of ASCII whitespace
/// to a single space, passes every other byte through unchanged, and keeps
/// original byte offsets so spans the winnower emits still describe real
/// ranges in the untouched file. Source-aware tokenization is an explicit
/// non-goal; richer preprocessors are the caller's concern.
pub struct WhitespacePreprocessor {
    pass_name: PassName,
}

impl WhitespacePreprocessor {
    pub fn new(pass_name: &str) -> Self {
        WhitespacePreprocessor {
            pass_name: PassName::from(pass_name),
        }
    }
}

impl Preprocessor for WhitespacePreprocessor {
    fn pass_name(&self) -> &PassName {
        &self.pass_name
    }

    fn preprocess(&self, _file_id: FileId, content: &[u8]) -> Result<PreprocessedStream, PipelineError> {
        let text = String::from_utf8_lossy(content);
        let mut items = Vec::with_capacity(text.len());
        let mut in_whitespace_run = false;

        for (byte_index, ch) in text.char_indices() {
            if ch.is_whitespace() {
                if in_whitespace_run {
                    continue;
                }
                in_whitespace_run = true;
                items.push((byte_index, ' '));
            } else {
                in_whitespace_run = false;
                items.push((byte_index, ch));
            }
        }

        Ok(PreprocessedStream::ByChar(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs_to_one_space() {
        let pre = WhitespacePreprocessor::new("whitespace-v1");
        let stream = pre.preprocess(FileId(0), b"a   b\t\tc").unwrap();
        let PreprocessedStream::ByChar(items) = stream else {
            panic!("expected ByChar stream");
        };
        let chars: String = items.iter().map(|&(_, c)| c).collect();
        assert_eq!(chars, "a b c");
    }

    #[test]
    fn preserves_original_byte_offsets() {
        let pre = WhitespacePreprocessor::new("whitespace-v1");
        let stream = pre.preprocess(FileId(0), b"ab  cd").unwrap();
        let PreprocessedStream::ByChar(items) = stream else {
            panic!("expected ByChar stream");
        };
        let offsets: Vec<usize> = items.iter().map(|&(i, _)| i).collect();
        assert_eq!(offsets, vec![0, 1, 2, 4]);
    }

    #[test]
    fn empty_content_yields_empty_stream() {
        let pre = WhitespacePreprocessor::new("whitespace-v1");
        let stream = pre.preprocess(FileId(0), b"").unwrap();
        let PreprocessedStream::ByChar(items) = stream else {
            panic!("expected ByChar stream");
        };
        assert!(items.is_empty());
    }
}
