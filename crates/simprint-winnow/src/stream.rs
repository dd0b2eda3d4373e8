//! Preprocessed input representations consumed by the winnower.
//!
//! The winnower treats preprocessors as opaque: it only ever sees one of
//! the two shapes below, identified by a pass name carried upstream by
//! the caller.

/// A file already run through a preprocessor, in one of the two modes the
/// core understands.
pub enum PreprocessedStream {
    /// `(byte_index, character)` pairs honoring the file's characters after
    /// normalization. Order must be non-decreasing in `byte_index`.
    ByChar(Vec<(usize, char)>),
    /// `(token_text, byte_start, byte_end)` triples whose range already
    /// describes the underlying byte span. Order must be non-decreasing in
    /// `byte_start`.
    BySpan(Vec<(String, usize, usize)>),
}

/// Owned items + the `indices` boundary table the winnowing algorithm
/// reads from: `indices[i]` is the byte index of item `i`, with a
/// trailing sentinel one past the last item's end.
pub(crate) struct ItemTable {
    pub items: Vec<String>,
    pub indices: Vec<usize>,
}

impl PreprocessedStream {
    pub(crate) fn into_item_table(self) -> Option<ItemTable> {
        match self {
            PreprocessedStream::ByChar(chars) => {
                if chars.is_empty() {
                    return None;
                }
                let mut items = Vec::with_capacity(chars.len());
                let mut indices = Vec::with_capacity(chars.len() + 1);
                for (idx, ch) in &chars {
                    items.push(ch.to_string());
                    indices.push(*idx);
                }
                let last = chars.last().unwrap().0;
                indices.push(last + 1);
                Some(ItemTable { items, indices })
            }
            PreprocessedStream::BySpan(spans) => {
                if spans.is_empty() {
                    return None;
                }
                let mut items = Vec::with_capacity(spans.len());
                let mut indices = Vec::with_capacity(spans.len() + 1);
                for (text, start, _end) in &spans {
                    items.push(text.clone());
                    indices.push(*start);
                }
                let last_end = spans.last().unwrap().2;
                indices.push(last_end);
                Some(ItemTable { items, indices })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_char_empty_yields_none() {
        let stream = PreprocessedStream::ByChar(vec![]);
        assert!(stream.into_item_table().is_none());
    }

    #[test]
    fn by_char_sentinel_is_one_past_last() {
        let stream = PreprocessedStream::ByChar(vec![(0, 'a'), (1, 'b'), (2, 'c')]);
        let table = stream.into_item_table().unwrap();
        assert_eq!(table.indices, vec![0, 1, 2, 3]);
        assert_eq!(table.items, vec!["a", "b", "c"]);
    }

    #[test]
    fn by_span_sentinel_is_last_end() {
        let stream = PreprocessedStream::BySpan(vec![
            ("foo".into(), 0, 3),
            ("bar".into(), 4, 7),
        ]);
        let table = stream.into_item_table().unwrap();
        assert_eq!(table.indices, vec![0, 4, 7]);
        assert_eq!(table.items, vec!["foo", "bar"]);
    }

    #[test]
    fn by_span_empty_yields_none() {
        let stream = PreprocessedStream::BySpan(vec![]);
        assert!(stream.into_item_table().is_none());
    }
}
