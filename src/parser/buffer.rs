use crate::domain::ParseResult;

use super::parse_content;

/// Append-only text of one streamed response, with the latest parse memoized.
///
/// The cache is keyed by buffer length, which is sound because the buffer only grows between
/// [`StreamingBuffer::replace`] calls. `result()` always equals `parse_content(text())`.
#[derive(Debug, Clone, Default)]
pub struct StreamingBuffer {
    text: String,
    cached: Option<CachedParse>,
}

#[derive(Debug, Clone)]
struct CachedParse {
    len: usize,
    result: ParseResult,
}

impl StreamingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cached: None,
        }
    }

    /// Append a chunk and return the parse of the whole buffer.
    pub fn push_chunk(&mut self, chunk: &str) -> &ParseResult {
        self.text.push_str(chunk);
        self.result()
    }

    /// Swap in a new full text, for clients that deliver the accumulated text instead of deltas.
    pub fn replace(&mut self, text: impl Into<String>) -> &ParseResult {
        self.text = text.into();
        self.cached = None;
        self.result()
    }

    pub fn result(&mut self) -> &ParseResult {
        let len = self.text.len();
        if self.cached.as_ref().is_some_and(|cached| cached.len != len) {
            self.cached = None;
        }
        &self
            .cached
            .get_or_insert_with(|| CachedParse {
                len,
                result: parse_content(&self.text),
            })
            .result
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
