//! Source text with byte-offset to line/column mapping.

/// The original body of a schema document.
///
/// Immutable once constructed. Line starts are computed up front so that
/// [`Source::position`] is a binary search rather than a rescan.
#[derive(Debug, Clone)]
pub struct Source {
    body: String,
    line_starts: Vec<usize>,
}

impl Source {
    /// Creates a new source from a document body.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        let body = body.into();
        let line_starts = compute_line_starts(&body);
        Self { body, line_starts }
    }

    /// Returns the full document body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the text between two byte offsets.
    ///
    /// Offsets are clamped to the body length.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.body.len());
        let start = start.min(end);
        self.body.get(start..end).unwrap_or("")
    }

    /// Maps a byte offset to a 1-indexed `(line, column)` pair.
    ///
    /// Columns count bytes from the start of the line.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.body.len());
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line_index).copied().unwrap_or(0);
        (line_index + 1, offset - line_start + 1)
    }
}

/// Line terminators are `\n`, `\r\n` and a lone `\r`.
fn compute_line_starts(body: &str) -> Vec<usize> {
    let bytes = body.as_bytes();
    let mut starts = vec![0];
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => starts.push(i + 1),
            b'\r' => {
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                starts.push(i + 1);
            }
            _ => {}
        }
        i += 1;
    }
    starts
}
