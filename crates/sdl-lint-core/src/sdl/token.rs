//! Lexical tokens and the index-linked token stream.

/// Kind tag of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Start-of-file marker. Always the first token of a stream.
    Sof,
    /// End-of-file marker. Always the last token of a stream.
    Eof,
    /// A `#` comment running to the end of the line.
    Comment,
    /// Punctuation such as `{`, `:`, `@` or `...`.
    Punctuator,
    /// An identifier.
    Name,
    /// An integer literal.
    Int,
    /// A floating point literal.
    Float,
    /// A `"`-delimited string.
    String,
    /// A `"""`-delimited block string.
    BlockString,
}

impl TokenKind {
    /// Returns true for both single-quote and block strings.
    #[must_use]
    pub fn is_delimited_string(self) -> bool {
        matches!(self, Self::String | Self::BlockString)
    }

    /// Human-readable name used in parse errors.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Sof => "<SOF>",
            Self::Eof => "<EOF>",
            Self::Comment => "Comment",
            Self::Punctuator => "Punctuator",
            Self::Name => "Name",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::String => "String",
            Self::BlockString => "BlockString",
        }
    }
}

/// A lexical unit of a schema document.
///
/// `start` and `end` are byte offsets into the source body (end exclusive).
/// `line` and `column` are 1-indexed and describe the token's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Kind tag.
    pub kind: TokenKind,
    /// Byte offset of the first byte.
    pub start: usize,
    /// Byte offset one past the last byte.
    pub end: usize,
    /// Line of the first byte.
    pub line: usize,
    /// Column of the first byte.
    pub column: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            kind,
            start,
            end,
            line,
            column,
        }
    }
}

/// Index of a token within a [`TokenStream`].
pub type TokenIndex = usize;

/// Immutable sequence of every token in a document, comments included.
///
/// Tokens link to their neighbours by index: the previous token of `i` is
/// `i - 1` and the next is `i + 1`.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Wraps a lexed token vector.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Returns the token at `index`.
    #[must_use]
    pub fn get(&self, index: TokenIndex) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Returns the index of the token before `index`, if any.
    #[must_use]
    pub fn prev(&self, index: TokenIndex) -> Option<TokenIndex> {
        index.checked_sub(1).filter(|i| *i < self.tokens.len())
    }

    /// Returns the index of the token after `index`, if any.
    #[must_use]
    pub fn next(&self, index: TokenIndex) -> Option<TokenIndex> {
        let next = index + 1;
        (next < self.tokens.len()).then_some(next)
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the stream holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over all tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream() -> TokenStream {
        TokenStream::new(vec![
            Token::new(TokenKind::Sof, 0, 0, 1, 1),
            Token::new(TokenKind::Name, 0, 4, 1, 1),
            Token::new(TokenKind::Eof, 4, 4, 1, 5),
        ])
    }

    #[test]
    fn test_links_by_index() {
        let tokens = stream();
        assert_eq!(tokens.prev(0), None);
        assert_eq!(tokens.prev(1), Some(0));
        assert_eq!(tokens.next(1), Some(2));
        assert_eq!(tokens.next(2), None);
    }

    #[test]
    fn test_delimited_string_kinds() {
        assert!(TokenKind::String.is_delimited_string());
        assert!(TokenKind::BlockString.is_delimited_string());
        assert!(!TokenKind::Comment.is_delimited_string());
    }
}
