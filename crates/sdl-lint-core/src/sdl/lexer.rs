//! Tokenizer for GraphQL schema documents.
//!
//! Every token is kept, comments included, because description rules need to
//! look at the raw layout around a definition. The parser skips comments.

use crate::sdl::error::SyntaxError;
use crate::sdl::source::Source;
use crate::sdl::token::{Token, TokenKind, TokenStream};

const BOM: char = '\u{feff}';

/// Splits a source body into a [`TokenStream`].
///
/// The stream starts with a [`TokenKind::Sof`] token and ends with a
/// [`TokenKind::Eof`] token.
///
/// # Errors
///
/// Returns a [`SyntaxError`] on unterminated strings, malformed numbers or
/// characters that cannot start a token.
pub fn tokenize(source: &Source) -> Result<TokenStream, SyntaxError> {
    let mut lexer = Lexer {
        source,
        body: source.body(),
        pos: 0,
        tokens: Vec::new(),
    };
    lexer.run()?;
    Ok(TokenStream::new(lexer.tokens))
}

struct Lexer<'a> {
    source: &'a Source,
    body: &'a str,
    pos: usize,
    tokens: Vec<Token>,
}

impl Lexer<'_> {
    fn run(&mut self) -> Result<(), SyntaxError> {
        // The start-of-file marker sits on line 0, before any real line.
        self.tokens.push(Token::new(TokenKind::Sof, 0, 0, 0, 0));

        loop {
            self.skip_ignored();
            let start = self.pos;
            let Some(c) = self.peek() else {
                self.push(TokenKind::Eof, start, start);
                return Ok(());
            };

            match c {
                '#' => {
                    self.advance_while(|c| c != '\n' && c != '\r');
                    self.push(TokenKind::Comment, start, self.pos);
                }
                '!' | '$' | '&' | '(' | ')' | ':' | '=' | '@' | '[' | ']' | '{' | '|' | '}' => {
                    self.pos += 1;
                    self.push(TokenKind::Punctuator, start, self.pos);
                }
                '.' => {
                    if self.body[start..].starts_with("...") {
                        self.pos += 3;
                        self.push(TokenKind::Punctuator, start, self.pos);
                    } else {
                        return Err(self.error_at(start, "Unexpected \".\", did you mean \"...\"?"));
                    }
                }
                '"' => {
                    if self.body[start..].starts_with("\"\"\"") {
                        self.read_block_string(start)?;
                    } else {
                        self.read_string(start)?;
                    }
                }
                c if is_name_start(c) => {
                    self.advance_while(is_name_continue);
                    self.push(TokenKind::Name, start, self.pos);
                }
                c if c == '-' || c.is_ascii_digit() => self.read_number(start)?,
                other => {
                    return Err(self.error_at(start, format!("Unexpected character {other:?}.")));
                }
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.body[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.body.get(self.pos + offset..)?.chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Whitespace, line terminators, commas and the byte order mark carry no meaning.
    fn skip_ignored(&mut self) {
        self.advance_while(|c| matches!(c, ' ' | '\t' | ',' | '\n' | '\r' | BOM));
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        let (line, column) = self.source.position(start);
        self.tokens.push(Token::new(kind, start, end, line, column));
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> SyntaxError {
        let (line, column) = self.source.position(offset);
        SyntaxError::new(message, line, column)
    }

    fn read_string(&mut self, start: usize) -> Result<(), SyntaxError> {
        self.pos += 1;
        loop {
            match self.bump() {
                None | Some('\n' | '\r') => {
                    return Err(self.error_at(start, "Unterminated string."));
                }
                Some('"') => break,
                Some('\\') => {
                    let escape_at = self.pos;
                    match self.bump() {
                        Some('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't') => {}
                        Some('u') => {
                            for _ in 0..4 {
                                match self.bump() {
                                    Some(c) if c.is_ascii_hexdigit() => {}
                                    _ => {
                                        return Err(self.error_at(
                                            escape_at,
                                            "Invalid Unicode escape sequence.",
                                        ));
                                    }
                                }
                            }
                        }
                        _ => {
                            return Err(
                                self.error_at(escape_at, "Invalid character escape sequence.")
                            );
                        }
                    }
                }
                Some(_) => {}
            }
        }
        self.push(TokenKind::String, start, self.pos);
        Ok(())
    }

    fn read_block_string(&mut self, start: usize) -> Result<(), SyntaxError> {
        self.pos += 3;
        loop {
            let rest = &self.body[self.pos..];
            if rest.starts_with("\"\"\"") {
                self.pos += 3;
                break;
            }
            if rest.starts_with("\\\"\"\"") {
                self.pos += 4;
                continue;
            }
            if self.bump().is_none() {
                return Err(self.error_at(start, "Unterminated string."));
            }
        }
        self.push(TokenKind::BlockString, start, self.pos);
        Ok(())
    }

    fn read_number(&mut self, start: usize) -> Result<(), SyntaxError> {
        let mut kind = TokenKind::Int;

        if self.peek() == Some('-') {
            self.pos += 1;
        }
        match self.peek() {
            Some('0') => {
                self.pos += 1;
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    return Err(self.error_at(self.pos, "Invalid number, unexpected digit after 0."));
                }
            }
            Some(c) if c.is_ascii_digit() => self.advance_while(|c| c.is_ascii_digit()),
            _ => return Err(self.error_at(self.pos, "Invalid number, expected digit.")),
        }

        if self.peek() == Some('.') {
            kind = TokenKind::Float;
            self.pos += 1;
            self.read_digits()?;
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            kind = TokenKind::Float;
            self.pos += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.pos += 1;
            }
            self.read_digits()?;
        }
        if self.peek().is_some_and(|c| c == '.' || is_name_start(c)) {
            return Err(self.error_at(self.pos, "Invalid number, expected digit."));
        }

        self.push(kind, start, self.pos);
        Ok(())
    }

    fn read_digits(&mut self) -> Result<(), SyntaxError> {
        if !self.peek_at(0).is_some_and(|c| c.is_ascii_digit()) {
            return Err(self.error_at(self.pos, "Invalid number, expected digit."));
        }
        self.advance_while(|c| c.is_ascii_digit());
        Ok(())
    }
}

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_name_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(body: &str) -> Vec<TokenKind> {
        let source = Source::new(body);
        tokenize(&source)
            .expect("should tokenize")
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_stream_is_bracketed_by_sof_and_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Sof, TokenKind::Eof]);
    }

    #[test]
    fn test_keeps_comments() {
        assert_eq!(
            kinds("# hello\ntype A"),
            vec![
                TokenKind::Sof,
                TokenKind::Comment,
                TokenKind::Name,
                TokenKind::Name,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_kinds_and_spans() {
        let source = Source::new("\"single\" \"\"\"block\n\\\"\"\" text\"\"\"");
        let tokens = tokenize(&source).expect("should tokenize");
        let strings: Vec<&Token> = tokens
            .iter()
            .filter(|t| t.kind.is_delimited_string())
            .collect();
        assert_eq!(strings.len(), 2);
        assert_eq!(strings[0].kind, TokenKind::String);
        assert_eq!(source.slice(strings[0].start, strings[0].end), "\"single\"");
        assert_eq!(strings[1].kind, TokenKind::BlockString);
        assert_eq!(
            source.slice(strings[1].start, strings[1].end),
            "\"\"\"block\n\\\"\"\" text\"\"\""
        );
    }

    #[test]
    fn test_token_lines() {
        let source = Source::new("type A {\n  a: Int\n}");
        let tokens = tokenize(&source).expect("should tokenize");
        let brace = tokens.get(7).expect("closing brace");
        assert_eq!(source.slice(brace.start, brace.end), "}");
        assert_eq!((brace.line, brace.column), (3, 1));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("1 -2 3.5 4e10 0"),
            vec![
                TokenKind::Sof,
                TokenKind::Int,
                TokenKind::Int,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Int,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_rejects_unterminated_string() {
        let source = Source::new("type A {\n  \"oops\n}");
        let err = tokenize(&source).expect_err("should fail");
        assert_eq!((err.line, err.column), (2, 3));
    }

    #[test]
    fn test_rejects_unterminated_block_string() {
        let source = Source::new("\"\"\"never closed");
        assert!(tokenize(&source).is_err());
    }

    #[test]
    fn test_rejects_unexpected_character() {
        let source = Source::new("type A ?");
        let err = tokenize(&source).expect_err("should fail");
        assert_eq!((err.line, err.column), (1, 8));
    }
}
