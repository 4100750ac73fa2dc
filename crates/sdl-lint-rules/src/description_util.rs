//! Shared helpers for the description rules.
//!
//! The parser hands rules an unescaped description value, which loses the
//! delimiter style and the whitespace around the text. Layout checks therefore
//! work on the description exactly as written in the source, recovered from
//! the token stream.

use regex::Regex;
use sdl_lint_core::sdl::{NodeLoc, TokenKind};
use sdl_lint_core::DocumentContext;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("Invalid blank line regex"));

#[allow(clippy::expect_used)]
static TRAILING_QUOTES_ON_OWN_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\n\s*"""$"#).expect("Invalid trailing quotes regex"));

#[allow(clippy::expect_used)]
static VALID_FIRSTLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\n]+(\n\n|$)").expect("Invalid firstline regex"));

/// A description exactly as written, delimiters included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedDescription<'a> {
    /// Source text of the literal, or empty when the node has none.
    pub text: &'a str,
    /// Byte offset of the literal in the document body.
    pub start: usize,
}

impl DelimitedDescription<'_> {
    /// Byte offset one past the closing delimiter.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// True when no delimited literal was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Recovers the raw text of the first delimited string inside a node.
///
/// Scans from the node's start token up to, but not including, its end token.
/// The scan stops at the first name: strings after it are directive arguments
/// or default values. Returns an empty description anchored at the node start
/// if none is found, which is the case for comment-based descriptions.
#[must_use]
pub fn full_description<'a>(ctx: &DocumentContext<'a>, loc: NodeLoc) -> DelimitedDescription<'a> {
    let mut cursor = Some(loc.start_token);
    while let Some(index) = cursor {
        if index == loc.end_token {
            break;
        }
        let Some(token) = ctx.tokens.get(index) else {
            break;
        };
        if token.kind == TokenKind::Name {
            break;
        }
        if token.kind.is_delimited_string() {
            return DelimitedDescription {
                text: ctx.source.slice(token.start, token.end),
                start: token.start,
            };
        }
        cursor = ctx.tokens.next(index);
    }

    DelimitedDescription {
        text: "",
        start: ctx.node_start(loc),
    }
}

/// True if the node has a blank line before it, or follows a `{`.
///
/// Comments are skipped: they never count as content before the node, but a
/// comment block touching the node needs a blank line above the block itself.
#[must_use]
pub fn blank_line_before_node(ctx: &DocumentContext<'_>, loc: NodeLoc) -> bool {
    let mut cursor = ctx.tokens.prev(loc.start_token);
    while let Some(index) = cursor {
        match ctx.tokens.get(index) {
            Some(token) if token.kind == TokenKind::Comment => cursor = ctx.tokens.prev(index),
            _ => break,
        }
    }

    let Some(prev_index) = cursor else {
        return true;
    };
    let (Some(prev), Some(next)) = (
        ctx.tokens.get(prev_index),
        ctx.tokens.next(prev_index).and_then(|i| ctx.tokens.get(i)),
    ) else {
        return true;
    };

    prev.kind == TokenKind::Sof
        || prev.line + 1 < next.line
        || (prev.kind == TokenKind::Punctuator && ctx.source.slice(prev.start, prev.end) == "{")
}

/// True if the unescaped description has no line break.
#[must_use]
pub fn description_is_one_line(description: &str) -> bool {
    !description.contains('\n')
}

/// True if the unescaped description contains a blank line.
#[must_use]
pub fn description_has_blank_line(description: &str) -> bool {
    BLANK_LINE.is_match(description)
}

/// Byte offsets, relative to the literal, where each blank line begins.
///
/// Every whitespace-only line between the opening and closing lines counts on
/// its own, so consecutive blank lines give one offset each.
#[must_use]
pub fn blank_line_offsets(delimited: &str) -> Vec<usize> {
    let lines: Vec<&str> = delimited.split('\n').collect();
    let last = lines.len().saturating_sub(1);
    let mut offsets = Vec::new();
    let mut line_start = 0;
    for (index, line) in lines.iter().enumerate() {
        if index > 0 && index < last && line.trim().is_empty() {
            offsets.push(line_start);
        }
        line_start += line.len() + 1;
    }
    offsets
}

/// True if the first line is a non-empty summary, alone or followed by a blank line.
#[must_use]
pub fn description_has_valid_firstline(description: &str) -> bool {
    VALID_FIRSTLINE.is_match(description)
}

/// True if the literal opens with `"""`.
#[must_use]
pub fn leading_quotes_are_triple_quote(delimited: &str) -> bool {
    delimited.starts_with("\"\"\"")
}

/// True if the opening `"""` is immediately followed by a newline.
#[must_use]
pub fn leading_quotes_on_their_own_line(delimited: &str) -> bool {
    delimited.starts_with("\"\"\"\n")
}

/// True if the closing `"""` sits on a line of its own.
#[must_use]
pub fn trailing_quotes_on_their_own_line(delimited: &str) -> bool {
    TRAILING_QUOTES_ON_OWN_LINE.is_match(delimited)
}

/// Delimiter style of a description literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterStyle {
    /// `"""`
    TripleQuote,
    /// `"`
    SingleQuote,
    /// No literal: the description came from `#` comments.
    Comment,
}

impl DelimiterStyle {
    /// Classifies a literal returned by [`full_description`].
    #[must_use]
    pub fn of(delimited: &str) -> Self {
        if leading_quotes_are_triple_quote(delimited) {
            Self::TripleQuote
        } else if delimited.starts_with('"') {
            Self::SingleQuote
        } else {
            Self::Comment
        }
    }

    /// Offsets to report when the style is not triple quotes.
    ///
    /// A single-quoted literal is flagged at both ends so a fixer rewrites
    /// the opening and closing quote together.
    #[must_use]
    pub fn violation_offsets(self) -> &'static [isize] {
        match self {
            Self::TripleQuote => &[],
            Self::SingleQuote => &[0, -1],
            Self::Comment => &[0],
        }
    }
}

/// Maps an offset within a description to an absolute byte offset.
///
/// Without an offset the node's own start is used. A non-negative offset
/// counts from the node start; a negative one counts back from the end of the
/// literal, so `-1` is its last character and `-3` the start of a closing `"""`.
#[must_use]
pub fn resolve_offset(
    ctx: &DocumentContext<'_>,
    loc: NodeLoc,
    description: &DelimitedDescription<'_>,
    offset: Option<isize>,
) -> usize {
    let node_start = ctx.node_start(loc);
    match offset {
        None => node_start,
        Some(offset) if offset >= 0 => node_start + offset.unsigned_abs(),
        Some(_) if description.is_empty() => node_start,
        Some(offset) => description
            .end()
            .saturating_sub(offset.unsigned_abs())
            .max(description.start),
    }
}

/// A way a description can break the conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionIssue {
    /// No description at all.
    Missing,
    /// Content directly above the description.
    NoBlankLineBefore,
    /// The first line is not a one-line summary.
    InvalidFirstline,
    /// Not delimited by `"""`.
    NotTripleQuoted,
    /// A blank line inside the description.
    BlankLine,
    /// Opening `"""` alone on its line where it should not be.
    LeadingQuotesOnOwnLine,
    /// Opening `"""` sharing a line with text where it should be alone.
    LeadingQuotesNotOnOwnLine,
    /// Closing `"""` alone on its line where it should not be.
    TrailingQuotesOnOwnLine,
    /// Closing `"""` sharing a line with text where it should be alone.
    TrailingQuotesNotOnOwnLine,
}

impl DescriptionIssue {
    /// Completes "…`s description ___."
    #[must_use]
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Missing => "is missing",
            Self::NoBlankLineBefore => "should have a blank line before it",
            Self::InvalidFirstline => {
                "should have a one-line firstline, then optionally a blank line followed by other text"
            }
            Self::NotTripleQuoted => "should use triple-quotes",
            Self::BlankLine => "should not include a blank line",
            Self::LeadingQuotesOnOwnLine => {
                "should not put the leading triple-quote on its own line"
            }
            Self::LeadingQuotesNotOnOwnLine => "should put the leading triple-quote on its own line",
            Self::TrailingQuotesOnOwnLine => {
                "should not put the trailing triple-quote on its own line"
            }
            Self::TrailingQuotesNotOnOwnLine => {
                "should put the trailing triple-quote on its own line"
            }
        }
    }

    /// Short fix hint shown as help text.
    #[must_use]
    pub fn help(self) -> &'static str {
        match self {
            Self::Missing => "Add a \"\"\"-delimited description above the definition",
            Self::NoBlankLineBefore => "Insert an empty line above the description",
            Self::InvalidFirstline => "Start with a one-line summary followed by an empty line",
            Self::NotTripleQuoted => "Replace the delimiters with \"\"\"",
            Self::BlankLine => "Remove the empty line",
            Self::LeadingQuotesOnOwnLine => "Move the text up next to the opening \"\"\"",
            Self::LeadingQuotesNotOnOwnLine => "Break the line after the opening \"\"\"",
            Self::TrailingQuotesOnOwnLine => "Move the closing \"\"\" up next to the text",
            Self::TrailingQuotesNotOnOwnLine => "Break the line before the closing \"\"\"",
        }
    }
}
