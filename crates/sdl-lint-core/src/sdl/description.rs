//! Unescaped description text of a definition.

use crate::sdl::ast::Described;
use crate::sdl::source::Source;
use crate::sdl::strings::dedent_block_string_value;
use crate::sdl::token::{TokenKind, TokenStream};

/// Returns the unescaped description of a node.
///
/// The description literal wins when present. Otherwise, when
/// `comment_descriptions` is set, the legacy convention applies: a block of
/// `#` comments on consecutive lines directly above the node, each on a line
/// of its own, is taken as the description and dedented like a block string.
#[must_use]
pub fn get_description<N: Described>(
    node: &N,
    source: &Source,
    tokens: &TokenStream,
    comment_descriptions: bool,
) -> Option<String> {
    if let Some(description) = node.description() {
        return Some(description.value.clone());
    }
    if comment_descriptions {
        let raw = leading_comment_block(node, source, tokens)?;
        return Some(dedent_block_string_value(&format!("\n{raw}")));
    }
    None
}

/// Collects the comment block immediately preceding a node, without the `#`s.
fn leading_comment_block<N: Described>(
    node: &N,
    source: &Source,
    tokens: &TokenStream,
) -> Option<String> {
    let mut comments = Vec::new();
    let mut cursor = tokens.prev(node.loc().start_token);

    while let Some(index) = cursor {
        let Some(token) = tokens.get(index) else {
            break;
        };
        if token.kind != TokenKind::Comment {
            break;
        }
        let next = tokens.next(index).and_then(|i| tokens.get(i));
        let prev = tokens.prev(index).and_then(|i| tokens.get(i));
        let (Some(next), Some(prev)) = (next, prev) else {
            break;
        };
        if token.line + 1 != next.line || token.line == prev.line {
            break;
        }
        comments.push(source.slice(token.start + 1, token.end));
        cursor = tokens.prev(index);
    }

    if comments.is_empty() {
        return None;
    }
    comments.reverse();
    Some(comments.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdl::parse;

    fn first_field_description(body: &str, comment_descriptions: bool) -> Option<String> {
        let parsed = parse(body).expect("should parse");
        let field = &parsed
            .document
            .type_definitions()
            .next()
            .expect("a type")
            .fields[0];
        get_description(field, &parsed.source, &parsed.tokens, comment_descriptions)
    }

    #[test]
    fn test_prefers_description_literal() {
        let body = "type A {\n  # comment\n  \"\"\"Literal.\"\"\"\n  a: Int\n}";
        assert_eq!(
            first_field_description(body, true).as_deref(),
            Some("Literal.")
        );
    }

    #[test]
    fn test_comment_description_requires_option() {
        let body = "type A {\n  # Some field.\n  a: Int\n}";
        assert_eq!(first_field_description(body, false), None);
        assert_eq!(
            first_field_description(body, true).as_deref(),
            Some("Some field.")
        );
    }

    #[test]
    fn test_comment_description_joins_consecutive_lines() {
        let body = "type A {\n  # First line.\n  #   Indented.\n  a: Int\n}";
        assert_eq!(
            first_field_description(body, true).as_deref(),
            Some("First line.\n  Indented.")
        );
    }

    #[test]
    fn test_comment_separated_by_blank_line_is_not_a_description() {
        let body = "type A {\n  # Detached.\n\n  a: Int\n}";
        assert_eq!(first_field_description(body, true), None);
    }

    #[test]
    fn test_trailing_comment_is_not_a_description() {
        let body = "type A { # trailing\n  a: Int\n}";
        assert_eq!(first_field_description(body, true), None);
    }

    #[test]
    fn test_comment_on_first_line_describes_type() {
        let parsed = parse("# A type.\ntype A { a: Int }").expect("should parse");
        let a = parsed.document.type_definitions().next().expect("a type");
        assert_eq!(
            get_description(a, &parsed.source, &parsed.tokens, true).as_deref(),
            Some("A type.")
        );
    }
}
