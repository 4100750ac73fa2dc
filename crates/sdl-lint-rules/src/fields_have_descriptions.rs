//! Rule requiring well-formed descriptions on fields.
//!
//! # Rationale
//!
//! Field descriptions end up in generated documentation and in tooling
//! tooltips. Keeping them uniformly laid out makes the schema easy to scan
//! and lets formatters rewrite them safely.
//!
//! # Detected Patterns
//!
//! - Fields without a description
//! - Descriptions not preceded by a blank line (or the opening `{`)
//! - Descriptions delimited by `"` instead of `"""`
//! - Blank lines inside a description
//! - An opening `"""` alone on its line
//! - A closing `"""` alone on its line for one-line descriptions, or
//!   sharing a line with text for multi-line ones
//!
//! Deprecated fields and fields declared by an implemented interface do not
//! need a description of their own.
//!
//! # Good Patterns
//!
//! ```graphql
//! type User {
//!   """The user's display name."""
//!   name: String
//!
//!   """The user's avatar.
//!   Falls back to a generated identicon.
//!   """
//!   avatar: Url
//! }
//! ```

use crate::description_util::{
    blank_line_before_node, blank_line_offsets, description_has_blank_line,
    description_is_one_line, full_description, leading_quotes_on_their_own_line, resolve_offset,
    trailing_quotes_on_their_own_line, DelimitedDescription, DelimiterStyle, DescriptionIssue,
};
use sdl_lint_core::sdl::{
    get_description, walk_document, Ancestors, Document, FieldDefinition, TypeDefinition, Visitor,
};
use sdl_lint_core::{DocumentContext, Rule, Severity, Suggestion, Violation};
use tracing::trace;

/// Rule code for fields-have-descriptions.
pub const CODE: &str = "SDL002";

/// Rule name for fields-have-descriptions.
pub const NAME: &str = "fields-have-descriptions";

/// Requires every field to carry a properly laid out description.
#[derive(Debug, Clone)]
pub struct FieldsHaveDescriptions {
    /// Custom severity.
    pub severity: Severity,
    /// Treat `#` comment blocks directly above a field as its description.
    pub comment_descriptions: bool,
}

impl Default for FieldsHaveDescriptions {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldsHaveDescriptions {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            comment_descriptions: false,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets whether comment blocks count as descriptions.
    #[must_use]
    pub fn comment_descriptions(mut self, enabled: bool) -> Self {
        self.comment_descriptions = enabled;
        self
    }
}

impl Rule for FieldsHaveDescriptions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires fields to have well-formed descriptions"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &DocumentContext, document: &Document) -> Vec<Violation> {
        let mut visitor = FieldDescriptionVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };

        walk_document(&mut visitor, document);
        visitor.violations
    }
}

struct FieldDescriptionVisitor<'a> {
    ctx: &'a DocumentContext<'a>,
    rule: &'a FieldsHaveDescriptions,
    violations: Vec<Violation>,
}

impl FieldDescriptionVisitor<'_> {
    fn report(
        &mut self,
        field: &FieldDefinition,
        parent: &str,
        description: &DelimitedDescription<'_>,
        issue: DescriptionIssue,
        offset: Option<isize>,
    ) {
        let offset = resolve_offset(self.ctx, field.loc, description, offset);
        let message = format!(
            "The field `{parent}.{}`s description {}.",
            field.name.value,
            issue.phrase()
        );

        self.violations.push(
            self.ctx
                .violation(CODE, NAME, self.rule.severity, field.loc, Some(offset), message)
                .with_suggestion(Suggestion::new(issue.help())),
        );
    }

    fn check_field(&mut self, field: &FieldDefinition, parent: &str, text: &str) {
        let description = full_description(self.ctx, field.loc);

        if !blank_line_before_node(self.ctx, field.loc) {
            self.report(field, parent, &description, DescriptionIssue::NoBlankLineBefore, None);
        }

        for &offset in DelimiterStyle::of(description.text).violation_offsets() {
            self.report(
                field,
                parent,
                &description,
                DescriptionIssue::NotTripleQuoted,
                Some(offset),
            );
        }

        if description_has_blank_line(text) {
            let offsets = blank_line_offsets(description.text);
            if offsets.is_empty() {
                self.report(field, parent, &description, DescriptionIssue::BlankLine, None);
            }
            for offset in offsets {
                self.report(
                    field,
                    parent,
                    &description,
                    DescriptionIssue::BlankLine,
                    isize::try_from(offset).ok(),
                );
            }
        }

        if leading_quotes_on_their_own_line(description.text) {
            self.report(
                field,
                parent,
                &description,
                DescriptionIssue::LeadingQuotesOnOwnLine,
                Some(0),
            );
        }

        let one_line = description_is_one_line(text);
        let trailing_on_own_line = trailing_quotes_on_their_own_line(description.text);
        if one_line && trailing_on_own_line {
            self.report(
                field,
                parent,
                &description,
                DescriptionIssue::TrailingQuotesOnOwnLine,
                Some(-3),
            );
        } else if !one_line && !trailing_on_own_line {
            self.report(
                field,
                parent,
                &description,
                DescriptionIssue::TrailingQuotesNotOnOwnLine,
                Some(-3),
            );
        }
    }
}

/// True if an interface implemented by `parent` declares the field.
fn declared_by_interface(
    field: &FieldDefinition,
    parent: &TypeDefinition,
    ancestors: &Ancestors<'_>,
) -> bool {
    parent
        .interfaces
        .iter()
        .filter_map(|name| ancestors.find_interface(&name.value))
        .any(|interface| interface.declares_field(&field.name.value))
}

impl<'ast> Visitor<'ast> for FieldDescriptionVisitor<'_> {
    fn visit_field_definition(
        &mut self,
        node: &'ast FieldDefinition,
        ancestors: &Ancestors<'ast>,
    ) {
        let parent = ancestors.parent_type();
        let parent_name = parent.map_or("", |p| p.name.value.as_str());

        let text = get_description(
            node,
            self.ctx.source,
            self.ctx.tokens,
            self.rule.comment_descriptions,
        )
        .filter(|text| !text.is_empty());

        match text {
            Some(text) => self.check_field(node, parent_name, &text),
            None if node.has_directive("deprecated") => {
                trace!(field = %node.name.value, "deprecated field exempt from description");
            }
            None if parent.is_some_and(|p| declared_by_interface(node, p, ancestors)) => {
                trace!(field = %node.name.value, "field inherits its interface description");
            }
            None => {
                let description = full_description(self.ctx, node.loc);
                self.report(node, parent_name, &description, DescriptionIssue::Missing, None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl_lint_core::sdl::parse;
    use std::path::Path;

    fn check_with(rule: &FieldsHaveDescriptions, sdl: &str) -> Vec<(String, usize, usize)> {
        let parsed = parse(sdl).expect("Failed to parse");
        let ctx = DocumentContext::new(Path::new("test.graphql"), &parsed, Path::new("."));
        rule.check(&ctx, &parsed.document)
            .into_iter()
            .map(|v| (v.message, v.location.line, v.location.column))
            .collect()
    }

    fn check_sdl(sdl: &str) -> Vec<(String, usize, usize)> {
        check_with(&FieldsHaveDescriptions::new(), sdl)
    }

    fn expected(errors: &[(&str, usize, usize)]) -> Vec<(String, usize, usize)> {
        errors
            .iter()
            .map(|(message, line, column)| ((*message).to_string(), *line, *column))
            .collect()
    }

    #[test]
    fn test_detects_missing_descriptions() {
        let violations = check_sdl(
            r#"
      type A {
        withoutDescription: String
        withoutDescriptionAgain: String!

        """Description"""
        withDescription: String
      }
    "#,
        );
        assert_eq!(
            violations,
            expected(&[
                ("The field `A.withoutDescription`s description is missing.", 3, 9),
                ("The field `A.withoutDescriptionAgain`s description is missing.", 4, 9),
            ])
        );
    }

    #[test]
    fn test_requires_blank_line_before_description() {
        let violations = check_sdl(
            r#"
      type A {
        """Description."""
        withDescription: String
        """Another description."""
        noBlankLine: String
        # Comment
        """Having a comment before you is no excuse."""
        badCommentedLine: String

        # Comment
        """But this is ok."""
        commentedLine: String
      }
    "#,
        );
        assert_eq!(
            violations,
            expected(&[
                (
                    "The field `A.noBlankLine`s description should have a blank line before it.",
                    5,
                    9
                ),
                (
                    "The field `A.badCommentedLine`s description should have a blank line before it.",
                    8,
                    9
                ),
            ])
        );
    }

    #[test]
    fn test_single_quotes_flag_both_ends() {
        let violations = check_sdl(
            r#"
      type A {
        "Description has single quotes."
        single: String
      }
    "#,
        );
        assert_eq!(
            violations,
            expected(&[
                ("The field `A.single`s description should use triple-quotes.", 3, 9),
                ("The field `A.single`s description should use triple-quotes.", 3, 40),
            ])
        );
    }

    #[test]
    fn test_reports_each_blank_line() {
        let sdl = concat!(
            "\n",
            "      type A {\n",
            "        \"\"\"Description.\n",
            "\n",
            "        Description has a blank line.\n",
            "        \n",
            "        And then it has another one!\n",
            "        For shame.\n",
            "        \"\"\"\n",
            "        withDescription: String\n",
            "      }\n",
            "    ",
        );
        let message =
            "The field `A.withDescription`s description should not include a blank line.";
        assert_eq!(check_sdl(sdl), expected(&[(message, 4, 1), (message, 6, 1)]));
    }

    #[test]
    fn test_reports_consecutive_blank_lines_separately() {
        let sdl = "type A {\n  \"\"\"One.\n\n\n  Two.\n  \"\"\"\n  a: Int\n}\n";
        let message = "The field `A.a`s description should not include a blank line.";
        assert_eq!(check_sdl(sdl), expected(&[(message, 3, 1), (message, 4, 1)]));
    }

    #[test]
    fn test_leading_quotes_must_share_line_with_text() {
        let violations = check_sdl(
            r#"
      type A {
        """
        Leading triple-quote should be on the same line."""
        singleLine: String

        """
        Leading triple-quote should be on the same line.
        """
        singleLine2: String

        """
        Leading triple-quote should be on the same line.
        Don't you agree?
        """
        multiLine: String
      }
    "#,
        );
        assert_eq!(
            violations,
            expected(&[
                (
                    "The field `A.singleLine`s description should not put the leading triple-quote on its own line.",
                    3,
                    9
                ),
                (
                    "The field `A.singleLine2`s description should not put the leading triple-quote on its own line.",
                    7,
                    9
                ),
                (
                    "The field `A.singleLine2`s description should not put the trailing triple-quote on its own line.",
                    9,
                    9
                ),
                (
                    "The field `A.multiLine`s description should not put the leading triple-quote on its own line.",
                    12,
                    9
                ),
            ])
        );
    }

    #[test]
    fn test_trailing_quotes_follow_line_count() {
        let violations = check_sdl(
            r#"
      type A {
        """Trailing quotes should be on the same line.
        """
        singleLine: String

        """Trailing quotes should be on their own line.
        Don't you agree?"""
        multiLine: String
      }
    "#,
        );
        assert_eq!(
            violations,
            expected(&[
                (
                    "The field `A.singleLine`s description should not put the trailing triple-quote on its own line.",
                    4,
                    9
                ),
                (
                    "The field `A.multiLine`s description should put the trailing triple-quote on its own line.",
                    8,
                    25
                ),
            ])
        );
    }

    #[test]
    fn test_allows_deprecated_fields_without_description() {
        let rule = FieldsHaveDescriptions::new().comment_descriptions(true);
        let violations = check_with(
            &rule,
            r#"
      type A {
        field: String @deprecated(reason: "To test deprecation")
      }
    "#,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_interface_fields_are_exempt() {
        let violations = check_sdl(
            r#"
      interface I {
        """This field is documented."""
        interfaceField: String
      }

      interface I2 {
        """This field is documented."""
        otherInterfaceField: String
      }

      interface I3 {
        """This field is documented."""
        unimplementedField: String
      }

      type A implements I & I2 {
        interfaceField: String
        otherInterfaceField: String

        otherField: String
        unimplementedField: String
      }
    "#,
        );
        assert_eq!(
            violations,
            expected(&[
                ("The field `A.otherField`s description is missing.", 21, 9),
                ("The field `A.unimplementedField`s description is missing.", 22, 9),
            ])
        );
    }

    #[test]
    fn test_interface_declared_later_in_document() {
        let violations = check_sdl(
            r#"
type A implements Node {
  id: ID!
}

interface Node {
  """Globally unique identifier."""
  id: ID!
}
"#,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_well_formed_descriptions_pass() {
        let rule = FieldsHaveDescriptions::new().comment_descriptions(true);
        let violations = check_with(
            &rule,
            r#"
      type A {
        """Description"""
        withDescription: String

        """A single-line description."""
        singleLine: String

        """A multi-line description.
        This is line two.
        """
        multiLine: String
      }
    "#,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_comment_description_needs_triple_quotes() {
        let sdl = "type A {\n  # Comment description.\n  field: String\n}\n";

        let with_comments = FieldsHaveDescriptions::new().comment_descriptions(true);
        assert_eq!(
            check_with(&with_comments, sdl),
            expected(&[("The field `A.field`s description should use triple-quotes.", 3, 3)])
        );

        assert_eq!(
            check_sdl(sdl),
            expected(&[("The field `A.field`s description is missing.", 3, 3)])
        );
    }

    #[test]
    fn test_empty_description_counts_as_missing() {
        let violations = check_sdl("type A {\n  \"\"\"\"\"\"\n  a: Int\n}\n");
        assert_eq!(
            violations,
            expected(&[("The field `A.a`s description is missing.", 2, 3)])
        );
    }

    #[test]
    fn test_checks_extension_fields() {
        let violations = check_sdl("extend type Query {\n  extra: String\n}\n");
        assert_eq!(violations.len(), 1);
        assert!(violations[0].0.contains("`Query.extra`"));
    }

    #[test]
    fn test_custom_severity_and_suggestion() {
        let parsed = parse("type A {\n  a: Int\n}").expect("Failed to parse");
        let ctx = DocumentContext::new(Path::new("test.graphql"), &parsed, Path::new("."));
        let rule = FieldsHaveDescriptions::new().severity(Severity::Warning);

        let violations = rule.check(&ctx, &parsed.document);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, CODE);
        assert_eq!(violations[0].rule, NAME);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert!(violations[0].suggestion.is_some());
    }
}
