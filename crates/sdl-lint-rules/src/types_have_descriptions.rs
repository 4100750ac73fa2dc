//! Rule requiring well-formed descriptions on named types.
//!
//! # Rationale
//!
//! A type's description opens its documentation page. A one-line summary
//! followed by optional detail reads well both in full and when truncated.
//!
//! # Detected Patterns
//!
//! - Object, interface, union, enum and input object types without a
//!   description
//! - Descriptions not preceded by a blank line
//! - A first line that wraps instead of standing alone
//! - Descriptions delimited by `"` instead of `"""`
//! - Opening or closing `"""` sharing a line with text
//!
//! Scalars are exempt. Type extensions are skipped entirely, since they
//! cannot carry a description.
//!
//! # Good Patterns
//!
//! ```graphql
//! """
//! A registered account.
//!
//! Accounts are created on first sign-in.
//! """
//! type User {
//!   id: ID!
//! }
//! ```

use crate::description_util::{
    blank_line_before_node, description_has_valid_firstline, full_description,
    leading_quotes_on_their_own_line, resolve_offset, trailing_quotes_on_their_own_line,
    DelimitedDescription, DelimiterStyle, DescriptionIssue,
};
use sdl_lint_core::sdl::{
    get_description, walk_document, Ancestors, Document, TypeDefinition, TypeKind, VisitAction,
    Visitor,
};
use sdl_lint_core::{DocumentContext, Rule, Severity, Suggestion, Violation};
use tracing::trace;

/// Rule code for types-have-descriptions.
pub const CODE: &str = "SDL001";

/// Rule name for types-have-descriptions.
pub const NAME: &str = "types-have-descriptions";

/// Requires every named type except scalars to carry a description.
#[derive(Debug, Clone)]
pub struct TypesHaveDescriptions {
    /// Custom severity.
    pub severity: Severity,
    /// Treat `#` comment blocks directly above a type as its description.
    pub comment_descriptions: bool,
}

impl Default for TypesHaveDescriptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TypesHaveDescriptions {
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

impl Rule for TypesHaveDescriptions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires named types to have well-formed descriptions"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &DocumentContext, document: &Document) -> Vec<Violation> {
        let mut visitor = TypeDescriptionVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };

        walk_document(&mut visitor, document);
        visitor.violations
    }
}

struct TypeDescriptionVisitor<'a> {
    ctx: &'a DocumentContext<'a>,
    rule: &'a TypesHaveDescriptions,
    violations: Vec<Violation>,
}

impl TypeDescriptionVisitor<'_> {
    fn report(
        &mut self,
        node: &TypeDefinition,
        description: &DelimitedDescription<'_>,
        issue: DescriptionIssue,
        offset: Option<isize>,
    ) {
        let offset = resolve_offset(self.ctx, node.loc, description, offset);
        let message = format!(
            "The {} type `{}`s description {}.",
            node.kind.label(),
            node.name.value,
            issue.phrase()
        );

        self.violations.push(
            self.ctx
                .violation(CODE, NAME, self.rule.severity, node.loc, Some(offset), message)
                .with_suggestion(Suggestion::new(issue.help())),
        );
    }

    fn check_type(&mut self, node: &TypeDefinition) {
        let text = get_description(
            node,
            self.ctx.source,
            self.ctx.tokens,
            self.rule.comment_descriptions,
        )
        .filter(|text| !text.is_empty());

        let description = full_description(self.ctx, node.loc);
        let Some(text) = text else {
            self.report(node, &description, DescriptionIssue::Missing, None);
            return;
        };

        if !blank_line_before_node(self.ctx, node.loc) {
            self.report(node, &description, DescriptionIssue::NoBlankLineBefore, None);
        }

        if !description_has_valid_firstline(&text) {
            self.report(node, &description, DescriptionIssue::InvalidFirstline, None);
        }

        for &offset in DelimiterStyle::of(description.text).violation_offsets() {
            self.report(node, &description, DescriptionIssue::NotTripleQuoted, Some(offset));
        }

        if !leading_quotes_on_their_own_line(description.text) {
            self.report(
                node,
                &description,
                DescriptionIssue::LeadingQuotesNotOnOwnLine,
                Some(0),
            );
        }

        if !trailing_quotes_on_their_own_line(description.text) {
            self.report(
                node,
                &description,
                DescriptionIssue::TrailingQuotesNotOnOwnLine,
                Some(-3),
            );
        }
    }
}

impl<'ast> Visitor<'ast> for TypeDescriptionVisitor<'_> {
    fn visit_type_definition(
        &mut self,
        node: &'ast TypeDefinition,
        _ancestors: &Ancestors<'ast>,
    ) -> VisitAction {
        if node.kind == TypeKind::Scalar {
            trace!(name = %node.name.value, "scalar exempt from description");
        } else {
            self.check_type(node);
        }
        VisitAction::Continue
    }

    fn visit_type_extension(
        &mut self,
        _node: &'ast TypeDefinition,
        _ancestors: &Ancestors<'ast>,
    ) -> VisitAction {
        VisitAction::Skip
    }
}
