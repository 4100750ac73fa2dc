//! Rule trait for defining lint rules.

use crate::context::DocumentContext;
use crate::sdl::Document;
use crate::types::{Severity, Violation};

/// A per-document lint rule over a parsed schema.
///
/// Implement this trait to create rules that analyze schema documents.
/// Rules receive the syntax tree and typically drive a
/// [`Visitor`](crate::sdl::Visitor) over it.
///
/// # Example
///
/// ```ignore
/// use sdl_lint_core::{DocumentContext, Rule, Violation};
/// use sdl_lint_core::sdl::{walk_document, Document};
///
/// pub struct NoEmptyTypes;
///
/// impl Rule for NoEmptyTypes {
///     fn name(&self) -> &'static str { "no-empty-types" }
///     fn code(&self) -> &'static str { "SDL100" }
///
///     fn check(&self, ctx: &DocumentContext, document: &Document) -> Vec<Violation> {
///         let mut visitor = EmptyTypeVisitor::new(ctx);
///         walk_document(&mut visitor, document);
///         visitor.violations
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "types-have-descriptions").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "SDL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single document and returns any violations found.
    ///
    /// Violations are returned in the order they were discovered.
    fn check(&self, ctx: &DocumentContext, document: &Document) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdl::parse;
    use std::path::Path;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, ctx: &DocumentContext, document: &Document) -> Vec<Violation> {
            document
                .type_definitions()
                .map(|t| {
                    ctx.violation(
                        self.code(),
                        self.name(),
                        self.default_severity(),
                        t.loc,
                        None,
                        format!("Saw {}", t.name.value),
                    )
                })
                .collect()
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Error);

        let parsed = parse("scalar A\nscalar B").expect("should parse");
        let ctx = DocumentContext::new(Path::new("a.graphql"), &parsed, Path::new("."));
        let violations = rule.check(&ctx, &parsed.document);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[1].location.line, 2);
    }
}
