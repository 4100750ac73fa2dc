//! Integration test: discovery, parsing and rule dispatch via Analyzer.
//!
//! Builds a small schema tree in a temporary directory and runs a rule that
//! flags every object type, to verify file discovery, exclusion, ordering and
//! configuration overrides end-to-end.

use sdl_lint_core::sdl::{walk_document, Ancestors, Document, TypeDefinition, VisitAction, Visitor};
use sdl_lint_core::{Analyzer, AnalyzerError, Config, DocumentContext, Rule, Severity, Violation};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct FlagObjects;

struct FlagVisitor<'a> {
    ctx: &'a DocumentContext<'a>,
    violations: Vec<Violation>,
}

impl<'ast> Visitor<'ast> for FlagVisitor<'_> {
    fn visit_type_definition(
        &mut self,
        node: &'ast TypeDefinition,
        _ancestors: &Ancestors<'ast>,
    ) -> VisitAction {
        self.violations.push(self.ctx.violation(
            "T001",
            "flag-objects",
            Severity::Error,
            node.loc,
            None,
            format!("object {}", node.name.value),
        ));
        VisitAction::Skip
    }
}

impl Rule for FlagObjects {
    fn name(&self) -> &'static str {
        "flag-objects"
    }

    fn code(&self) -> &'static str {
        "T001"
    }

    fn check(&self, ctx: &DocumentContext, document: &Document) -> Vec<Violation> {
        let mut visitor = FlagVisitor {
            ctx,
            violations: Vec::new(),
        };
        walk_document(&mut visitor, document);
        visitor.violations
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture dir");
    }
    fs::write(path, content).expect("write fixture");
}

fn fixture() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    write(tmp.path(), "b.graphql", "type B { b: Int }\ntype C { c: Int }\n");
    write(tmp.path(), "a/a.gql", "type A { a: Int }\n");
    write(tmp.path(), "generated/g.graphql", "type G { g: Int }\n");
    write(tmp.path(), "notes.txt", "type N { n: Int }\n");
    tmp
}

#[test]
fn discovers_schema_files_in_path_order() {
    let tmp = fixture();
    let analyzer = Analyzer::builder()
        .root(tmp.path())
        .exclude("**/generated/**")
        .rule(FlagObjects)
        .build()
        .expect("analyzer should build");

    let result = analyzer.analyze().expect("analysis should succeed");

    assert_eq!(result.files_checked, 2);
    let messages: Vec<&str> = result.violations.iter().map(|v| v.message.as_str()).collect();
    assert_eq!(messages, vec!["object A", "object B", "object C"]);
    assert_eq!(result.violations[2].location.line, 2);
    assert_eq!(
        result.violations[0].location.file,
        Path::new("a").join("a.gql")
    );
}

#[test]
fn single_file_root() {
    let tmp = fixture();
    let analyzer = Analyzer::builder()
        .root(tmp.path().join("b.graphql"))
        .rule(FlagObjects)
        .build()
        .expect("analyzer should build");

    let result = analyzer.analyze().expect("analysis should succeed");
    assert_eq!(result.files_checked, 1);
    let report: Vec<String> = result.violations.iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(report.join("\n"), @r"
    b.graphql:1:1: error [T001] object B
    b.graphql:2:1: error [T001] object C
    ");
}

#[test]
fn config_disables_and_overrides_rules() {
    let tmp = fixture();

    let disabled = Config::parse("[rules.flag-objects]\nenabled = false\n").expect("config");
    let analyzer = Analyzer::builder()
        .root(tmp.path())
        .config(disabled)
        .rule(FlagObjects)
        .build()
        .expect("analyzer should build");
    assert!(analyzer.analyze().expect("analysis").violations.is_empty());

    let downgraded = Config::parse("[rules.flag-objects]\nseverity = \"warning\"\n").expect("config");
    let analyzer = Analyzer::builder()
        .root(tmp.path())
        .config(downgraded)
        .rule(FlagObjects)
        .build()
        .expect("analyzer should build");
    let result = analyzer.analyze().expect("analysis");
    assert!(!result.has_errors());
    assert!(result
        .violations
        .iter()
        .all(|v| v.severity == Severity::Warning));
}

#[test]
fn parse_errors_are_skipped_unless_fatal() {
    let tmp = fixture();
    write(tmp.path(), "broken.graphql", "type Broken {\n");

    let lenient = Analyzer::builder()
        .root(tmp.path())
        .exclude("**/generated/**")
        .rule(FlagObjects)
        .build()
        .expect("analyzer should build");
    let result = lenient.analyze().expect("analysis should succeed");
    assert_eq!(result.files_checked, 2);

    let strict = Analyzer::builder()
        .root(tmp.path())
        .rule(FlagObjects)
        .fail_on_parse_error(true)
        .build()
        .expect("analyzer should build");
    assert!(matches!(
        strict.analyze(),
        Err(AnalyzerError::Parse { .. })
    ));
}
