//! Integration test: both description rules run through the analyzer.

use sdl_lint_core::{Analyzer, Config, Violation};
use sdl_lint_rules::{recommended_rules, rules_from_config, Preset};
use std::path::Path;

const SCHEMA: &str = r#""""
A registered account.
"""
type User implements Node {
  id: ID!

  """The display name."""
  name: String
  email: String
}

"Anything with an id."
interface Node {
  """Globally unique identifier."""
  id: ID!
}

extend type User {
  nickname: String @deprecated(reason: "Use name")
}

scalar DateTime
"#;

fn report(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn analyze(rules: Vec<sdl_lint_core::RuleBox>, config: Config, sdl: &str) -> Vec<Violation> {
    let analyzer = rules
        .into_iter()
        .fold(Analyzer::builder().config(config), |builder, rule| {
            builder.rule_box(rule)
        })
        .build()
        .expect("Failed to build analyzer");
    analyzer
        .analyze_source(Path::new("schema.graphql"), sdl)
        .expect("Failed to analyze")
}

#[test]
fn test_recommended_rules_report() {
    let violations = analyze(recommended_rules(), Config::default(), SCHEMA);
    insta::assert_snapshot!(report(&violations), @r"
    schema.graphql:12:1: error [SDL001] The interface type `Node`s description should use triple-quotes.
    schema.graphql:12:22: error [SDL001] The interface type `Node`s description should use triple-quotes.
    schema.graphql:12:1: error [SDL001] The interface type `Node`s description should put the leading triple-quote on its own line.
    schema.graphql:12:20: error [SDL001] The interface type `Node`s description should put the trailing triple-quote on its own line.
    schema.graphql:9:3: error [SDL002] The field `User.email`s description is missing.
    ");
}

#[test]
fn test_config_disables_and_downgrades_rules() {
    let config = Config::parse(
        r#"
[rules.types-have-descriptions]
enabled = false

[rules.fields-have-descriptions]
severity = "warning"
"#,
    )
    .expect("valid config");

    let violations = analyze(rules_from_config(&config), config, SCHEMA);
    insta::assert_snapshot!(report(&violations), @"schema.graphql:9:3: warning [SDL002] The field `User.email`s description is missing.");
}

#[test]
fn test_comment_descriptions_from_config() {
    let sdl = "# Legacy description.\ntype A {\n  # Also legacy.\n  a: Int\n}\n";

    let strict = analyze(recommended_rules(), Config::default(), sdl);
    assert_eq!(strict.len(), 2);
    assert!(strict.iter().all(|v| v.message.ends_with("is missing.")));

    let config = Config::parse("comment_descriptions = true").expect("valid config");
    let lenient = analyze(rules_from_config(&config), config, sdl);
    assert!(lenient.iter().all(|v| !v.message.ends_with("is missing.")));
    assert!(lenient
        .iter()
        .any(|v| v.message == "The field `A.a`s description should use triple-quotes."));

    let legacy = analyze(Preset::Legacy.rules(), Config::default(), sdl);
    assert_eq!(report(&legacy), report(&lenient));
}
