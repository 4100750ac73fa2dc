//! Check command implementation.

use anyhow::{Context, Result};
use sdl_lint_core::{Analyzer, Config, LintResult, RuleBox, COMMENT_DESCRIPTIONS};
use sdl_lint_rules::{rule_by_name, rules_from_config};
use std::path::PathBuf;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Arguments of `sdl-lint check` that shape the analysis.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Schema directory or single file.
    pub path: PathBuf,
    /// Comma-separated rule names or codes.
    pub rules: Option<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Force comment descriptions on for every rule.
    pub comment_descriptions: bool,
}

/// Runs the check command.
///
/// Exits the process with status 1 when a violation reaches the configured
/// `fail_on` severity.
pub fn run(options: &CheckOptions, format: OutputFormat, source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let threshold = config.fail_threshold();

    let result = lint(options, config)?;

    super::output::print(&result, format, &options.path)?;

    if result.has_violations_at(threshold) {
        std::process::exit(1);
    }

    Ok(())
}

/// Builds the analyzer for `options` and runs it.
pub fn lint(options: &CheckOptions, mut config: Config) -> Result<LintResult> {
    if options.comment_descriptions {
        config.comment_descriptions = Some(true);
        for rule in config.rules.values_mut() {
            rule.options.remove(COMMENT_DESCRIPTIONS);
        }
    }

    let rules = match &options.rules {
        Some(filter) => filter_rules(filter, &config),
        None => rules_from_config(&config),
    };

    let mut builder = Analyzer::builder().root(&options.path).config(config);
    for pattern in &options.exclude {
        builder = builder.exclude(pattern.clone());
    }
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        options.path.display(),
        analyzer.rule_count()
    );

    analyzer.analyze().context("Analysis failed")
}

fn filter_rules(filter: &str, config: &Config) -> Vec<RuleBox> {
    filter
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| {
            let rule = rule_by_name(name, config);
            if rule.is_none() {
                tracing::warn!("Unknown rule: {}", name);
            }
            rule
        })
        .collect()
}
