//! Shared output formatting for lint results.

use anyhow::Result;
use sdl_lint_core::{LintResult, Severity, Violation, ViolationDiagnostic};
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is the analyzed path; `pretty` reads each file back from it to
/// render source snippets.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result, root),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        println!("  {}: {}", severity_indicator, violation.message);
        if let Some(suggestion) = &violation.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        println!();
    }

    print_summary(result);
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_pretty(result: &LintResult, root: &Path) {
    let base = if root.is_file() {
        root.parent().unwrap_or(root)
    } else {
        root
    };

    for violation in &result.violations {
        match render_pretty(violation, base) {
            Some(rendered) => println!("{rendered}"),
            None => println!("{violation}"),
        }
    }

    print_summary(result);
}

fn render_pretty(violation: &Violation, base: &Path) -> Option<String> {
    let path = base.join(&violation.location.file);
    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(e) => {
            tracing::warn!("Cannot read {} for snippet: {}", path.display(), e);
            return None;
        }
    };
    let report = miette::Report::new(ViolationDiagnostic::new(violation, source));
    Some(format!("{report:?}"))
}
