//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "sdl-lint.toml";

const DEFAULT_CONFIG: &str = r#"# sdl-lint configuration

# Exit with status 1 at this severity or above: "info", "warning" or "error".
fail_on = "error"

# Accept a block of `#` comments directly above a definition as its
# description. Rules may override this below.
comment_descriptions = false

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./schema"

# File extensions treated as schema documents
extensions = ["graphql", "gql"]

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/generated/**",
]

# Respect .gitignore files
respect_gitignore = true

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.types-have-descriptions]
enabled = true
# severity = "warning"  # Override default severity

[rules.fields-have-descriptions]
enabled = true
# comment_descriptions = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: sdl-lint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl_lint_core::{Config, Severity};
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.fail_threshold(), Severity::Error);
        assert!(config.is_rule_enabled("types-have-descriptions"));
        assert!(!config.comment_descriptions_for("fields-have-descriptions"));
        assert_eq!(config.analyzer.extensions, vec!["graphql", "gql"]);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "# mine").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
