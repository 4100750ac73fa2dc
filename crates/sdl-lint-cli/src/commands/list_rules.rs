//! List rules command implementation.

use sdl_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<28} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<28} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nOptions (per rule or top-level in sdl-lint.toml):");
    println!("  comment_descriptions  - accept `#` comments above a definition as its description");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  sdl-lint check --rules fields-have-descriptions");
    println!("  sdl-lint check --rules SDL001");
}
