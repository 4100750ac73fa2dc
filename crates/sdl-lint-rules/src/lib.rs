//! # sdl-lint-rules
//!
//! Built-in description rules for sdl-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SDL001 | `types-have-descriptions` | Requires named types (except scalars) to have well-formed descriptions |
//! | SDL002 | `fields-have-descriptions` | Requires fields to have well-formed descriptions |
//!
//! ## Usage
//!
//! ```ignore
//! use sdl_lint_core::Analyzer;
//! use sdl_lint_rules::{FieldsHaveDescriptions, TypesHaveDescriptions};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./schema")
//!     .rule(TypesHaveDescriptions::new())
//!     .rule(FieldsHaveDescriptions::new().comment_descriptions(true))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod description_util;
pub mod fields_have_descriptions;
mod presets;
pub mod types_have_descriptions;

pub use fields_have_descriptions::FieldsHaveDescriptions;
pub use presets::{
    all_rules, legacy_rules, minimal_rules, recommended_rules, rule_by_name, rules_from_config,
    Preset,
};
pub use types_have_descriptions::TypesHaveDescriptions;

/// Re-export core types for convenience.
pub use sdl_lint_core::{Rule, Severity, Violation};
