//! Rule presets for common configurations.

use crate::{FieldsHaveDescriptions, TypesHaveDescriptions};
use sdl_lint_core::{Config, RuleBox};

/// Preset configurations for sdl-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every rule with its defaults.
    Recommended,
    /// Type descriptions only, for gradual adoption.
    Minimal,
    /// Every rule, honouring `#` comment descriptions.
    Legacy,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Minimal => minimal_rules(),
            Self::Legacy => legacy_rules(),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `types-have-descriptions` (SDL001)
/// - `fields-have-descriptions` (SDL002)
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(TypesHaveDescriptions::new()),
        Box::new(FieldsHaveDescriptions::new()),
    ]
}

/// Returns the minimal set of rules.
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![Box::new(TypesHaveDescriptions::new())]
}

/// Returns every rule with comment descriptions enabled.
#[must_use]
pub fn legacy_rules() -> Vec<RuleBox> {
    vec![
        Box::new(TypesHaveDescriptions::new().comment_descriptions(true)),
        Box::new(FieldsHaveDescriptions::new().comment_descriptions(true)),
    ]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    recommended_rules()
}

/// Builds a rule by name or code, applying its options from `config`.
#[must_use]
pub fn rule_by_name(name: &str, config: &Config) -> Option<RuleBox> {
    let rule: RuleBox = match name {
        crate::types_have_descriptions::NAME | crate::types_have_descriptions::CODE => {
            Box::new(TypesHaveDescriptions::new().comment_descriptions(
                config.comment_descriptions_for(crate::types_have_descriptions::NAME),
            ))
        }
        crate::fields_have_descriptions::NAME | crate::fields_have_descriptions::CODE => {
            Box::new(FieldsHaveDescriptions::new().comment_descriptions(
                config.comment_descriptions_for(crate::fields_have_descriptions::NAME),
            ))
        }
        _ => return None,
    };
    Some(rule)
}

/// Builds every rule with its options from `config`.
///
/// Disabled rules are still returned; the analyzer filters them.
#[must_use]
pub fn rules_from_config(config: &Config) -> Vec<RuleBox> {
    all_rules()
        .iter()
        .filter_map(|rule| rule_by_name(rule.name(), config))
        .collect()
}
