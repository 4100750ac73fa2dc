//! # sdl-lint-core
//!
//! Core framework for linting GraphQL schema definition language documents.
//!
//! This crate provides the foundational traits and types for building
//! schema linters. It includes:
//!
//! - [`sdl`] - a lexer and parser that keep every token, comments included,
//!   and a [`Visitor`](sdl::Visitor) with per-node-kind callbacks
//! - [`Rule`] trait for per-document rules
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use sdl_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./schema")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod types;

pub mod sdl;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, COMMENT_DESCRIPTIONS};
pub use context::DocumentContext;
pub use rule::{Rule, RuleBox};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
