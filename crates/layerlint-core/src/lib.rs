//! # layerlint-core
//!
//! Core engine for layerlint: a multi-layer rule-checking pipeline over
//! source text.
//!
//! The pipeline has four parts:
//!
//! - [`RuleStore`] loads rule definitions from injected configuration
//!   sources, caches them, and filters them by scope and language tag
//! - six layer evaluators (literal, lexical, conceptual, semantic,
//!   cognitive, language) each apply one strategy and emit [`Violation`]s
//! - the [`Engine`] merges layer output into an [`EvaluationResult`] per
//!   file, or a [`FrameworkResult`] across a file set
//! - the [`report`] module renders results as text or JSON
//!
//! ## Example
//!
//! ```
//! use layerlint_core::{Engine, RuleStore, RuleSource};
//!
//! let store = RuleStore::new(vec![RuleSource::inline_toml(
//!     "rules",
//!     r#"
//! [[rules]]
//! id = "absolute_language"
//! pattern = '\b(always|never)\b'
//! severity = "minor"
//! "#,
//! )]);
//! let engine = Engine::new(store);
//!
//! let result = engine.evaluate("This always works.", "doc.md");
//! assert!(!result.passed());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod language;
mod metrics;
mod rule;
mod store;
mod suggest;
mod types;

/// Result rendering for terminals and machine consumers.
pub mod report;

pub use config::{DocumentFormat, ParseError, RuleDto, RuleError, RuleFileDto, SubstitutionsDto};
pub use engine::Engine;
pub use language::{detect, tags_for, UNIVERSAL};
pub use rule::{Comparator, MetricKind, MetricOptions, Rule, RuleKind};
pub use store::{RuleSet, RuleSource, RuleStore};
pub use suggest::{SubstitutionTable, SuggestKind};
pub use types::{
    ClassifyPolicy, EvaluationResult, FrameworkResult, Grade, Layer, Scope, Severity, Violation,
    ViolationDiagnostic,
};
