//! Rule model: pattern rules and derived-metric rules.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{Layer, Scope, Severity};

/// Derived metric a [`RuleKind::Metric`] rule evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Count of top-level structural declarations (single-responsibility heuristic).
    UnitCount,
    /// Count of branching constructs (complexity heuristic).
    Branching,
    /// Repeated non-trivial lines (duplication heuristic).
    Duplication,
    /// Maximum nesting depth of the text.
    NestingDepth,
    /// Total line count (file-size heuristic).
    LineCount,
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnitCount => write!(f, "unit_count"),
            Self::Branching => write!(f, "branching"),
            Self::Duplication => write!(f, "duplication"),
            Self::NestingDepth => write!(f, "nesting_depth"),
            Self::LineCount => write!(f, "line_count"),
        }
    }
}

/// Comparison applied between a computed metric and the rule threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparator {
    /// Violation when metric > threshold.
    Gt,
    /// Violation when metric >= threshold.
    Ge,
    /// Violation when metric < threshold.
    Lt,
    /// Violation when metric <= threshold.
    Le,
    /// Violation when metric == threshold.
    Eq,
}

impl Default for Comparator {
    fn default() -> Self {
        Self::Gt
    }
}

impl Comparator {
    /// Evaluates `value <cmp> threshold`.
    #[must_use]
    pub fn holds(self, value: usize, threshold: usize) -> bool {
        match self {
            Self::Gt => value > threshold,
            Self::Ge => value >= threshold,
            Self::Lt => value < threshold,
            Self::Le => value <= threshold,
            Self::Eq => value == threshold,
        }
    }
}

/// Tunables for the duplication metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricOptions {
    /// Lines at or below this trimmed length are never flagged as duplicates.
    #[serde(default = "default_min_line_length")]
    pub min_line_length: usize,
    /// A line must recur more than this many times to be flagged.
    #[serde(default = "default_repeat_threshold")]
    pub repeat_threshold: usize,
}

fn default_min_line_length() -> usize {
    30
}

fn default_repeat_threshold() -> usize {
    2
}

impl Default for MetricOptions {
    fn default() -> Self {
        Self {
            min_line_length: default_min_line_length(),
            repeat_threshold: default_repeat_threshold(),
        }
    }
}

/// The detection strategy of a rule.
///
/// A closed variant rather than per-identifier dispatch: adding a metric
/// means adding a [`MetricKind`], not touching a central match on rule ids.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Regex applied against the target text.
    Pattern {
        /// Compiled detection pattern.
        regex: Regex,
    },
    /// Threshold comparison against a derived metric.
    Metric {
        /// Which metric to compute.
        metric: MetricKind,
        /// Threshold the metric is compared against.
        threshold: usize,
        /// Comparison direction.
        comparator: Comparator,
        /// Metric-specific tunables.
        options: MetricOptions,
    },
}

/// An immutable rule, created at configuration-load time.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Unique identifier (e.g. `absolute_language`).
    pub id: String,
    /// Human-readable message or suggestion.
    pub message: String,
    /// Severity of violations this rule emits.
    pub severity: Severity,
    /// Layer this rule is consulted by.
    pub layer: Layer,
    /// Granularity the rule operates at.
    pub scope: Scope,
    /// Applicable language tags; empty means universal.
    pub languages: Vec<String>,
    /// Detection strategy.
    pub kind: RuleKind,
}

impl Rule {
    /// Returns true if this rule applies to any of the given language tags.
    ///
    /// Rules with an empty tag set are universal and apply everywhere.
    #[must_use]
    pub fn applies_to(&self, tags: &[String]) -> bool {
        self.languages.is_empty() || self.languages.iter().any(|l| tags.contains(l))
    }

    /// Returns true for framework-scope (cross-file) rules.
    #[must_use]
    pub fn is_framework(&self) -> bool {
        self.scope == Scope::Framework
    }
}
