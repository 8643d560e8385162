//! Rule configuration DTOs and DTO → domain conversion.
//!
//! Parsing is deliberately lenient at the entry level: a malformed rule
//! entry is dropped with a warning and the rest of the document still
//! loads. Only a document that fails to parse at all counts as a failed
//! source, and even that never aborts an evaluation run.

use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

use crate::rule::{Comparator, MetricKind, MetricOptions, Rule, RuleKind};
use crate::types::{ClassifyPolicy, Layer, Scope, Severity};

/// Supported configuration document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl DocumentFormat {
    /// Picks a format from a file extension, defaulting to TOML.
    #[must_use]
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext {
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Top-level shape of a rule configuration document.
#[derive(Debug, Default, Deserialize)]
pub struct RuleFileDto {
    /// Grading thresholds override.
    #[serde(default)]
    pub policy: Option<ClassifyPolicy>,

    /// Rule entries.
    #[serde(default)]
    pub rules: Vec<RuleDto>,

    /// Word-substitution tables for the suggestion lookup.
    #[serde(default)]
    pub substitutions: SubstitutionsDto,
}

impl RuleFileDto {
    /// Parses a document in the given format.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the document is not valid TOML/JSON.
    pub fn parse(content: &str, format: DocumentFormat) -> Result<Self, ParseError> {
        match format {
            DocumentFormat::Toml => toml::from_str(content).map_err(|e| ParseError::Toml {
                message: e.to_string(),
            }),
            DocumentFormat::Json => {
                serde_json::from_str(content).map_err(|e| ParseError::Json {
                    line: e.line(),
                    message: e.to_string(),
                })
            }
        }
    }
}

/// One rule entry as written in configuration.
///
/// Enum-like fields are plain strings here so that one bad entry does not
/// poison the whole document; conversion validates them per entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDto {
    /// Rule identifier.
    pub id: String,

    /// Regex pattern (pattern rules).
    #[serde(default)]
    pub pattern: Option<String>,

    /// Metric name (metric rules).
    #[serde(default)]
    pub metric: Option<String>,

    /// Metric threshold.
    #[serde(default)]
    pub threshold: Option<usize>,

    /// Metric comparator (default: `gt`).
    #[serde(default)]
    pub comparator: Option<String>,

    /// Human-readable message (default: the id).
    #[serde(default)]
    pub message: Option<String>,

    /// Severity (default: `info`).
    #[serde(default)]
    pub severity: Option<String>,

    /// Layer (default: `literal` for pattern rules, `cognitive` for metric rules).
    #[serde(default)]
    pub layer: Option<String>,

    /// Scope (default: `file`).
    #[serde(default)]
    pub scope: Option<String>,

    /// Applicable language tags (default: empty, meaning universal).
    #[serde(default)]
    pub languages: Vec<String>,

    /// Metric tunables.
    #[serde(default)]
    pub options: Option<MetricOptions>,
}

/// Word-substitution tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubstitutionsDto {
    /// Verb substitutions.
    #[serde(default)]
    pub verbs: HashMap<String, Vec<String>>,
    /// Noun substitutions.
    #[serde(default)]
    pub nouns: HashMap<String, Vec<String>>,
}

/// Document-level parse errors.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Invalid TOML.
    #[error("invalid TOML: {message}")]
    Toml {
        /// Parser message.
        message: String,
    },

    /// Invalid JSON.
    #[error("invalid JSON at line {line}: {message}")]
    Json {
        /// Line where parsing failed.
        line: usize,
        /// Parser message.
        message: String,
    },
}

/// Entry-level conversion errors; each drops one rule, never the document.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Neither `pattern` nor `metric` set.
    #[error("rule `{id}`: one of `pattern` or `metric` must be set")]
    MissingDetection {
        /// The offending rule id.
        id: String,
    },

    /// Both `pattern` and `metric` set.
    #[error("rule `{id}`: `pattern` and `metric` are mutually exclusive")]
    AmbiguousDetection {
        /// The offending rule id.
        id: String,
    },

    /// The pattern does not compile.
    #[error("rule `{id}`: invalid pattern: {source}")]
    InvalidPattern {
        /// The offending rule id.
        id: String,
        /// Regex compilation error.
        source: regex::Error,
    },

    /// A metric rule without a threshold.
    #[error("rule `{id}`: metric rules require `threshold`")]
    MissingThreshold {
        /// The offending rule id.
        id: String,
    },

    /// Unknown enum-like field value.
    #[error("rule `{id}`: unknown {field} `{value}`")]
    UnknownField {
        /// The offending rule id.
        id: String,
        /// Field name (severity, layer, scope, metric, comparator).
        field: &'static str,
        /// The invalid value.
        value: String,
    },
}

/// Converts one DTO entry into a domain [`Rule`].
///
/// # Errors
///
/// Returns a [`RuleError`] describing why the entry must be dropped.
pub fn convert_rule(dto: RuleDto) -> Result<Rule, RuleError> {
    let id = dto.id;

    let kind = match (&dto.pattern, &dto.metric) {
        (Some(_), Some(_)) => return Err(RuleError::AmbiguousDetection { id }),
        (None, None) => return Err(RuleError::MissingDetection { id }),
        (Some(pattern), None) => {
            let regex = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
                id: id.clone(),
                source,
            })?;
            RuleKind::Pattern { regex }
        }
        (None, Some(metric)) => {
            let metric = parse_metric(metric, &id)?;
            let threshold = dto
                .threshold
                .ok_or_else(|| RuleError::MissingThreshold { id: id.clone() })?;
            let comparator = match dto.comparator.as_deref() {
                None => Comparator::default(),
                Some(raw) => parse_comparator(raw, &id)?,
            };
            RuleKind::Metric {
                metric,
                threshold,
                comparator,
                options: dto.options.unwrap_or_default(),
            }
        }
    };

    let severity = match dto.severity.as_deref() {
        None => Severity::default(),
        Some(raw) => parse_severity(raw, &id)?,
    };

    let layer = match dto.layer.as_deref() {
        None => match kind {
            RuleKind::Pattern { .. } => Layer::Literal,
            RuleKind::Metric { .. } => Layer::Cognitive,
        },
        Some(raw) => parse_layer(raw, &id)?,
    };

    let scope = match dto.scope.as_deref() {
        None => Scope::default(),
        Some(raw) => parse_scope(raw, &id)?,
    };

    let message = dto.message.unwrap_or_else(|| id.clone());

    Ok(Rule {
        id,
        message,
        severity,
        layer,
        scope,
        languages: dto.languages,
        kind,
    })
}

fn parse_severity(raw: &str, id: &str) -> Result<Severity, RuleError> {
    match raw {
        "info" => Ok(Severity::Info),
        "minor" => Ok(Severity::Minor),
        "major" => Ok(Severity::Major),
        "critical" => Ok(Severity::Critical),
        _ => Err(unknown(id, "severity", raw)),
    }
}

fn parse_layer(raw: &str, id: &str) -> Result<Layer, RuleError> {
    match raw {
        "literal" => Ok(Layer::Literal),
        "lexical" => Ok(Layer::Lexical),
        "conceptual" => Ok(Layer::Conceptual),
        "semantic" => Ok(Layer::Semantic),
        "cognitive" => Ok(Layer::Cognitive),
        "language" => Ok(Layer::Language),
        _ => Err(unknown(id, "layer", raw)),
    }
}

fn parse_scope(raw: &str, id: &str) -> Result<Scope, RuleError> {
    match raw {
        "line" => Ok(Scope::Line),
        "unit" => Ok(Scope::Unit),
        "file" => Ok(Scope::File),
        "framework" => Ok(Scope::Framework),
        _ => Err(unknown(id, "scope", raw)),
    }
}

fn parse_metric(raw: &str, id: &str) -> Result<MetricKind, RuleError> {
    match raw {
        "unit_count" => Ok(MetricKind::UnitCount),
        "branching" => Ok(MetricKind::Branching),
        "duplication" => Ok(MetricKind::Duplication),
        "nesting_depth" => Ok(MetricKind::NestingDepth),
        "line_count" => Ok(MetricKind::LineCount),
        _ => Err(unknown(id, "metric", raw)),
    }
}

fn parse_comparator(raw: &str, id: &str) -> Result<Comparator, RuleError> {
    match raw {
        "gt" => Ok(Comparator::Gt),
        "ge" => Ok(Comparator::Ge),
        "lt" => Ok(Comparator::Lt),
        "le" => Ok(Comparator::Le),
        "eq" => Ok(Comparator::Eq),
        _ => Err(unknown(id, "comparator", raw)),
    }
}

fn unknown(id: &str, field: &'static str, value: &str) -> RuleError {
    RuleError::UnknownField {
        id: id.to_string(),
        field,
        value: value.to_string(),
    }
}
