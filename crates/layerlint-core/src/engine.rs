//! Evaluation engine: runs the layer pipeline and aggregates results.
//!
//! Each layer is a pure function from `(text, rules)` to violations; layers
//! share no mutable state and run in a fixed order, so results are
//! deterministic and idempotent for a fixed rule set.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::language;
use crate::metrics;
use crate::rule::{MetricKind, Rule, RuleKind};
use crate::store::{RuleSet, RuleStore};
use crate::suggest::SuggestKind;
use crate::types::{EvaluationResult, FrameworkResult, Layer, Violation};

/// The rule evaluation pipeline.
///
/// Holds an injected [`RuleStore`]; construct one per rule-set under test
/// instead of relying on global state.
pub struct Engine {
    store: RuleStore,
}

impl Engine {
    /// Creates an engine over the given store.
    #[must_use]
    pub fn new(store: RuleStore) -> Self {
        Self { store }
    }

    /// The underlying rule store.
    #[must_use]
    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    /// Evaluates one file's text against all applicable rules.
    #[must_use]
    pub fn evaluate(&self, text: &str, filename: impl AsRef<Path>) -> EvaluationResult {
        let filename = filename.as_ref();
        let set = self.store.load();
        let violations = evaluate_file(&set, text, filename);
        EvaluationResult::new(filename, violations, set.policy())
            .with_failed_sources(set.failed_sources())
    }

    /// Evaluates a whole file set, including framework-scope rules.
    ///
    /// Files are visited in filename order; framework-scope rules run once
    /// across the set rather than once per file.
    #[must_use]
    pub fn evaluate_framework(&self, files: &BTreeMap<PathBuf, String>) -> FrameworkResult {
        let set = self.store.load();

        let per_file = files
            .iter()
            .map(|(filename, text)| {
                let violations = evaluate_file(&set, text, filename);
                EvaluationResult::new(filename.clone(), violations, set.policy())
            })
            .collect();

        let framework_violations = evaluate_framework_rules(&set, files);

        FrameworkResult::new(per_file, framework_violations, set.policy())
            .with_failed_sources(set.failed_sources())
    }

    /// Looks up word substitutions; auxiliary to the pipeline.
    #[must_use]
    pub fn suggest(&self, term: &str, kind: SuggestKind) -> Vec<String> {
        self.store.load().substitutions().lookup(term, kind)
    }
}

/// Runs the six layers in order over one file.
fn evaluate_file(set: &RuleSet, text: &str, filename: &Path) -> Vec<Violation> {
    let tags = language::tags_for(filename);
    let detected = language::detect(filename).unwrap_or(language::UNIVERSAL);

    let mut violations = Vec::new();
    for layer in Layer::ALL {
        let rules: Vec<&Rule> = set
            .for_layer(layer)
            .filter(|r| !r.is_framework() && r.applies_to(&tags))
            .collect();
        violations.extend(run_layer(layer, text, filename, &rules, detected));
    }
    violations
}

/// Applies one layer's rules to the text.
///
/// All layers share this control flow; they differ only in which rules they
/// were handed and, for metric rules, in matching against derived metrics
/// rather than raw text. The language layer stamps the detected tag on its
/// violations.
fn run_layer(
    layer: Layer,
    text: &str,
    filename: &Path,
    rules: &[&Rule],
    detected: &str,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for rule in rules {
        match &rule.kind {
            RuleKind::Pattern { regex } => {
                if let Some(m) = regex.find(text) {
                    let mut v = Violation::new(
                        &rule.id,
                        layer,
                        rule.scope,
                        rule.severity,
                        filename,
                        &rule.message,
                    )
                    .with_line(line_of(text, m.start()));
                    if layer == Layer::Language {
                        v = v.with_language(detected);
                    }
                    violations.push(v);
                }
            }
            RuleKind::Metric {
                metric,
                threshold,
                comparator,
                options,
            } => {
                if *metric == MetricKind::Duplication {
                    // One violation per distinct repeated line, not per repeat.
                    for dup in metrics::duplicates(text, options) {
                        let v = Violation::new(
                            &rule.id,
                            layer,
                            rule.scope,
                            rule.severity,
                            filename,
                            format!(
                                "{} (line repeated {} times: `{}`)",
                                rule.message, dup.count, dup.content
                            ),
                        )
                        .with_line(dup.first_line);
                        violations.push(v);
                    }
                    continue;
                }

                let value = match metric {
                    MetricKind::UnitCount => metrics::unit_count(text),
                    MetricKind::Branching => metrics::branching(text),
                    MetricKind::NestingDepth => metrics::nesting_depth(text),
                    MetricKind::LineCount => metrics::line_count(text),
                    MetricKind::Duplication => continue,
                };
                if comparator.holds(value, *threshold) {
                    violations.push(Violation::new(
                        &rule.id,
                        layer,
                        rule.scope,
                        rule.severity,
                        filename,
                        format!("{} ({metric} = {value}, threshold {threshold})", rule.message),
                    ));
                }
            }
        }
    }

    violations
}

/// Evaluates framework-scope rules once across the file set.
///
/// Each framework pattern rule extracts one attribute per file (the first
/// capture group, or the whole match) and flags every value claimed by more
/// than one file with a single violation listing all claiming files.
fn evaluate_framework_rules(set: &RuleSet, files: &BTreeMap<PathBuf, String>) -> Vec<Violation> {
    let mut violations = Vec::new();

    for rule in set.framework_rules() {
        let RuleKind::Pattern { regex } = &rule.kind else {
            debug!("framework-scope metric rule {} not supported, skipping", rule.id);
            continue;
        };

        let mut claims: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        for (filename, text) in files {
            let tags = language::tags_for(filename);
            if !rule.applies_to(&tags) {
                continue;
            }
            if let Some(caps) = regex.captures(text) {
                let value = caps
                    .get(1)
                    .or_else(|| caps.get(0))
                    .map(|m| m.as_str().to_string());
                if let Some(value) = value {
                    claims.entry(value).or_default().push(filename.clone());
                }
            }
        }

        for (value, claimants) in claims {
            if claimants.len() > 1 {
                let file = claimants[0].clone();
                violations.push(
                    Violation::new(
                        &rule.id,
                        rule.layer,
                        rule.scope,
                        rule.severity,
                        file,
                        format!(
                            "{} (`{value}` claimed by {} files)",
                            rule.message,
                            claimants.len()
                        ),
                    )
                    .with_related(claimants),
                );
            }
        }
    }

    violations
}

/// 1-indexed line number of a byte offset.
fn line_of(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}
