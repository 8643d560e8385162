//! Core types for rule violations and evaluation results.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level attached to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational finding, lowest priority.
    Info,
    /// Minor issue worth cleaning up.
    Minor,
    /// Major issue that should be addressed.
    Major,
    /// Critical issue that must be fixed.
    Critical,
}

impl Default for Severity {
    fn default() -> Self {
        Self::Info
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Minor => write!(f, "minor"),
            Self::Major => write!(f, "major"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Evaluation layer a rule belongs to.
///
/// Layers run in declaration order and never communicate; they differ only
/// in which rules they consult and what those rules match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Raw text patterns (exact phrasing).
    Literal,
    /// Word-level patterns (vocabulary).
    Lexical,
    /// Concept-level patterns (named ideas, responsibilities).
    Conceptual,
    /// Meaning-level patterns (claims, contradictions).
    Semantic,
    /// Derived-metric thresholds (size, branching, duplication).
    Cognitive,
    /// Language-tagged patterns resolved per detected source language.
    Language,
}

impl Layer {
    /// All layers in evaluation order.
    pub const ALL: [Self; 6] = [
        Self::Literal,
        Self::Lexical,
        Self::Conceptual,
        Self::Semantic,
        Self::Cognitive,
        Self::Language,
    ];
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal => write!(f, "literal"),
            Self::Lexical => write!(f, "lexical"),
            Self::Conceptual => write!(f, "conceptual"),
            Self::Semantic => write!(f, "semantic"),
            Self::Cognitive => write!(f, "cognitive"),
            Self::Language => write!(f, "language"),
        }
    }
}

/// Granularity a rule operates at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// A single source line.
    Line,
    /// A method or function-sized unit.
    Unit,
    /// A whole file.
    File,
    /// Cross-file: compares attributes across a file set.
    Framework,
}

impl Default for Scope {
    fn default() -> Self {
        Self::File
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Line => write!(f, "line"),
            Self::Unit => write!(f, "unit"),
            Self::File => write!(f, "file"),
            Self::Framework => write!(f, "framework"),
        }
    }
}

/// Qualitative classification of one result, derived from violation count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    /// Zero violations; passing.
    Low,
    /// A handful of violations.
    Medium,
    /// Enough violations to recommend revision.
    High,
    /// Requires significant revision.
    Critical,
}

impl Grade {
    /// Returns the qualitative recommendation for this grade.
    #[must_use]
    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Critical => "requires significant revision",
            Self::High => "revision recommended",
            Self::Medium => "acceptable with acknowledgment",
            Self::Low => "passes review",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Violation-count thresholds for grading a result.
///
/// These are tunables with no documented rationale in the original tool;
/// they are kept as defaults and overridable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyPolicy {
    /// Minimum count graded `Medium`.
    #[serde(default = "default_medium_at")]
    pub medium_at: usize,
    /// Minimum count graded `High`.
    #[serde(default = "default_high_at")]
    pub high_at: usize,
    /// Minimum count graded `Critical`.
    #[serde(default = "default_critical_at")]
    pub critical_at: usize,
}

fn default_medium_at() -> usize {
    1
}

fn default_high_at() -> usize {
    3
}

fn default_critical_at() -> usize {
    5
}

impl Default for ClassifyPolicy {
    fn default() -> Self {
        Self {
            medium_at: default_medium_at(),
            high_at: default_high_at(),
            critical_at: default_critical_at(),
        }
    }
}

impl ClassifyPolicy {
    /// Grades a violation count.
    #[must_use]
    pub fn grade(&self, count: usize) -> Grade {
        if count >= self.critical_at {
            Grade::Critical
        } else if count >= self.high_at {
            Grade::High
        } else if count >= self.medium_at {
            Grade::Medium
        } else {
            Grade::Low
        }
    }
}

/// A single reported instance of a rule's condition being satisfied.
///
/// Violations are value objects: created fresh on each evaluation run and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Identifier of the originating rule.
    pub rule_id: String,
    /// Layer that emitted this violation.
    pub layer: Layer,
    /// Scope of the originating rule.
    pub scope: Scope,
    /// Severity declared by the originating rule.
    pub severity: Severity,
    /// Target file the rule matched against.
    pub file: PathBuf,
    /// First matching line (1-indexed), when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Human-readable message from the rule.
    pub message: String,
    /// Detected language tag, attached by the language layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Other files involved, for framework-scope violations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<PathBuf>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        layer: Layer,
        scope: Scope,
        severity: Severity,
        file: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            layer,
            scope,
            severity,
            file: file.into(),
            line: None,
            message: message.into(),
            language: None,
            related: Vec::new(),
        }
    }

    /// Sets the first matching line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attaches a detected language tag.
    #[must_use]
    pub fn with_language(mut self, tag: impl Into<String>) -> Self {
        self.language = Some(tag.into());
        self
    }

    /// Attaches related files (framework-scope).
    #[must_use]
    pub fn with_related(mut self, related: Vec<PathBuf>) -> Self {
        self.related = related;
        self
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        write!(
            f,
            ": {} [{}/{}] {}",
            self.severity, self.layer, self.rule_id, self.message
        )?;
        if let Some(tag) = &self.language {
            write!(f, " ({tag})")?;
        }
        Ok(())
    }
}

/// Converts a Violation to a miette Diagnostic for rich error display.
#[allow(dead_code)] // Public API for miette integration
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            message: format!("[{}] {}", v.rule_id, v.message),
            help: Some(format!("{} layer, {} scope", v.layer, v.scope)),
        }
    }
}

/// Result of evaluating one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// The evaluated file.
    pub file: PathBuf,
    /// All violations, in layer order.
    pub violations: Vec<Violation>,
    /// Grade derived from the violation count.
    pub grade: Grade,
    /// Number of configuration sources that failed to load.
    pub failed_sources: usize,
}

impl EvaluationResult {
    /// Builds a result, grading the violation count with `policy`.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, violations: Vec<Violation>, policy: &ClassifyPolicy) -> Self {
        let grade = policy.grade(violations.len());
        Self {
            file: file.into(),
            violations,
            grade,
            failed_sources: 0,
        }
    }

    /// Records how many configuration sources failed to load.
    #[must_use]
    pub fn with_failed_sources(mut self, failed: usize) -> Self {
        self.failed_sources = failed;
        self
    }

    /// Total violation count.
    #[must_use]
    pub fn total(&self) -> usize {
        self.violations.len()
    }

    /// Returns true when the file has zero violations.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Qualitative recommendation for this result.
    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        self.grade.recommendation()
    }

    /// Counts violations at a given severity.
    #[must_use]
    pub fn count_at(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    /// Checks if any violation meets or exceeds the given severity.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }
}

/// Result of evaluating a whole file set, including cross-file rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkResult {
    /// Per-file results, ordered by filename.
    pub files: Vec<EvaluationResult>,
    /// Violations from framework-scope rules, evaluated once per set.
    pub framework_violations: Vec<Violation>,
    /// Grade derived from the total violation count.
    pub grade: Grade,
    /// Number of configuration sources that failed to load.
    pub failed_sources: usize,
}

impl FrameworkResult {
    /// Builds a framework result, grading the combined count with `policy`.
    #[must_use]
    pub fn new(
        files: Vec<EvaluationResult>,
        framework_violations: Vec<Violation>,
        policy: &ClassifyPolicy,
    ) -> Self {
        let total = files.iter().map(EvaluationResult::total).sum::<usize>()
            + framework_violations.len();
        let grade = policy.grade(total);
        Self {
            files,
            framework_violations,
            grade,
            failed_sources: 0,
        }
    }

    /// Records how many configuration sources failed to load.
    #[must_use]
    pub fn with_failed_sources(mut self, failed: usize) -> Self {
        self.failed_sources = failed;
        self
    }

    /// Sum of all per-file counts plus the framework-scope count.
    #[must_use]
    pub fn total(&self) -> usize {
        self.files.iter().map(EvaluationResult::total).sum::<usize>()
            + self.framework_violations.len()
    }

    /// Returns true when no file and no framework-scope rule reported anything.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.framework_violations.is_empty() && self.files.iter().all(EvaluationResult::passed)
    }

    /// Qualitative recommendation for this result.
    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        self.grade.recommendation()
    }

    /// Checks if any violation, per-file or cross-file, meets or exceeds
    /// the given severity.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.framework_violations
            .iter()
            .any(|v| v.severity >= severity)
            || self.files.iter().any(|f| f.has_violations_at(severity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "absolute_language",
            Layer::Lexical,
            Scope::Line,
            severity,
            "doc.md",
            "Avoid absolutes",
        )
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Minor);
        assert!(Severity::Major < Severity::Critical);
    }

    #[test]
    fn default_policy_boundaries() {
        let policy = ClassifyPolicy::default();
        assert_eq!(policy.grade(0), Grade::Low);
        assert_eq!(policy.grade(1), Grade::Medium);
        assert_eq!(policy.grade(2), Grade::Medium);
        assert_eq!(policy.grade(3), Grade::High);
        assert_eq!(policy.grade(4), Grade::High);
        assert_eq!(policy.grade(5), Grade::Critical);
        assert_eq!(policy.grade(50), Grade::Critical);
    }

    #[test]
    fn custom_policy_thresholds() {
        let policy = ClassifyPolicy {
            medium_at: 2,
            high_at: 6,
            critical_at: 10,
        };
        assert_eq!(policy.grade(1), Grade::Low);
        assert_eq!(policy.grade(6), Grade::High);
    }

    #[test]
    fn grade_recommendations() {
        assert_eq!(Grade::Low.recommendation(), "passes review");
        assert_eq!(
            Grade::Critical.recommendation(),
            "requires significant revision"
        );
    }

    #[test]
    fn empty_result_passes() {
        let result = EvaluationResult::new("f.txt", vec![], &ClassifyPolicy::default());
        assert!(result.passed());
        assert_eq!(result.grade, Grade::Low);
        assert_eq!(result.recommendation(), "passes review");
    }

    #[test]
    fn single_violation_is_medium() {
        let result = EvaluationResult::new(
            "f.txt",
            vec![make_violation(Severity::Minor)],
            &ClassifyPolicy::default(),
        );
        assert!(!result.passed());
        assert_eq!(result.grade, Grade::Medium);
    }

    #[test]
    fn violation_display_includes_line_and_language() {
        let v = make_violation(Severity::Minor)
            .with_line(3)
            .with_language("ruby");
        let rendered = format!("{v}");
        assert!(rendered.contains("doc.md:3"));
        assert!(rendered.contains("(ruby)"));
        assert!(rendered.contains("lexical/absolute_language"));
    }

    #[test]
    fn framework_total_sums_file_and_cross_file_counts() {
        let policy = ClassifyPolicy::default();
        let per_file = vec![
            EvaluationResult::new("a.rb", vec![make_violation(Severity::Minor)], &policy),
            EvaluationResult::new("b.rb", vec![], &policy),
        ];
        let cross = vec![make_violation(Severity::Major)];
        let result = FrameworkResult::new(per_file, cross, &policy);
        assert_eq!(result.total(), 2);
        assert!(!result.passed());
        assert_eq!(result.grade, Grade::Medium);
    }

    #[test]
    fn has_violations_at_respects_ordering() {
        let result = EvaluationResult::new(
            "f.txt",
            vec![make_violation(Severity::Minor)],
            &ClassifyPolicy::default(),
        );
        assert!(result.has_violations_at(Severity::Info));
        assert!(result.has_violations_at(Severity::Minor));
        assert!(!result.has_violations_at(Severity::Major));
    }
}
