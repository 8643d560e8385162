//! Reporting: turns results into human-readable or structured output.
//!
//! Purely a presentation transform; nothing here mutates the data model.

use std::fmt::Write;

use crate::types::{EvaluationResult, FrameworkResult, Severity};

/// Wording for the zero-violation case.
const CLEAN_SUMMARY: &str = "no significant issues found";

/// Renders one file's result as a multi-line text report.
#[must_use]
pub fn render_text(result: &EvaluationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", result.file.display());

    if result.passed() {
        let _ = writeln!(out, "  {CLEAN_SUMMARY}");
    } else {
        for v in &result.violations {
            let _ = writeln!(out, "  {v}");
        }
        let _ = writeln!(
            out,
            "  {} violation(s): {} critical, {} major, {} minor, {} info",
            result.total(),
            result.count_at(Severity::Critical),
            result.count_at(Severity::Major),
            result.count_at(Severity::Minor),
            result.count_at(Severity::Info),
        );
    }

    let _ = writeln!(
        out,
        "  grade: {} ({})",
        result.grade,
        result.recommendation()
    );
    append_degraded_note(&mut out, result.failed_sources);
    out
}

/// Renders a framework result: per-file sections, then cross-file findings.
#[must_use]
pub fn render_framework_text(result: &FrameworkResult) -> String {
    let mut out = String::new();

    for file in &result.files {
        let _ = writeln!(out, "{}", file.file.display());
        if file.passed() {
            let _ = writeln!(out, "  {CLEAN_SUMMARY}");
        } else {
            for v in &file.violations {
                let _ = writeln!(out, "  {v}");
            }
        }
    }

    if result.framework_violations.is_empty() {
        let _ = writeln!(out, "framework: {CLEAN_SUMMARY}");
    } else {
        let _ = writeln!(out, "framework:");
        for v in &result.framework_violations {
            let _ = writeln!(out, "  {v}");
            for related in &v.related {
                let _ = writeln!(out, "    involves: {}", related.display());
            }
        }
    }

    let _ = writeln!(
        out,
        "total: {} violation(s) in {} file(s); grade: {} ({})",
        result.total(),
        result.files.len(),
        result.grade,
        result.recommendation()
    );
    append_degraded_note(&mut out, result.failed_sources);
    out
}

/// One line per violation, for grep-friendly output.
#[must_use]
pub fn render_compact(result: &EvaluationResult) -> String {
    let mut out = String::new();
    for v in &result.violations {
        let _ = writeln!(out, "{v}");
    }
    out
}

/// Structured JSON for machine consumption.
///
/// # Errors
///
/// Returns a serialization error; this cannot fail for well-formed results.
pub fn render_json(result: &EvaluationResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Structured JSON for a framework result.
///
/// # Errors
///
/// Returns a serialization error; this cannot fail for well-formed results.
pub fn render_framework_json(result: &FrameworkResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

fn append_degraded_note(out: &mut String, failed_sources: usize) {
    if failed_sources > 0 {
        let _ = writeln!(
            out,
            "  note: {failed_sources} configuration source(s) failed to load; confidence degraded"
        );
    }
}
