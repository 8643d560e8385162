//! Shared output formatting for evaluation results.

use anyhow::Result;
use layerlint_core::report;
use layerlint_core::{EvaluationResult, FrameworkResult, Grade, Severity};

use crate::OutputFormat;

/// Prints a single-file result in the specified format.
pub fn print_file(result: &EvaluationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_file_text(result),
        OutputFormat::Json => println!("{}", report::render_json(result)?),
        OutputFormat::Compact => print!("{}", report::render_compact(result)),
    }
    Ok(())
}

/// Prints a framework result in the specified format.
pub fn print_set(result: &FrameworkResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_set_text(result),
        OutputFormat::Json => println!("{}", report::render_framework_json(result)?),
        OutputFormat::Compact => {
            for file in &result.files {
                print!("{}", report::render_compact(file));
            }
            for v in &result.framework_violations {
                println!("{v}");
            }
        }
    }
    Ok(())
}

fn print_file_text(result: &EvaluationResult) {
    println!("{}", result.file.display());

    if result.passed() {
        println!("  no significant issues found");
    } else {
        for v in &result.violations {
            print_violation(v);
        }
    }
    print_summary_line(result.total(), result.grade, result.recommendation());
    print_degraded(result.failed_sources);
}

fn print_set_text(result: &FrameworkResult) {
    for file in &result.files {
        println!("{}", file.file.display());
        if file.passed() {
            println!("  no significant issues found");
        } else {
            for v in &file.violations {
                print_violation(v);
            }
        }
    }

    if result.framework_violations.is_empty() {
        println!("framework: no significant issues found");
    } else {
        println!("framework:");
        for v in &result.framework_violations {
            print_violation(v);
            for related in &v.related {
                println!("    involves: {}", related.display());
            }
        }
    }

    println!("checked {} file(s)", result.files.len());
    print_summary_line(result.total(), result.grade, result.recommendation());
    print_degraded(result.failed_sources);
}

fn print_violation(v: &layerlint_core::Violation) {
    let severity_indicator = match v.severity {
        Severity::Critical => "\x1b[31mcritical\x1b[0m",
        Severity::Major => "\x1b[31mmajor\x1b[0m",
        Severity::Minor => "\x1b[33mminor\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    };

    print!("  {}", v.file.display());
    if let Some(line) = v.line {
        print!(":{line}");
    }
    print!(": {severity_indicator} [{}/{}] {}", v.layer, v.rule_id, v.message);
    if let Some(tag) = &v.language {
        print!(" ({tag})");
    }
    println!();
}

fn print_summary_line(total: usize, grade: Grade, recommendation: &str) {
    let color = match grade {
        Grade::Critical | Grade::High => "\x1b[31m",
        Grade::Medium => "\x1b[33m",
        Grade::Low => "\x1b[32m",
    };
    println!("{color}{total} violation(s); grade: {grade} ({recommendation})\x1b[0m");
}

fn print_degraded(failed_sources: usize) {
    if failed_sources > 0 {
        println!(
            "\x1b[33mnote: {failed_sources} configuration source(s) failed to load; confidence degraded\x1b[0m"
        );
    }
}
