//! List-rules command implementation.

use layerlint_core::RuleKind;
use std::path::Path;

use crate::config_resolver;

/// Prints the rules the resolved configuration loads.
pub fn run(explicit_config: Option<&Path>) {
    let source = config_resolver::resolve(Path::new("."), explicit_config);
    let set = source.into_store().load();

    if set.is_empty() {
        println!("No rules loaded.");
        return;
    }

    println!("Loaded {} rule(s):\n", set.rules().len());
    println!(
        "{:<28} {:<12} {:<10} {:<10} Kind",
        "Id", "Layer", "Scope", "Severity"
    );
    println!("{}", "-".repeat(80));

    for rule in set.rules() {
        let kind = match &rule.kind {
            RuleKind::Pattern { .. } => "pattern".to_string(),
            RuleKind::Metric {
                metric, threshold, ..
            } => format!("metric ({metric}, threshold {threshold})"),
        };
        println!(
            "{:<28} {:<12} {:<10} {:<10} {kind}",
            rule.id,
            rule.layer.to_string(),
            rule.scope.to_string(),
            rule.severity.to_string(),
        );
    }

    if set.skipped_rules() > 0 {
        println!("\n{} malformed entr(ies) were dropped.", set.skipped_rules());
    }
}
