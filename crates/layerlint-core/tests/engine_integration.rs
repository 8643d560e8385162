//! End-to-end pipeline tests: configuration in, graded results out.

use std::collections::BTreeMap;
use std::path::PathBuf;

use layerlint_core::{
    Engine, Grade, RuleSource, RuleStore, Severity, SuggestKind,
};

fn engine(config: &str) -> Engine {
    Engine::new(RuleStore::new(vec![RuleSource::inline_toml("test", config)]))
}

const ABSOLUTE_LANGUAGE: &str = r#"
[[rules]]
id = "absolute_language"
pattern = '\b(always|never)\b'
severity = "minor"
"#;

#[test]
fn scenario_matching_text_yields_medium() {
    let result = engine(ABSOLUTE_LANGUAGE).evaluate("This always works.", "doc.md");

    assert_eq!(result.total(), 1);
    assert_eq!(result.violations[0].rule_id, "absolute_language");
    assert_eq!(result.violations[0].severity, Severity::Minor);
    assert_eq!(result.grade, Grade::Medium);
    assert!(!result.passed());
}

#[test]
fn scenario_clean_text_yields_low() {
    let result = engine(ABSOLUTE_LANGUAGE).evaluate("This usually works.", "doc.md");

    assert_eq!(result.total(), 0);
    assert_eq!(result.grade, Grade::Low);
    assert!(result.passed());
}

#[test]
fn scenario_empty_input_is_low() {
    let result = engine(ABSOLUTE_LANGUAGE).evaluate("", "f.txt");
    assert_eq!(result.total(), 0);
    assert_eq!(result.grade, Grade::Low);
}

#[test]
fn scenario_duplicated_line_flagged_once() {
    let config = r#"
[[rules]]
id = "repeated_lines"
metric = "duplication"
threshold = 0
severity = "minor"

[rules.options]
min_line_length = 30
repeat_threshold = 2
"#;
    let repeated = "    this line is exactly repeated  ";
    assert_eq!(repeated.len(), 35);

    let mut text = String::new();
    for i in 0..4 {
        text.push_str(repeated);
        text.push('\n');
        text.push_str(&format!("unique trailer {i}\n"));
    }

    let result = engine(config).evaluate(&text, "dup.rb");
    assert_eq!(result.total(), 1, "one violation per distinct line, not per repeat");
    assert_eq!(result.violations[0].rule_id, "repeated_lines");
}

#[test]
fn scenario_shared_responsibility_across_files() {
    let config = r#"
[[rules]]
id = "duplicate_responsibility"
pattern = 'responsibility:\s*(\w+)'
scope = "framework"
layer = "semantic"
severity = "major"

[[rules]]
id = "absolute_language"
pattern = '\b(always|never)\b'
severity = "minor"
"#;

    let mut files = BTreeMap::new();
    files.insert(
        PathBuf::from("billing_a.rb"),
        "# responsibility: billing\nThis always runs.\n".to_string(),
    );
    files.insert(
        PathBuf::from("billing_b.rb"),
        "# responsibility: billing\n".to_string(),
    );

    let result = engine(config).evaluate_framework(&files);

    assert_eq!(result.framework_violations.len(), 1);
    let cross = &result.framework_violations[0];
    assert_eq!(cross.rule_id, "duplicate_responsibility");
    assert!(cross.related.contains(&PathBuf::from("billing_a.rb")));
    assert!(cross.related.contains(&PathBuf::from("billing_b.rb")));

    // Per-file evaluation is independent of the cross-file rule.
    assert_eq!(result.files.len(), 2);
    let file_a = &result.files[0];
    assert_eq!(file_a.file, PathBuf::from("billing_a.rb"));
    assert_eq!(file_a.total(), 1);
    assert_eq!(file_a.violations[0].rule_id, "absolute_language");

    // Total = per-file violations + framework violations.
    assert_eq!(result.total(), 2);
    assert_eq!(result.grade, Grade::Medium);
}

#[test]
fn malformed_rule_does_not_poison_the_set() {
    let config = r#"
[[rules]]
id = "broken"
pattern = "("

[[rules]]
id = "working"
pattern = "marker"
"#;
    let e = engine(config);
    let set = e.store().load();
    assert_eq!(set.rules().len(), 1);
    assert_eq!(set.skipped_rules(), 1);

    let result = e.evaluate("marker here", "f.txt");
    assert_eq!(result.total(), 1);
    assert_eq!(result.violations[0].rule_id, "working");
}

#[test]
fn failed_source_degrades_but_still_evaluates() {
    let store = RuleStore::new(vec![
        RuleSource::inline_toml("broken", "this is { not toml"),
        RuleSource::inline_toml("good", ABSOLUTE_LANGUAGE),
    ]);
    let e = Engine::new(store);

    let result = e.evaluate("never do this", "f.txt");
    assert_eq!(result.total(), 1);
    assert_eq!(result.failed_sources, 1);

    let rendered = layerlint_core::report::render_text(&result);
    assert!(rendered.contains("1 configuration source(s) failed to load"));
}

#[test]
fn language_tagged_rules_follow_the_extension() {
    let config = r#"
[[rules]]
id = "ruby_only"
pattern = "instance_variable_get"
layer = "language"
languages = ["ruby"]

[[rules]]
id = "everywhere"
pattern = "FIXME"
"#;
    let e = engine(config);

    let rb = e.evaluate("x.instance_variable_get(:@y) # FIXME\n", "a.rb");
    assert_eq!(rb.total(), 2);

    let js = e.evaluate("x.instance_variable_get('y') // FIXME\n", "a.js");
    assert_eq!(js.total(), 1);
    assert_eq!(js.violations[0].rule_id, "everywhere");
}

#[test]
fn reload_picks_up_nothing_new_for_inline_sources() {
    // reload() must rebuild from sources, yielding an equivalent set.
    let e = engine(ABSOLUTE_LANGUAGE);
    let before = e.evaluate("always", "f.txt");
    e.store().reload();
    let after = e.evaluate("always", "f.txt");
    assert_eq!(before.violations, after.violations);
}

#[test]
fn suggest_is_a_plain_lookup() {
    let e = engine(
        r#"
[substitutions.verbs]
utilize = ["use"]
leverage = ["use", "apply"]

[substitutions.nouns]
functionality = ["feature"]
"#,
    );
    assert_eq!(e.suggest("leverage", SuggestKind::Verb), vec!["use", "apply"]);
    assert_eq!(e.suggest("functionality", SuggestKind::Noun), vec!["feature"]);
    assert!(e.suggest("synergy", SuggestKind::Noun).is_empty());
}
