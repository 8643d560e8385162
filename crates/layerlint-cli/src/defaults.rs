//! Built-in default rule set, used when no configuration is found and as
//! the template written by `layerlint init`.

/// Default rules in TOML form.
pub const DEFAULT_RULES: &str = r#"# layerlint rule configuration
#
# Each [[rules]] entry needs an `id` and either a `pattern` (regex) or a
# `metric` with a `threshold`. Optional fields: message, severity
# (info|minor|major|critical), layer (literal|lexical|conceptual|semantic|
# cognitive|language), scope (line|unit|file|framework), languages.

# Grading thresholds (violation counts).
[policy]
medium_at = 1
high_at = 3
critical_at = 5

[[rules]]
id = "todo_marker"
pattern = '\b(TODO|FIXME|HACK|XXX)\b'
message = "Unresolved marker comment"
severity = "info"
layer = "literal"
scope = "line"

[[rules]]
id = "absolute_language"
pattern = '\b(always|never|all|none|every|impossible)\b'
message = "Absolute language overstates certainty"
severity = "minor"
layer = "lexical"
scope = "line"

[[rules]]
id = "hedge_words"
pattern = '\b(obviously|clearly|simply|just|trivially)\b'
message = "Hedge word assumes shared context"
severity = "info"
layer = "conceptual"
scope = "line"

[[rules]]
id = "contradictory_claim"
pattern = '(?i)\bshould (?:always|never)\b.*\bexcept\b'
message = "Claim contradicts its own exception"
severity = "minor"
layer = "semantic"

[[rules]]
id = "single_responsibility"
metric = "unit_count"
threshold = 1
message = "More than one top-level unit in a single file"
severity = "major"

[[rules]]
id = "excessive_branching"
metric = "branching"
threshold = 10
message = "Too many branching constructs"
severity = "major"

[[rules]]
id = "deep_nesting"
metric = "nesting_depth"
threshold = 4
message = "Nesting too deep"
severity = "minor"

[[rules]]
id = "file_too_long"
metric = "line_count"
threshold = 400
message = "File exceeds the size limit"
severity = "minor"

[[rules]]
id = "repeated_lines"
metric = "duplication"
threshold = 0
message = "Duplicated non-trivial line"
severity = "minor"

[rules.options]
min_line_length = 30
repeat_threshold = 2

[[rules]]
id = "rescue_nil"
pattern = 'rescue\s+nil'
message = "Swallowing all errors with `rescue nil`"
severity = "major"
layer = "language"
languages = ["ruby"]

[[rules]]
id = "bare_except"
pattern = '(?m)^\s*except\s*:'
message = "Bare `except:` swallows all errors"
severity = "major"
layer = "language"
languages = ["python"]

[substitutions.verbs]
utilize = ["use"]
leverage = ["use", "apply"]
facilitate = ["help", "enable"]

[substitutions.nouns]
functionality = ["feature", "behavior"]
utilization = ["use"]
"#;
