//! Derived metrics for cognitive-layer rules.
//!
//! These are heuristics over raw text, not AST facts: they must stay cheap,
//! deterministic, and total (never fail for any well-formed string).

use std::collections::HashMap;

use crate::rule::MetricOptions;

/// Keywords that open a top-level structural unit.
const UNIT_KEYWORDS: &[&str] = &[
    "class",
    "module",
    "struct",
    "enum",
    "trait",
    "interface",
];

/// Branching keywords counted by the complexity heuristic.
const BRANCH_KEYWORDS: &[&str] = &[
    "if", "elsif", "elif", "unless", "when", "case", "switch", "match", "while", "until", "for",
];

/// Total number of lines.
#[must_use]
pub fn line_count(text: &str) -> usize {
    text.lines().count()
}

/// Number of top-level structural unit declarations.
///
/// A line counts when it has no leading whitespace and starts with a
/// class/module-equivalent keyword (optionally after `pub`/`export`).
#[must_use]
pub fn unit_count(text: &str) -> usize {
    text.lines()
        .filter(|line| {
            if line.starts_with(char::is_whitespace) {
                return false;
            }
            let mut words = line.split_whitespace();
            match words.next() {
                None => false,
                Some("pub" | "export" | "abstract" | "final") => {
                    words.next().is_some_and(|w| UNIT_KEYWORDS.contains(&w))
                }
                Some(first) => UNIT_KEYWORDS.contains(&first),
            }
        })
        .count()
}

/// Number of branching constructs (conditionals, case arms, loops).
#[must_use]
pub fn branching(text: &str) -> usize {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|token| BRANCH_KEYWORDS.contains(token))
        .count()
}

/// Maximum nesting depth.
///
/// Uses brace depth where braces exist and indentation depth (two-space or
/// tab units) otherwise, taking whichever runs deeper.
#[must_use]
pub fn nesting_depth(text: &str) -> usize {
    let mut brace_depth: usize = 0;
    let mut max_brace: usize = 0;
    for c in text.chars() {
        match c {
            '{' => {
                brace_depth += 1;
                max_brace = max_brace.max(brace_depth);
            }
            '}' => brace_depth = brace_depth.saturating_sub(1),
            _ => {}
        }
    }

    let max_indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(indent_units)
        .max()
        .unwrap_or(0);

    max_brace.max(max_indent)
}

fn indent_units(line: &str) -> usize {
    let mut spaces = 0usize;
    let mut tabs = 0usize;
    for c in line.chars() {
        match c {
            ' ' => spaces += 1,
            '\t' => tabs += 1,
            _ => break,
        }
    }
    tabs + spaces / 2
}

/// A line flagged by the duplication heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatedLine {
    /// Trimmed content shared by the repeats.
    pub content: String,
    /// Number of occurrences.
    pub count: usize,
    /// Line number (1-indexed) of the first occurrence.
    pub first_line: usize,
}

/// Finds non-trivial lines that recur more than `options.repeat_threshold`
/// times.
///
/// Occurrences are grouped by trimmed content but only lines whose raw
/// length exceeds `options.min_line_length` are eligible, so trivial repeats
/// (closing braces, `end` keywords) never flag. Exactly one entry is
/// returned per distinct repeated line, ordered by first occurrence.
#[must_use]
pub fn duplicates(text: &str, options: &MetricOptions) -> Vec<DuplicatedLine> {
    let mut groups: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || raw.len() <= options.min_line_length {
            continue;
        }
        match groups.get_mut(trimmed) {
            Some((count, _)) => *count += 1,
            None => {
                groups.insert(trimmed, (1, idx + 1));
                order.push(trimmed);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|content| {
            let (count, first_line) = groups[content];
            (count > options.repeat_threshold).then(|| DuplicatedLine {
                content: content.to_string(),
                count,
                first_line,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_count_empty_text() {
        assert_eq!(line_count(""), 0);
    }

    #[test]
    fn unit_count_counts_top_level_only() {
        let text = "class Foo\n  class Inner\nend\nmodule Bar\nend\n";
        assert_eq!(unit_count(text), 2);
    }

    #[test]
    fn unit_count_handles_visibility_prefix() {
        let text = "pub struct Config {\n}\npub enum Mode {\n}\n";
        assert_eq!(unit_count(text), 2);
    }

    #[test]
    fn branching_counts_keywords_not_substrings() {
        let text = "if x\n  notify(a)\nelsif y\n  modifier\nend\ncase z\nwhen 1 then 2\n";
        // if, elsif, case, when; "notify"/"modifier" must not count.
        assert_eq!(branching(text), 4);
    }

    #[test]
    fn branching_empty_text() {
        assert_eq!(branching(""), 0);
    }

    #[test]
    fn nesting_depth_braces() {
        let text = "fn main() {\n    if x {\n        y();\n    }\n}\n";
        assert!(nesting_depth(text) >= 2);
    }

    #[test]
    fn nesting_depth_indentation_only() {
        let text = "def a\n  def b\n    def c\n      x\n";
        assert_eq!(nesting_depth(text), 3);
    }

    #[test]
    fn nesting_depth_unbalanced_braces_do_not_underflow() {
        assert_eq!(nesting_depth("}}}"), 0);
    }

    #[test]
    fn duplicates_flags_each_line_once() {
        let repeated = "    this line is exactly repeated  ";
        assert_eq!(repeated.len(), 35);
        let mut text = String::new();
        for i in 0..4 {
            text.push_str(repeated);
            text.push('\n');
            text.push_str(&format!("unique filler line number {i} with padding\n"));
        }

        let options = MetricOptions {
            min_line_length: 30,
            repeat_threshold: 2,
        };
        let found = duplicates(&text, &options);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].content, "this line is exactly repeated");
        assert_eq!(found[0].count, 4);
        assert_eq!(found[0].first_line, 1);
    }

    #[test]
    fn duplicates_ignores_short_lines() {
        let text = "end\nend\nend\nend\n";
        let found = duplicates(text, &MetricOptions::default());
        assert!(found.is_empty());
    }

    #[test]
    fn duplicates_below_repeat_threshold_not_flagged() {
        let line = "a line that is certainly longer than thirty characters\n";
        let text = format!("{line}{line}");
        let found = duplicates(&text, &MetricOptions::default());
        // Two occurrences, threshold is "more than 2".
        assert!(found.is_empty());
    }
}
