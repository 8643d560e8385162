//! Word-substitution lookup.
//!
//! A plain pre-indexed key-value table, populated from the same
//! configuration sources as the rules. Not part of the evaluation pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::SubstitutionsDto;

/// Whether a term is looked up as a verb or a noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestKind {
    /// Verb substitutions.
    Verb,
    /// Noun substitutions.
    Noun,
}

/// Indexed substitution tables for verbs and nouns.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    verbs: HashMap<String, Vec<String>>,
    nouns: HashMap<String, Vec<String>>,
}

impl SubstitutionTable {
    /// Merges entries from one configuration source. Later sources win on
    /// conflicting terms.
    pub fn merge(&mut self, dto: SubstitutionsDto) {
        self.verbs.extend(dto.verbs);
        self.nouns.extend(dto.nouns);
    }

    /// Looks up substitutions for a term; empty when the term is not indexed.
    #[must_use]
    pub fn lookup(&self, term: &str, kind: SuggestKind) -> Vec<String> {
        let table = match kind {
            SuggestKind::Verb => &self.verbs,
            SuggestKind::Noun => &self.nouns,
        };
        table.get(term).cloned().unwrap_or_default()
    }

    /// Returns true when both tables are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty() && self.nouns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SubstitutionTable {
        let mut t = SubstitutionTable::default();
        t.merge(SubstitutionsDto {
            verbs: HashMap::from([("utilize".to_string(), vec!["use".to_string()])]),
            nouns: HashMap::from([(
                "functionality".to_string(),
                vec!["feature".to_string(), "behavior".to_string()],
            )]),
        });
        t
    }

    #[test]
    fn lookup_known_verb() {
        assert_eq!(table().lookup("utilize", SuggestKind::Verb), vec!["use"]);
    }

    #[test]
    fn lookup_unindexed_term_is_empty() {
        assert!(table().lookup("leverage", SuggestKind::Verb).is_empty());
    }

    #[test]
    fn kinds_are_separate_tables() {
        assert!(table().lookup("functionality", SuggestKind::Verb).is_empty());
        assert_eq!(
            table().lookup("functionality", SuggestKind::Noun).len(),
            2
        );
    }

    #[test]
    fn later_merge_wins() {
        let mut t = table();
        t.merge(SubstitutionsDto {
            verbs: HashMap::from([("utilize".to_string(), vec!["apply".to_string()])]),
            nouns: HashMap::new(),
        });
        assert_eq!(t.lookup("utilize", SuggestKind::Verb), vec!["apply"]);
    }
}
