//! Rule store: configuration loading, caching, and language filtering.
//!
//! The store owns a list of injected sources and a lazily-initialized
//! cache. Loading is resilient by design: a missing file contributes
//! nothing, an unparseable file is logged and counted, a malformed entry
//! drops only itself. None of these conditions surface as errors to
//! callers; an empty rule set still yields well-defined (always-passing)
//! results.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

use crate::config::{convert_rule, DocumentFormat, RuleFileDto};
use crate::rule::Rule;
use crate::suggest::SubstitutionTable;
use crate::types::{ClassifyPolicy, Layer};

/// One injected configuration source.
#[derive(Debug, Clone)]
pub enum RuleSource {
    /// A file on disk; format chosen by extension.
    Path(PathBuf),
    /// An in-memory document, mainly for tests and embedding.
    Inline {
        /// Name used in log messages.
        name: String,
        /// Document format.
        format: DocumentFormat,
        /// Document content.
        content: String,
    },
}

impl RuleSource {
    /// Convenience constructor for inline TOML sources.
    #[must_use]
    pub fn inline_toml(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Inline {
            name: name.into(),
            format: DocumentFormat::Toml,
            content: content.into(),
        }
    }

    fn name(&self) -> String {
        match self {
            Self::Path(p) => p.display().to_string(),
            Self::Inline { name, .. } => name.clone(),
        }
    }
}

/// A fully-loaded, immutable set of rules plus document-level extras.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    policy: ClassifyPolicy,
    substitutions: SubstitutionTable,
    failed_sources: usize,
    skipped_rules: usize,
}

impl RuleSet {
    /// All loaded rules.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules consulted by one layer.
    pub fn for_layer(&self, layer: Layer) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.layer == layer)
    }

    /// Rules applicable to a language tag: universal rules plus rules
    /// carrying the tag.
    #[must_use]
    pub fn rules_for_language(&self, tag: &str) -> Vec<&Rule> {
        self.rules
            .iter()
            .filter(|r| r.languages.is_empty() || r.languages.iter().any(|l| l == tag))
            .collect()
    }

    /// Framework-scope (cross-file) rules.
    pub fn framework_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| r.is_framework())
    }

    /// Grading thresholds for this set.
    #[must_use]
    pub fn policy(&self) -> &ClassifyPolicy {
        &self.policy
    }

    /// The substitution table loaded alongside the rules.
    #[must_use]
    pub fn substitutions(&self) -> &SubstitutionTable {
        &self.substitutions
    }

    /// Number of sources that were present but failed to load.
    #[must_use]
    pub fn failed_sources(&self) -> usize {
        self.failed_sources
    }

    /// Number of entries dropped during conversion.
    #[must_use]
    pub fn skipped_rules(&self) -> usize {
        self.skipped_rules
    }

    /// True when no rules loaded from any source.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Owns configuration sources and the memoized rule cache.
///
/// `load()` builds the set once and caches it; `reload()` clears the
/// cache. The swap is atomic: concurrent readers see either the previous
/// set or the fully-built new one, never a partially-populated one.
pub struct RuleStore {
    sources: Vec<RuleSource>,
    cache: RwLock<Option<Arc<RuleSet>>>,
}

impl RuleStore {
    /// Creates a store over the given sources.
    #[must_use]
    pub fn new(sources: Vec<RuleSource>) -> Self {
        Self {
            sources,
            cache: RwLock::new(None),
        }
    }

    /// Creates a store with no sources; every evaluation passes.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the loaded rule set, loading on first access.
    pub fn load(&self) -> Arc<RuleSet> {
        {
            let cache = self
                .cache
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(set) = cache.as_ref() {
                return Arc::clone(set);
            }
        }

        // Build outside the lock, then publish in one swap.
        let set = Arc::new(self.build());
        let mut cache = self
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Another thread may have raced us here; keep whichever landed.
        if let Some(existing) = cache.as_ref() {
            return Arc::clone(existing);
        }
        *cache = Some(Arc::clone(&set));
        set
    }

    /// Clears the cache; the next `load()` re-reads every source.
    pub fn reload(&self) {
        let mut cache = self
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *cache = None;
        debug!("rule cache cleared");
    }

    fn build(&self) -> RuleSet {
        let mut set = RuleSet::default();

        for source in &self.sources {
            let name = source.name();
            let (content, format) = match source {
                RuleSource::Inline {
                    content, format, ..
                } => (content.clone(), *format),
                RuleSource::Path(path) => {
                    let format =
                        DocumentFormat::from_extension(path.extension().and_then(|e| e.to_str()));
                    match std::fs::read_to_string(path) {
                        Ok(content) => (content, format),
                        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                            debug!("rule source {name} not found, skipping");
                            continue;
                        }
                        Err(e) => {
                            warn!("failed to read rule source {name}: {e}");
                            set.failed_sources += 1;
                            continue;
                        }
                    }
                }
            };

            let dto = match RuleFileDto::parse(&content, format) {
                Ok(dto) => dto,
                Err(e) => {
                    warn!("failed to parse rule source {name}: {e}");
                    set.failed_sources += 1;
                    continue;
                }
            };

            if let Some(policy) = dto.policy {
                set.policy = policy;
            }
            set.substitutions.merge(dto.substitutions);

            for entry in dto.rules {
                match convert_rule(entry) {
                    Ok(rule) => {
                        debug!("loaded rule {} ({} layer)", rule.id, rule.layer);
                        set.rules.push(rule);
                    }
                    Err(e) => {
                        warn!("{name}: dropping rule: {e}");
                        set.skipped_rules += 1;
                    }
                }
            }
        }

        if set.is_empty() {
            warn!("no rules loaded from any source; evaluations will always pass");
        }

        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store_from(content: &str) -> RuleStore {
        RuleStore::new(vec![RuleSource::inline_toml("test", content)])
    }

    #[test]
    fn load_is_memoized() {
        let store = store_from(
            r#"
[[rules]]
id = "a"
pattern = "x"
"#,
        );
        let first = store.load();
        let second = store.load();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn reload_clears_cache() {
        let store = store_from(
            r#"
[[rules]]
id = "a"
pattern = "x"
"#,
        );
        let first = store.load();
        store.reload();
        let second = store.load();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.rules().len(), 1);
    }

    #[test]
    fn malformed_entry_drops_only_itself() {
        let store = store_from(
            r#"
[[rules]]
id = "good"
pattern = "x"

[[rules]]
id = "broken"
pattern = "("

[[rules]]
id = "also_good"
pattern = "y"
"#,
        );
        let set = store.load();
        assert_eq!(set.rules().len(), 2);
        assert_eq!(set.skipped_rules(), 1);
        assert_eq!(set.failed_sources(), 0);

        let ids: Vec<&str> = set
            .rules_for_language("ruby")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["good", "also_good"]);
    }

    #[test]
    fn unparseable_source_counts_as_failed() {
        let store = RuleStore::new(vec![
            RuleSource::inline_toml("bad", "rules = not toml"),
            RuleSource::inline_toml(
                "good",
                r#"
[[rules]]
id = "a"
pattern = "x"
"#,
            ),
        ]);
        let set = store.load();
        assert_eq!(set.failed_sources(), 1);
        assert_eq!(set.rules().len(), 1);
    }

    #[test]
    fn missing_file_is_not_failed() {
        let store = RuleStore::new(vec![RuleSource::Path(PathBuf::from(
            "/nonexistent/layerlint.toml",
        ))]);
        let set = store.load();
        assert_eq!(set.failed_sources(), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn loads_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("rules.toml");
        let mut f = std::fs::File::create(&toml_path).unwrap();
        writeln!(f, "[[rules]]\nid = \"t\"\npattern = \"x\"").unwrap();

        let json_path = dir.path().join("rules.json");
        std::fs::write(&json_path, r#"{"rules": [{"id": "j", "pattern": "y"}]}"#).unwrap();

        let store = RuleStore::new(vec![
            RuleSource::Path(toml_path),
            RuleSource::Path(json_path),
        ]);
        let set = store.load();
        assert_eq!(set.rules().len(), 2);
    }

    #[test]
    fn language_filter_universal_and_tagged() {
        let store = store_from(
            r#"
[[rules]]
id = "universal_rule"
pattern = "x"

[[rules]]
id = "ruby_only"
pattern = "y"
languages = ["ruby"]
"#,
        );
        let set = store.load();

        let ruby: Vec<&str> = set
            .rules_for_language("ruby")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ruby, vec!["universal_rule", "ruby_only"]);

        let js: Vec<&str> = set
            .rules_for_language("javascript")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(js, vec!["universal_rule"]);
    }

    #[test]
    fn later_policy_wins() {
        let store = RuleStore::new(vec![
            RuleSource::inline_toml("first", "[policy]\nmedium_at = 2"),
            RuleSource::inline_toml("second", "[policy]\nmedium_at = 4"),
        ]);
        let set = store.load();
        assert_eq!(set.policy().medium_at, 4);
    }

    #[test]
    fn empty_store_is_empty() {
        let set = RuleStore::empty().load();
        assert!(set.is_empty());
        assert_eq!(set.failed_sources(), 0);
    }
}
