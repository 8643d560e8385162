//! Suggest command implementation.

use layerlint_core::{Engine, SuggestKind};
use std::path::Path;

use crate::config_resolver;

/// Prints substitutions for a term from the loaded tables.
pub fn run(term: &str, kind: SuggestKind, explicit_config: Option<&Path>) {
    let source = config_resolver::resolve(Path::new("."), explicit_config);
    let engine = Engine::new(source.into_store());

    let suggestions = engine.suggest(term, kind);
    if suggestions.is_empty() {
        println!("No suggestions for `{term}`.");
    } else {
        for s in suggestions {
            println!("{s}");
        }
    }
}
