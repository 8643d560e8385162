//! Check command implementation.

use anyhow::{Context, Result};
use layerlint_core::Engine;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{config_resolver, FailOn, OutputFormat};

/// Runs the check command over a file or a directory tree.
pub fn run(
    path: &Path,
    format: OutputFormat,
    fail_on: FailOn,
    explicit_config: Option<&Path>,
) -> Result<()> {
    let project_dir = if path.is_dir() {
        path.to_path_buf()
    } else {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    };

    let source = config_resolver::resolve(&project_dir, explicit_config);
    if let Some(p) = source.path() {
        tracing::info!("Using rules from {}", p.display());
    } else {
        tracing::info!("No rule configuration found, using built-in rules");
    }

    let engine = Engine::new(source.into_store());
    let set = engine.store().load();
    if set.is_empty() {
        tracing::warn!("no rules loaded from any source; every file will pass");
    }
    tracing::info!("Evaluating {} with {} rules", path.display(), set.rules().len());

    let fail_on = fail_on.into();

    if path.is_file() {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let result = engine.evaluate(&text, path);
        super::output::print_file(&result, format)?;

        if result.has_violations_at(fail_on) {
            std::process::exit(1);
        }
        return Ok(());
    }

    let files = discover_files(path)?;
    let result = engine.evaluate_framework(&files);
    super::output::print_set(&result, format)?;

    if result.has_violations_at(fail_on) {
        std::process::exit(1);
    }
    Ok(())
}

/// Walks a directory, collecting readable text files.
///
/// Respects `.gitignore` via the `ignore` crate's standard filters; files
/// that are not valid UTF-8 are skipped with a debug log.
fn discover_files(root: &Path) -> Result<BTreeMap<PathBuf, String>> {
    let mut files = BTreeMap::new();

    for entry in ignore::WalkBuilder::new(root).build() {
        let entry = entry.context("Failed to walk directory")?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.into_path();
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                files.insert(path, text);
            }
            Err(e) => {
                tracing::debug!("skipping {}: {e}", path.display());
            }
        }
    }

    Ok(files)
}
