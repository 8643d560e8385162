//! Check-set command: evaluate an explicit file set together.

use anyhow::{Context, Result};
use layerlint_core::Engine;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{config_resolver, FailOn, OutputFormat};

/// Runs framework-scope evaluation across the given files.
pub fn run(
    paths: &[PathBuf],
    format: OutputFormat,
    fail_on: FailOn,
    explicit_config: Option<&Path>,
) -> Result<()> {
    let project_dir = paths
        .first()
        .and_then(|p| p.parent())
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    let source = config_resolver::resolve(&project_dir, explicit_config);
    let engine = Engine::new(source.into_store());

    let mut files = BTreeMap::new();
    for path in paths {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        files.insert(path.clone(), text);
    }

    let result = engine.evaluate_framework(&files);
    super::output::print_set(&result, format)?;

    if result.has_violations_at(fail_on.into()) {
        std::process::exit(1);
    }
    Ok(())
}
