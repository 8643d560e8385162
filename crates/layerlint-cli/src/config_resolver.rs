//! Rule configuration resolution with global fallback.
//!
//! Resolves the rule file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/layerlint.toml` or `.layerlint.toml`
//! 3. `~/.layerlint/rules.toml` (global fallback)
//! 4. No config found → built-in default rule set

use std::path::{Path, PathBuf};

use layerlint_core::{RuleSource, RuleStore};

use crate::defaults;

/// Where the rule configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.layerlint/`).
    Global(PathBuf),
    /// No config found; the built-in rule set will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Builds a rule store from this source.
    #[must_use]
    pub fn into_store(self) -> RuleStore {
        let source = match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => RuleSource::Path(p),
            Self::Default => RuleSource::inline_toml("builtin", defaults::DEFAULT_RULES),
        };
        RuleStore::new(vec![source])
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["layerlint.toml", ".layerlint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "rules.toml";

/// Resolves the rule configuration path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    // 1. Explicit path from --config flag
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    // 2. Project-level config
    for name in PROJECT_CONFIG_NAMES {
        let candidate = project_dir.join(name);
        if candidate.exists() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    // 3. Global fallback
    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Returns the global config directory path.
///
/// Resolution: `$LAYERLINT_CONFIG_DIR` > `~/.layerlint/`
///
/// The env var override enables testing and custom CI setups.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("LAYERLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".layerlint"))
}
