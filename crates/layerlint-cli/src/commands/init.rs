//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

use crate::defaults;

/// Writes a starter `layerlint.toml` in the current directory.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("layerlint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, defaults::DEFAULT_RULES)?;

    println!("Created layerlint.toml");
    println!("\nNext steps:");
    println!("  1. Edit layerlint.toml to adjust rules and thresholds");
    println!("  2. Run: layerlint check");

    Ok(())
}
