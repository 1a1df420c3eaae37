//! Init command - write an example blackbox.toml

use anyhow::{Context, Result};
use blackbox::config::{ScoringConfig, CONFIG_FILE_NAME};
use std::path::Path;

pub(crate) fn run(dir: &Path, force: bool) -> Result<()> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    std::fs::write(&path, ScoringConfig::example_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}
