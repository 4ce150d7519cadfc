//! Init command - write a starter config with the built-in rules.

use crate::cli::error::HelpfulError;
use sourcelist::manifest::DEFAULT_CONFIG_FILE;
use sourcelist::ManifestConfig;
use std::path::Path;
use tracing::info;

/// Arguments for the init command
#[derive(Debug, Default)]
pub struct InitArgs {
    pub force: bool,
}

pub fn run(root: &Path, args: InitArgs) -> anyhow::Result<()> {
    if !root.is_dir() {
        return Err(HelpfulError::root_not_found(root).into());
    }

    let path = root.join(DEFAULT_CONFIG_FILE);
    if path.exists() && !args.force {
        return Err(HelpfulError::config_exists(&path).into());
    }

    ManifestConfig::default().save(&path)?;
    info!(config = %path.display(), "Wrote default config");
    println!("Created {}", path.display());
    Ok(())
}
