//! Project root and rule table resolution shared by all commands.
//!
//! Config lookup order:
//! 1. `--config <file>` (must exist)
//! 2. `<root>/sourcelist.toml` if present
//! 3. The built-in default rules

use crate::cli::error::HelpfulError;
use sourcelist::manifest::DEFAULT_CONFIG_FILE;
use sourcelist::{Generator, ManifestConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolved inputs for one invocation
#[derive(Debug)]
pub struct ProjectContext {
    pub root: PathBuf,
    pub config: ManifestConfig,
    /// `None` when the built-in rules are in use
    pub config_path: Option<PathBuf>,
}

impl ProjectContext {
    pub fn resolve(root: &Path, config: Option<&Path>) -> anyhow::Result<Self> {
        if !root.is_dir() {
            return Err(HelpfulError::root_not_found(root).into());
        }

        let config_path = match config {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    root.join(path)
                };
                if !path.is_file() {
                    return Err(HelpfulError::config_not_found(&path).into());
                }
                Some(path)
            }
            None => {
                let candidate = root.join(DEFAULT_CONFIG_FILE);
                candidate.is_file().then_some(candidate)
            }
        };

        let config = match &config_path {
            Some(path) => {
                debug!(config = %path.display(), "Loading rule table");
                ManifestConfig::load(path)
                    .map_err(|e| HelpfulError::invalid_config(Some(path.as_path()), &e))?
            }
            None => {
                debug!("No config file found, using built-in rules");
                ManifestConfig::default()
            }
        };

        Ok(Self {
            root: root.to_path_buf(),
            config,
            config_path,
        })
    }

    /// Compile the rule table into a generator.
    pub fn generator(&self) -> anyhow::Result<Generator> {
        Generator::from_config(&self.root, &self.config).map_err(|e| {
            HelpfulError::invalid_config(self.config_path.as_deref(), &e).into()
        })
    }

    pub fn config_label(&self) -> String {
        self.config_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in rules".to_string())
    }
}
