//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use sourcelist::ManifestError;
use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// Project root does not exist or is not a directory
    pub fn root_not_found(path: &Path) -> Self {
        Self::new(format!("Project root not found: {}", path.display()))
            .with_context("Rule directories and the output path are resolved against the project root")
            .with_suggestions([
                format!("TRY: Check that the directory exists: ls -la {}", path.display()),
                "TRY: Pass the project directory explicitly: sourcelist --root <dir>".to_string(),
            ])
    }

    /// Explicit config file does not exist
    pub fn config_not_found(path: &Path) -> Self {
        Self::new(format!("Config file not found: {}", path.display()))
            .with_context("The file passed with --config does not exist")
            .with_suggestions([
                "TRY: Create a starter config: sourcelist init".to_string(),
                "TRY: Omit --config to use sourcelist.toml in the project root or the built-in rules"
                    .to_string(),
            ])
    }

    /// Config already exists and --force was not given
    pub fn config_exists(path: &Path) -> Self {
        Self::new(format!("Config file already exists: {}", path.display()))
            .with_suggestion("TRY: Re-run with --force to overwrite it")
    }

    /// Rule table or config could not be used
    pub fn invalid_config(path: Option<&Path>, err: &ManifestError) -> Self {
        let source = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in rules".to_string());
        Self::new(err.to_string())
            .with_context(format!("While loading rules from {}", source))
            .with_suggestions([
                "TRY: Each rule needs `directory`, `variable` and exactly one of `pattern` or `extensions`"
                    .to_string(),
                "TRY: Patterns use Rust regex syntax and match from the start of the path".to_string(),
            ])
    }

    /// Manifest could not be opened for writing
    pub fn output_not_writable(path: &Path, reason: &str) -> Self {
        let parent = path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ".".to_string());
        Self::new(format!("Cannot write manifest: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                format!("TRY: Make sure the directory exists: mkdir -p {}", parent),
                format!("TRY: Check directory permissions: ls -ld {}", parent),
                "TRY: Write somewhere else with --output <path>".to_string(),
            ])
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// Convert a generator failure into the user-facing error.
pub fn from_manifest_error(err: ManifestError) -> anyhow::Error {
    match err {
        ManifestError::Output { path, source } => {
            HelpfulError::output_not_writable(&path, &source.to_string()).into()
        }
        other => anyhow::Error::new(other),
    }
}

/// Print an error as a JSON object on stdout for `--json` callers.
pub fn print_json_error(err: &anyhow::Error) {
    let payload = match err.downcast_ref::<HelpfulError>() {
        Some(helpful) => serde_json::json!({
            "error": helpful.message,
            "context": helpful.context,
            "suggestions": helpful.suggestions,
        }),
        None => serde_json::json!({ "error": format!("{:#}", err) }),
    };
    println!("{}", payload);
}
