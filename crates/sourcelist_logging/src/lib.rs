//! Shared logging setup for sourcelist binaries.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "sourcelist=info";
const VERBOSE_LOG_FILTER: &str = "sourcelist=debug";

/// Logging configuration shared by sourcelist binaries.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    /// Directory for a daily rolling log file. `None` logs to stderr only.
    pub log_dir: Option<PathBuf>,
}

/// Keeps the background file writer alive. Drop it last in `main`.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize tracing with stderr output and an optional rolling file writer.
///
/// Console output always goes to stderr so that commands printing manifests
/// or JSON on stdout are never interleaved with log lines.
pub fn init_logging(config: LogConfig<'_>) -> Result<LogGuard> {
    let env_filter = build_filter(config.verbose);

    let mut file_guard = None;
    let file_layer = match config.log_dir {
        Some(dir) => {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let file_name = format!("{}.log", sanitize_name(config.app_name));
            let appender = tracing_appender::rolling::daily(&dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            file_guard = Some(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(env_filter.clone()),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(env_filter),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogGuard { _file: file_guard })
}

/// `RUST_LOG` wins over `--verbose`; otherwise pick the default directive.
fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}
