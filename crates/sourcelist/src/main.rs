//! sourcelist launcher
//!
//! Regenerates a CMake include file listing project files per rule. Running
//! with no subcommand is the same as `sourcelist generate`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use sourcelist_logging::{init_logging, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(name = "sourcelist", version, about = "Generate CMake source lists from a project tree")]
struct Cli {
    /// Project root; rule directories and the output path resolve against it
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Rule table (TOML). Defaults to <root>/sourcelist.toml, then built-in rules
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, global = true, env = "SOURCELIST_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan rule directories and rewrite the manifest (default)
    Generate {
        /// Manifest path, overriding the config's `output`
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the manifest to stdout instead of writing the file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Print a JSON summary
        #[arg(long, conflicts_with = "stdout")]
        json: bool,
    },

    /// Show what each rule matches without writing anything
    Scan {
        /// List matched files under each rule
        #[arg(short, long)]
        files: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a starter sourcelist.toml with the built-in rules
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn command_wants_json(command: &Option<Commands>) -> bool {
    match command {
        Some(Commands::Generate { json, .. }) => *json,
        Some(Commands::Scan { json, .. }) => *json,
        Some(Commands::Init { .. }) | None => false,
    }
}

fn run_command(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Generate {
        output: None,
        stdout: false,
        json: false,
    });

    match command {
        Commands::Generate {
            output,
            stdout,
            json,
        } => {
            let ctx = cli::context::ProjectContext::resolve(&cli.root, cli.config.as_deref())?;
            cli::generate::run(
                &ctx,
                cli::generate::GenerateArgs {
                    output,
                    stdout,
                    json,
                },
            )
        }
        Commands::Scan { files, json } => {
            let ctx = cli::context::ProjectContext::resolve(&cli.root, cli.config.as_deref())?;
            cli::scan::run(&ctx, cli::scan::ScanArgs { files, json })
        }
        Commands::Init { force } => cli::init::run(&cli.root, cli::init::InitArgs { force }),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_mode = command_wants_json(&cli.command);

    let _log_guard = match init_logging(LogConfig {
        app_name: "sourcelist",
        verbose: cli.verbose,
        log_dir: cli.log_dir.clone(),
    }) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {:#}", err);
            None
        }
    };

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = %format!("{:#}", err), "Command failed");
            if json_mode {
                cli::error::print_json_error(&err);
            } else {
                eprintln!("{}", err.to_string().trim_end());
            }
            ExitCode::from(1)
        }
    }
}
