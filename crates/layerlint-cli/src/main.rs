//! layerlint CLI tool.
//!
//! Usage:
//! ```bash
//! layerlint check [OPTIONS] [PATH]
//! layerlint check-set <PATHS>...
//! layerlint list-rules
//! layerlint init
//! layerlint suggest <TERM> --kind verb
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use layerlint_core::SuggestKind;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod defaults;

/// Multi-layer rule checker for source text
#[derive(Parser)]
#[command(name = "layerlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a rule configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a file, or every file under a directory
    Check {
        /// Path to evaluate (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exit non-zero when any violation meets this severity
        #[arg(long, default_value = "minor")]
        fail_on: FailOn,
    },

    /// Evaluate an explicit file set, including cross-file rules
    CheckSet {
        /// Files to evaluate together
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exit non-zero when any violation meets this severity
        #[arg(long, default_value = "minor")]
        fail_on: FailOn,
    },

    /// List loaded rules
    ListRules,

    /// Initialize a starter configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Look up word substitutions
    Suggest {
        /// Term to look up
        term: String,

        /// Whether the term is a verb or a noun
        #[arg(long, default_value = "verb")]
        kind: Kind,
    },
}

/// Output format for results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

/// Severity threshold for failing the process.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FailOn {
    /// Fail on any violation.
    Info,
    /// Fail on minor or worse.
    Minor,
    /// Fail on major or worse.
    Major,
    /// Fail only on critical violations.
    Critical,
}

impl From<FailOn> for layerlint_core::Severity {
    fn from(value: FailOn) -> Self {
        match value {
            FailOn::Info => Self::Info,
            FailOn::Minor => Self::Minor,
            FailOn::Major => Self::Major,
            FailOn::Critical => Self::Critical,
        }
    }
}

/// Suggestion lookup kind.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Kind {
    /// Verb substitutions.
    Verb,
    /// Noun substitutions.
    Noun,
}

impl From<Kind> for SuggestKind {
    fn from(value: Kind) -> Self {
        match value {
            Kind::Verb => Self::Verb,
            Kind::Noun => Self::Noun,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            fail_on,
        } => commands::check::run(&path, format, fail_on, cli.config.as_deref()),
        Commands::CheckSet {
            paths,
            format,
            fail_on,
        } => commands::check_set::run(&paths, format, fail_on, cli.config.as_deref()),
        Commands::ListRules => {
            commands::list_rules::run(cli.config.as_deref());
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
        Commands::Suggest { term, kind } => {
            commands::suggest::run(&term, kind.into(), cli.config.as_deref());
            Ok(())
        }
    }
}
