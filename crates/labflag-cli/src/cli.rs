//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Classify free-text laboratory results as below normal, normal or above normal
#[derive(Parser)]
#[command(name = "labflag")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify every row of a CSV table and write the outcome column
    Run(RunArgs),
    /// Classify a single result
    Classify(ClassifyArgs),
    /// List the rules in evaluation order
    Rules,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Input CSV with result and test name columns
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the classified table (default: overwrite INPUT)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Batch configuration file (YAML or JSON)
    #[arg(short, long, value_name = "PATH", env = "LABFLAG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Example rows to show per outcome (overrides config)
    #[arg(long, value_name = "N")]
    pub samples: Option<usize>,

    /// Classify and report without writing the table
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args)]
pub struct ClassifyArgs {
    /// Raw result text
    #[arg(allow_hyphen_values = true)]
    pub result: String,

    /// Test name the result belongs to
    pub test_name: String,

    /// Also print the rule that decided the outcome
    #[arg(long)]
    pub explain: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}
