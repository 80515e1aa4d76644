mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use labflag_core::{classify_traced, run_batch, BatchConfig, Classifier, LabTable};

use cli::{ClassifyArgs, Cli, Command, OutputFormat, RunArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Run(args) => run(args),
        Command::Classify(args) => classify(args),
        Command::Rules => rules(),
    }
}

/// Logs go to stderr so stdout only carries results.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "labflag=debug,labflag_core=debug"
    } else {
        "labflag=info,labflag_core=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => BatchConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BatchConfig::default(),
    };
    if let Some(samples) = args.samples {
        config = config.with_sample_limit(samples);
    }
    debug!(?config, "batch configuration");

    let mut table = LabTable::from_path(&args.input)
        .with_context(|| format!("Failed to read table {}", args.input.display()))?;
    info!(rows = table.len(), "processing records");

    let report = run_batch(&mut table, &config)?;

    if args.dry_run {
        info!("dry run, table not written");
    } else {
        let target = args.output.as_ref().unwrap_or(&args.input);
        table
            .write_path(target)
            .with_context(|| format!("Failed to write table {}", target.display()))?;
        info!(path = %target.display(), "table saved");
    }

    match args.format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&report)?),
    }

    Ok(())
}

fn classify(args: ClassifyArgs) -> Result<()> {
    let verdict = classify_traced(Some(&args.result), &args.test_name);

    match args.format {
        OutputFormat::Text if args.explain => {
            println!("{} ({})", verdict.outcome, verdict.rule)
        }
        OutputFormat::Text => println!("{}", verdict.outcome),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&verdict)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&verdict)?),
    }

    Ok(())
}

fn rules() -> Result<()> {
    let classifier = Classifier::new();
    for (position, rule) in classifier.rules().enumerate() {
        println!("{:>2}. {:<18} {}", position + 1, rule.kind(), rule.describe());
    }
    Ok(())
}
