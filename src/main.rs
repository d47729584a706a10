//! featuredoc — render Gherkin `.feature` files as static documentation.
//!
//! - `featuredoc build` (default): write the listing and detail pages
//! - `featuredoc check`: parse everything, write nothing, fail on bad files

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use featuredoc::config::Config;
use featuredoc::loader::SkippedFile;
use featuredoc::site;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "featuredoc",
    about = "Generate living documentation pages from Gherkin feature files",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file (default: ./featuredoc.yaml if present)
    #[arg(short = 'c', long, global = true, env = "FEATUREDOC_CONFIG")]
    config: Option<PathBuf>,

    /// Directory containing .feature files (not searched recursively)
    #[arg(short = 'i', long, global = true, env = "FEATUREDOC_INPUT")]
    input: Option<PathBuf>,

    /// Output directory for the generated site
    #[arg(short = 'o', long, global = true, env = "FEATUREDOC_OUTPUT")]
    output: Option<PathBuf>,

    /// Output format: html (default), markdown, json
    #[arg(short = 'f', long, global = true, env = "FEATUREDOC_FORMAT")]
    format: Option<String>,

    /// Route of the listing page, e.g. "features" or "docs/features"
    #[arg(long, global = true, env = "FEATUREDOC_ROUTE")]
    route: Option<String>,

    /// Heading of the listing page
    #[arg(long, global = true, env = "FEATUREDOC_TITLE")]
    title: Option<String>,

    /// Skip files whose name matches this glob. Can be given multiple times.
    #[arg(long, global = true)]
    exclude: Vec<String>,

    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Generate the documentation site
    Build,
    /// Parse all feature files without writing output
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    // RUST_LOG replaces the default level entirely when it is set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&cli)?;

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => build(&config),
        Command::Check => check(&config),
    }
}

/// Config file first, then flags and env vars on top.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    let mut config = Config::discover(cli.config.as_deref(), &cwd)?;

    if let Some(ref input) = cli.input {
        config.input = input.clone();
    }
    if let Some(ref output) = cli.output {
        config.output = output.clone();
    }
    if let Some(ref format) = cli.format {
        config.format = format.clone();
    }
    if let Some(ref route) = cli.route {
        config.route = route.clone();
    }
    if let Some(ref title) = cli.title {
        config.title = title.clone();
    }
    config.exclude.extend(cli.exclude.iter().cloned());

    config.validate().map_err(anyhow::Error::msg)?;
    Ok(config)
}

fn build(config: &Config) -> Result<()> {
    let report = site::build(config)?;
    print_skipped(&report.skipped);
    println!(
        "wrote {} page(s) for {} feature(s) to {}",
        report.pages_written.len(),
        report.features.len(),
        config.output.join(config.route_dir()).display()
    );
    Ok(())
}

fn check(config: &Config) -> Result<()> {
    let (documents, skipped) = site::collect(config)?;
    print_skipped(&skipped);
    if !skipped.is_empty() {
        bail!("{} of {} feature file(s) failed", skipped.len(), skipped.len() + documents.len());
    }
    println!("{} feature file(s) ok", documents.len());
    Ok(())
}

fn print_skipped(skipped: &[SkippedFile]) {
    for file in skipped {
        eprintln!("skipped {}: {}", file.path.display(), file.reason);
    }
}
