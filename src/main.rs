use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use shapematch::cli::{collect_cases, dispatch_cases, read_subject};
use shapematch::config::{CliConfig, MatchConfig};
use shapematch::pattern_cache::PatternCache;
use shapematch::PatternParser;

/// ShapeMatch - run ordered shape cases against a JSON subject
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON subject file, or `-` for stdin. Without it the subject is absent
    #[arg(long)]
    subject: Option<PathBuf>,

    /// Case pattern, e.g. '{a: _, b: {c: _}}'. Repeatable; tried in order
    #[arg(long = "case")]
    cases: Vec<String>,

    /// YAML list of case patterns, tried after the --case ones
    #[arg(long)]
    cases_file: Option<PathBuf>,

    /// YAML configuration file (otherwise SHAPEMATCH_* environment variables)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Identifier used as the presence marker in patterns
    #[arg(long)]
    marker: Option<String>,

    /// Maximum nesting depth of a pattern
    #[arg(long)]
    max_depth: Option<usize>,

    /// Disable the parsed-pattern cache
    #[arg(long)]
    no_cache: bool,
}

impl From<&Cli> for CliConfig {
    fn from(cli: &Cli) -> Self {
        CliConfig {
            config_file: cli.config.clone(),
            marker: cli.marker.clone(),
            max_depth: cli.max_depth,
            no_cache: cli.no_cache,
        }
    }
}

fn main() {
    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let config = MatchConfig::from_cli(CliConfig::from(&cli)).context("configuration")?;
    log::debug!("Using configuration: {:?}", config);

    let subject = match &cli.subject {
        Some(path) => Some(read_subject(path)?),
        None => None,
    };

    let cases = collect_cases(cli.cases, cli.cases_file.as_deref())?;

    let parser = PatternParser::new(config.parser_config());
    let cache = PatternCache::new(config.cache_config());

    log::info!("Dispatching {} case(s)", cases.len());
    let output = dispatch_cases(subject.as_ref(), &cases, &parser, &cache)?;
    log::debug!("Pattern cache: {:?}", cache.metrics());

    Ok(serde_json::to_string_pretty(&output)?)
}
