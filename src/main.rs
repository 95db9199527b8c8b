use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use typoscan::cascade::cache::{CacheOracle, CacheStore};
use typoscan::cascade::remote::RemoteSpellerOracle;
use typoscan::cascade::vocabulary::{self, VocabularyOracle};
use typoscan::cascade::{Cascade, Oracle};
use typoscan::cli::output::{self, OutputFormat};
use typoscan::config::{Config, Overrides};
use typoscan::extract::{Extractor, WalkOptions};
use typoscan::normalize::{self, NormalizeOptions, Script};

#[derive(Parser, Debug)]
#[command(name = "typoscan")]
#[command(version, about = "Lint natural-language text embedded in source trees", long_about = None)]
struct Cli {
    /// Directory or file to scan
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Allow-list of known-correct words
    #[arg(long)]
    vocabulary: Option<PathBuf>,

    /// Cache of previously resolved words
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Words per spelling-service request
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Shortest candidate word to check
    #[arg(long)]
    min_word_length: Option<usize>,

    /// Only check words written in this alphabet
    #[arg(long, value_enum)]
    script: Option<Script>,

    /// Glob pattern to leave out of the scan (repeatable)
    #[arg(long)]
    exclude: Vec<String>,

    /// Also scan hidden files and directories
    #[arg(long)]
    process_hidden: bool,

    /// Extraction worker threads (default: all cores)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Sort the vocabulary file after the run
    #[arg(long)]
    reorder_vocabulary: bool,

    /// Exit with code 0 even if typos are found
    #[arg(long)]
    exit_zero: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "typoscan", &mut io::stdout());
        return Ok(());
    }

    init_tracing(cli.verbose);

    let Some(path) = cli.path else {
        anyhow::bail!("No path specified. Use --help for usage information.");
    };
    if !path.exists() {
        anyhow::bail!("Path not found: {}", path.display());
    }

    let config = Config::load(Overrides {
        vocabulary_path: cli.vocabulary,
        cache_path: cli.cache,
        chunk_size: cli.chunk_size,
        min_word_length: cli.min_word_length,
        script: cli.script,
        exclude: cli.exclude,
        process_hidden: cli.process_hidden,
        jobs: cli.jobs,
    })?;
    debug!(?config, "starting scan");

    // Upstream stage: raw strings out of the tree, merged across workers.
    let extractor = Extractor::new(config.jobs)?;
    let raw_strings = extractor.collect_strings(
        &path,
        &WalkOptions {
            exclude: config.exclude.clone(),
            process_hidden: config.process_hidden,
        },
    )?;

    let candidates = normalize::normalize(
        &raw_strings,
        &NormalizeOptions {
            min_word_length: config.min_word_length,
            script: config.script,
            split_identifiers: true,
        },
    );
    let mut words: Vec<String> = candidates.into_iter().collect();
    words.sort();
    debug!(candidates = words.len(), "candidate words normalized");

    let store = Arc::new(CacheStore::open(config.cache_path.as_deref())?);
    let oracles: Vec<Box<dyn Oracle>> = vec![
        Box::new(VocabularyOracle::load(&config)?),
        Box::new(CacheOracle::new(Arc::clone(&store))),
        Box::new(RemoteSpellerOracle::new(&config, Arc::clone(&store))?),
    ];
    let report = Cascade::new(oracles, config.chunk_size).run(&words)?;

    if cli.reorder_vocabulary {
        if let Some(vocabulary_path) = &config.vocabulary_path {
            if vocabulary_path.exists() {
                vocabulary::reorder(vocabulary_path)?;
            }
        }
    }

    output::print_report(&report, !cli.no_color, &cli.format);
    output::print_summary(&report, !cli.no_color);

    if !report.typos.is_empty() && !cli.exit_zero {
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
