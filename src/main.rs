//! Command-line entry point for corpus augmentation passes.

use std::fs::File;
use std::io::{self, BufWriter};
use std::num::NonZeroUsize;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use leantree_augment::augment::{Augmentation, Probability};
use leantree_augment::corpus::CorpusReader;
use leantree_augment::driver::{
    Driver, DriverConfig, DriverError, DriverReport, JsonLinesSink, LogSink, RecordSink,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Writes randomized, meaning-preserving variants of recorded proof states.
#[derive(Debug, Parser)]
#[command(name = "leantree-augment", version)]
struct Cli {
    /// JSON Lines corpus of recorded proof trees.
    corpus: Utf8PathBuf,

    /// YAML configuration file; flags override its values.
    #[arg(short, long)]
    config: Option<Utf8PathBuf>,

    /// Output file for augmented records (standard output when omitted).
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// Base seed for reproducible passes.
    #[arg(long)]
    seed: Option<u64>,

    /// Comma-separated transformers, in application order.
    #[arg(long, value_delimiter = ',')]
    augment: Option<Vec<Augmentation>>,

    /// Probability that a state is shuffled.
    #[arg(long)]
    shuffle_probability: Option<Probability>,

    /// Visit at most this many nodes of each tree.
    #[arg(long)]
    max_nodes_per_tree: Option<usize>,

    /// Stop after this many augmented nodes.
    #[arg(long)]
    max_samples: Option<usize>,

    /// Skip records that do not belong to a library.
    #[arg(long)]
    library_only: bool,

    /// Number of worker threads.
    #[arg(short, long)]
    jobs: Option<NonZeroUsize>,

    /// Log before/after renderings instead of writing records.
    #[arg(long)]
    dry_run: bool,

    /// Raise log verbosity (`-v` debug, `-vv` trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> Result<DriverConfig, DriverError> {
        let mut config = match &self.config {
            Some(path) => DriverConfig::load(path)?,
            None => DriverConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(steps) = &self.augment {
            config.augmentations.clone_from(steps);
        }
        if let Some(probability) = self.shuffle_probability {
            config.shuffle_probability = probability;
        }
        if let Some(limit) = self.max_nodes_per_tree {
            config.max_nodes_per_tree = Some(limit);
        }
        if let Some(limit) = self.max_samples {
            config.max_samples = Some(limit);
        }
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        config.library_only |= self.library_only;
        config.dry_run |= self.dry_run;
        Ok(config)
    }

    const fn default_directive(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(report) if report.interrupted => {
            info!("pass interrupted; output is partial");
            ExitCode::from(130)
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "augmentation pass failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<DriverReport, DriverError> {
    let config = cli.config()?;
    let driver = Driver::new(config)?;
    driver.stop_on_interrupt()?;
    info!(seed = driver.base_seed(), corpus = %cli.corpus, "starting augmentation pass");

    let corpus = CorpusReader::open(&cli.corpus)?;
    if driver.config().dry_run {
        return driver.run(corpus, &mut LogSink);
    }
    match &cli.output {
        Some(path) => {
            let file = File::create(path)?;
            execute(&driver, corpus, JsonLinesSink::new(BufWriter::new(file)))
        }
        None => execute(&driver, corpus, JsonLinesSink::new(BufWriter::new(io::stdout()))),
    }
}

fn execute<S: RecordSink + Send>(
    driver: &Driver,
    corpus: CorpusReader<io::BufReader<File>>,
    mut sink: S,
) -> Result<DriverReport, DriverError> {
    driver.run(corpus, &mut sink)
}
