//! Augmentation passes over a corpus.
//!
//! A [`Driver`] pulls file records from a corpus iterator, walks every
//! recorded proof tree in pre-order and runs the configured
//! [`Pipeline`] on each recorded state. The corpus is only read; each
//! rewritten state is handed to a [`RecordSink`] together with the state
//! it came from.
//!
//! Records are distributed over `jobs` worker threads, but every record
//! is processed by exactly one worker with its own random source, seeded
//! from the base seed and the record's position. Output for a given seed
//! is therefore the same whatever the number of workers; only the order
//! in which records reach the sink may vary.
//!
//! A sample limit is claimed in corpus order, so a limited pass always
//! runs on a single worker.

mod config;
mod error;
mod report;
mod sink;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, warn};

pub use config::DriverConfig;
pub use error::DriverError;
pub use report::DriverReport;
pub use sink::{AugmentedRecord, JsonLinesSink, LogSink, RecordSink};

use crate::augment::Pipeline;
use crate::corpus::{CorpusError, FileRecord, Loaded};
use crate::state::{ProofTree, Text};

/// Runs augmentation passes.
#[derive(Debug)]
pub struct Driver {
    config: DriverConfig,
    pipeline: Pipeline,
    base_seed: u64,
    stop: Arc<AtomicBool>,
}

/// State shared by the workers of one pass.
struct Shared<'a, I, S> {
    corpus: Mutex<std::iter::Enumerate<I>>,
    sink: Mutex<&'a mut S>,
    samples: AtomicUsize,
    halt: AtomicBool,
}

/// Where in the corpus a tree came from.
struct Origin<'r> {
    entry: usize,
    record: &'r FileRecord,
    theorem: Option<&'r Text>,
}

impl Driver {
    /// Creates a driver for one configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Config`] if the configuration is invalid.
    pub fn new(config: DriverConfig) -> Result<Self, DriverError> {
        config.validate()?;
        let base_seed = config
            .seed
            .unwrap_or_else(|| rand::thread_rng().next_u64());
        Ok(Self {
            pipeline: config.pipeline(),
            config,
            base_seed,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The configuration of this driver.
    #[must_use]
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// The base seed all per-record random sources derive from.
    #[must_use]
    pub const fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Flag that stops the pass before the next node when set.
    #[must_use]
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Sets the stop flag on Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Signal`] if a handler is already installed
    /// or cannot be registered.
    pub fn stop_on_interrupt(&self) -> Result<(), DriverError> {
        let stop = self.stop_flag();
        ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst))?;
        Ok(())
    }

    /// Augments every recorded state in `corpus` and emits the results to
    /// `sink`.
    ///
    /// Malformed records, recorded failures and nodes whose rewrite fails
    /// are counted and skipped. The pass ends early when the stop flag is
    /// set or the sample limit is reached.
    ///
    /// # Errors
    ///
    /// Returns a [`DriverError`] if the corpus stream fails as a whole,
    /// the sink rejects a record or a worker panics.
    pub fn run<I, S>(&self, corpus: I, sink: &mut S) -> Result<DriverReport, DriverError>
    where
        I: Iterator<Item = Result<FileRecord, CorpusError>> + Send,
        S: RecordSink + Send,
    {
        let shared = Shared {
            corpus: Mutex::new(corpus.enumerate()),
            sink: Mutex::new(sink),
            samples: AtomicUsize::new(0),
            halt: AtomicBool::new(false),
        };

        let jobs = self.worker_count();
        let reports = thread::scope(|scope| {
            let workers: Vec<_> = (0..jobs)
                .map(|_| scope.spawn(|| self.worker(&shared)))
                .collect();
            workers
                .into_iter()
                .map(|worker| {
                    worker
                        .join()
                        .map_err(|_| DriverError::WorkerPanicked)
                        .and_then(|outcome| outcome)
                })
                .collect::<Vec<_>>()
        });

        let mut total = DriverReport::default();
        let mut first_error = None;
        for outcome in reports {
            match outcome {
                Ok(report) => total.merge(&report),
                Err(error) => {
                    first_error.get_or_insert(error);
                }
            }
        }
        if let Some(error) = first_error {
            return Err(error);
        }

        shared
            .sink
            .into_inner()
            .map_err(|_| DriverError::WorkerPanicked)?
            .finish()?;
        total.interrupted = self.stop.load(Ordering::SeqCst);
        total.log_summary();
        Ok(total)
    }

    fn worker_count(&self) -> usize {
        let jobs = self.config.jobs.get();
        if jobs > 1 && self.config.max_samples.is_some() {
            debug!(jobs, "sample limit set; running on one worker");
            return 1;
        }
        jobs
    }

    fn worker<I, S>(&self, shared: &Shared<'_, I, S>) -> Result<DriverReport, DriverError>
    where
        I: Iterator<Item = Result<FileRecord, CorpusError>>,
        S: RecordSink,
    {
        let mut report = DriverReport::default();
        let result = self.drain(shared, &mut report);
        if result.is_err() {
            shared.halt.store(true, Ordering::SeqCst);
        }
        result.map(|()| report)
    }

    fn drain<I, S>(
        &self,
        shared: &Shared<'_, I, S>,
        report: &mut DriverReport,
    ) -> Result<(), DriverError>
    where
        I: Iterator<Item = Result<FileRecord, CorpusError>>,
        S: RecordSink,
    {
        while !self.should_stop(shared) {
            let next = shared
                .corpus
                .lock()
                .map_err(|_| DriverError::WorkerPanicked)?
                .next();
            let Some((entry, item)) = next else {
                break;
            };
            report.entries += 1;
            let record = match item {
                Ok(record) => record,
                Err(error) if error.is_entry_local() => {
                    warn!(%error, "skipping malformed corpus entry");
                    report.malformed_entries += 1;
                    continue;
                }
                Err(error) => return Err(error.into()),
            };
            if self.config.library_only && !record.is_library() {
                report.filtered_entries += 1;
                continue;
            }
            let mut rng = entry_rng(self.base_seed, entry);
            self.augment_record(shared, entry, &record, &mut rng, report)?;
        }
        Ok(())
    }

    fn augment_record<I, S>(
        &self,
        shared: &Shared<'_, I, S>,
        entry: usize,
        record: &FileRecord,
        rng: &mut StdRng,
        report: &mut DriverReport,
    ) -> Result<(), DriverError>
    where
        S: RecordSink,
    {
        for item in &record.theorems {
            let Loaded::Ok(theorem) = item else {
                report.skipped_placeholders += 1;
                continue;
            };
            for loaded in &theorem.by_blocks {
                let tree = match loaded {
                    Loaded::Ok(block) => match &block.tree {
                        Some(Loaded::Ok(tree)) => tree,
                        Some(Loaded::Failed(_)) => {
                            report.skipped_placeholders += 1;
                            continue;
                        }
                        None => continue,
                    },
                    Loaded::Failed(_) => {
                        report.skipped_placeholders += 1;
                        continue;
                    }
                };
                let origin = Origin {
                    entry,
                    record,
                    theorem: theorem.name.as_ref(),
                };
                if !self.augment_tree(shared, &origin, tree, rng, report)? {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    /// Returns `false` once the pass should end.
    fn augment_tree<I, S>(
        &self,
        shared: &Shared<'_, I, S>,
        origin: &Origin<'_>,
        tree: &ProofTree,
        rng: &mut StdRng,
        report: &mut DriverReport,
    ) -> Result<bool, DriverError>
    where
        S: RecordSink,
    {
        let limit = self.config.max_nodes_per_tree.unwrap_or(usize::MAX);
        for node in tree.nodes().take(limit) {
            if self.should_stop(shared) {
                return Ok(false);
            }
            report.nodes_visited += 1;
            let Some(before) = &node.state else {
                report.nodes_without_state += 1;
                continue;
            };
            match self.pipeline.apply(before, rng) {
                Ok(after) => {
                    if !self.reserve_sample(shared) {
                        return Ok(false);
                    }
                    debug!(entry = origin.entry, node = %node.id, "augmented node");
                    report.nodes_augmented += 1;
                    let augmented = AugmentedRecord {
                        entry: origin.entry,
                        path: origin.record.path.clone(),
                        theorem: origin.theorem.cloned(),
                        node: node.id.clone(),
                        tactic: node.tactic.as_ref().map(|t| Text::clone(&t.text)),
                        before: before.clone(),
                        after,
                    };
                    shared
                        .sink
                        .lock()
                        .map_err(|_| DriverError::WorkerPanicked)?
                        .emit(&augmented)?;
                }
                Err(error) => {
                    warn!(
                        entry = origin.entry,
                        node = %node.id,
                        %error,
                        "augmentation failed; node skipped"
                    );
                    report.nodes_failed += 1;
                }
            }
        }
        Ok(true)
    }

    fn should_stop<I, S>(&self, shared: &Shared<'_, I, S>) -> bool {
        self.stop.load(Ordering::SeqCst)
            || shared.halt.load(Ordering::SeqCst)
            || self
                .config
                .max_samples
                .is_some_and(|max| shared.samples.load(Ordering::SeqCst) >= max)
    }

    /// Claims one slot of the sample budget for a finished rewrite.
    fn reserve_sample<I, S>(&self, shared: &Shared<'_, I, S>) -> bool {
        let max = self.config.max_samples.unwrap_or(usize::MAX);
        shared
            .samples
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |taken| {
                (taken < max).then_some(taken + 1)
            })
            .is_ok()
    }
}

/// Derives the random source of one corpus record.
fn entry_rng(base_seed: u64, entry: usize) -> StdRng {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"leantree-augment/entry");
    hasher.update(base_seed.to_string().as_bytes());
    hasher.update(b"/");
    hasher.update(entry.to_string().as_bytes());
    StdRng::from_seed(*hasher.finalize().as_bytes())
}
