//! Error types for augmentation passes.

use crate::corpus::CorpusError;

/// Errors that end an augmentation pass.
///
/// Per-entry and per-node failures are never reported this way; they are
/// counted in the [`DriverReport`](super::DriverReport) and the pass moves
/// on.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {error}")]
    ConfigIo {
        /// Path of the configuration file.
        path: String,
        /// Underlying I/O failure.
        #[source]
        error: std::io::Error,
    },

    /// The configuration is malformed or inconsistent.
    #[error("invalid config: {reason}")]
    Config {
        /// A human-readable explanation of the problem.
        reason: String,
    },

    /// The corpus stream failed as a whole.
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// An output record could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// An output record could not be serialized.
    #[error("failed to serialize output record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The interrupt handler could not be installed.
    #[error("failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    /// A worker thread panicked or poisoned shared state.
    #[error("an augmentation worker panicked")]
    WorkerPanicked,
}
