//! Error types for corpus loading.

/// Errors that can occur while reading a corpus.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// A record could not be deserialized. Only that record is lost.
    #[error("malformed corpus entry at {origin}:{line}: {reason}")]
    MalformedEntry {
        /// Corpus file or source identifier.
        origin: String,
        /// 1-indexed line of the record.
        line: usize,
        /// Deserializer message.
        reason: String,
    },

    /// The corpus could not be opened or read.
    #[error("failed to read corpus {origin}: {error}")]
    Io {
        /// Corpus file or source identifier.
        origin: String,
        /// Underlying I/O failure.
        #[source]
        error: std::io::Error,
    },
}

impl CorpusError {
    /// Returns `true` for errors confined to a single record.
    #[must_use]
    pub const fn is_entry_local(&self) -> bool {
        matches!(self, Self::MalformedEntry { .. })
    }
}
