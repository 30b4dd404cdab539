//! Corpus loading.
//!
//! A corpus is a JSON Lines stream with one file record per line. Records
//! that fail to parse surface as [`CorpusError::MalformedEntry`] items of
//! the [`CorpusReader`] iterator, and failures recorded by the exporter
//! deserialize to [`Loaded::Failed`] placeholders, so neither ever stops a
//! pass over the rest of the corpus.

mod error;
mod reader;
mod types;

pub use error::CorpusError;
pub use reader::{CorpusReader, parse_record};
pub use types::{ByBlock, FileRecord, Loaded, StoredError, Theorem};
