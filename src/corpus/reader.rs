//! Streaming JSON Lines reader.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use camino::Utf8Path;
use serde::Deserialize;

use super::error::CorpusError;
use super::types::FileRecord;

/// Synthetic source identifier used by [`parse_record`].
const INLINE_SOURCE: &str = "<inline>";

/// Parses a single corpus record.
///
/// # Errors
///
/// Returns [`CorpusError::MalformedEntry`] if `input` is not a valid
/// file record.
///
/// # Examples
///
///     use leantree_augment::corpus::parse_record;
///
///     let line = r#"{"path": "Mathlib/Logic/Basic.lean", "theorems": []}"#;
///     let record = parse_record(line).unwrap();
///     assert!(record.is_library());
pub fn parse_record(input: &str) -> Result<FileRecord, CorpusError> {
    parse_record_at(INLINE_SOURCE, 1, input)
}

/// Proof trees nest one JSON object per tactic step, so long proofs run
/// far past the parser's default depth. The recursion limit is lifted and
/// the stack grows on demand instead.
fn parse_record_at(origin: &str, line: usize, input: &str) -> Result<FileRecord, CorpusError> {
    let malformed = |error: serde_json::Error| CorpusError::MalformedEntry {
        origin: origin.to_owned(),
        line,
        reason: error.to_string(),
    };
    let mut json = serde_json::Deserializer::from_str(input);
    json.disable_recursion_limit();
    let record = FileRecord::deserialize(serde_stacker::Deserializer::new(&mut json))
        .map_err(malformed)?;
    json.end().map_err(malformed)?;
    Ok(record)
}

/// Iterates over the records of a JSON Lines corpus.
///
/// Blank lines are skipped. A malformed line yields
/// [`CorpusError::MalformedEntry`] and reading continues with the next
/// line; an I/O failure yields [`CorpusError::Io`] and ends the stream.
#[derive(Debug)]
pub struct CorpusReader<R> {
    origin: String,
    lines: io::Lines<R>,
    line: usize,
    finished: bool,
}

impl CorpusReader<BufReader<File>> {
    /// Opens a corpus file.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::Io`] if the file cannot be opened.
    pub fn open(path: &Utf8Path) -> Result<Self, CorpusError> {
        let file = File::open(path).map_err(|error| CorpusError::Io {
            origin: path.to_string(),
            error,
        })?;
        Ok(Self::new(path.as_str(), BufReader::new(file)))
    }
}

impl<R: BufRead> CorpusReader<R> {
    /// Wraps a buffered reader; `origin` names it in errors.
    pub fn new(origin: impl Into<String>, reader: R) -> Self {
        Self {
            origin: origin.into(),
            lines: reader.lines(),
            line: 0,
            finished: false,
        }
    }

    /// The source identifier used in errors.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl<R: BufRead> Iterator for CorpusReader<R> {
    type Item = Result<FileRecord, CorpusError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let next = self.lines.next()?;
            self.line += 1;
            let text = match next {
                Ok(text) => text,
                Err(error) if error.kind() == io::ErrorKind::InvalidData => {
                    return Some(Err(CorpusError::MalformedEntry {
                        origin: self.origin.clone(),
                        line: self.line,
                        reason: error.to_string(),
                    }));
                }
                Err(error) => {
                    self.finished = true;
                    return Some(Err(CorpusError::Io {
                        origin: self.origin.clone(),
                        error,
                    }));
                }
            };
            if text.trim().is_empty() {
                continue;
            }
            return Some(parse_record_at(&self.origin, self.line, &text));
        }
        None
    }
}
