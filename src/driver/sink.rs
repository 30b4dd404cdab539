//! Destinations for augmented records.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::DriverError;
use crate::state::{NodeId, ProofState, Text};

/// One augmented proof-tree node, as emitted by a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AugmentedRecord {
    /// 0-indexed position of the file record in the corpus.
    pub entry: usize,
    /// Library path of the file record.
    pub path: Option<Text>,
    /// Name of the theorem the node belongs to.
    pub theorem: Option<Text>,
    /// Identity of the node.
    pub node: NodeId,
    /// Text of the tactic applied at the node.
    pub tactic: Option<Text>,
    /// The recorded state.
    pub before: ProofState,
    /// The rewritten state.
    pub after: ProofState,
}

/// Receives augmented records from a pass.
pub trait RecordSink {
    /// Accepts one record.
    ///
    /// # Errors
    ///
    /// Returns a [`DriverError`] if the record cannot be stored; the pass
    /// stops.
    fn emit(&mut self, record: &AugmentedRecord) -> Result<(), DriverError>;

    /// Flushes buffered records at the end of a pass.
    ///
    /// # Errors
    ///
    /// Returns a [`DriverError`] if buffered records cannot be stored.
    fn finish(&mut self) -> Result<(), DriverError> {
        Ok(())
    }
}

/// Writes one JSON object per record, newline-terminated.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wraps a writer.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the inner writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn emit(&mut self, record: &AugmentedRecord) -> Result<(), DriverError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), DriverError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Logs a before/after rendering of each record instead of storing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl RecordSink for LogSink {
    fn emit(&mut self, record: &AugmentedRecord) -> Result<(), DriverError> {
        info!(
            entry = record.entry,
            node = %record.node,
            tactic = record.tactic.as_deref().unwrap_or("<none>"),
            "augmented node\nBEFORE:\n{}\n\nAFTER:\n{}",
            record.before,
            record.after,
        );
        Ok(())
    }
}

impl RecordSink for Vec<AugmentedRecord> {
    fn emit(&mut self, record: &AugmentedRecord) -> Result<(), DriverError> {
        self.push(record.clone());
        Ok(())
    }
}
