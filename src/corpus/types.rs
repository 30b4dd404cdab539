//! Record types of the corpus format.
//!
//! One [`FileRecord`] per source file; each holds the file's theorems,
//! each theorem its tactic blocks, each block its recorded proof tree.
//! Any level may instead hold an `{"error": ...}` placeholder left by the
//! exporter when it failed on that item.

use serde::{Deserialize, Serialize};

use crate::state::de::recorded_path;
use crate::state::{ProofTree, Text};

/// A failure recorded by the exporter in place of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredError {
    /// The exporter's message.
    pub error: Text,
}

/// An item that was either exported or replaced by a recorded failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Loaded<T> {
    /// The exporter failed on this item.
    Failed(StoredError),
    /// The item itself.
    Ok(T),
}

impl<T> Loaded<T> {
    /// Returns the item, or `None` for a recorded failure.
    #[must_use]
    pub const fn ok(&self) -> Option<&T> {
        match self {
            Self::Ok(item) => Some(item),
            Self::Failed(_) => None,
        }
    }

    /// Returns `true` for a recorded failure.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// A source file with its theorems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileRecord {
    /// Path of the file within its library. Absent for standalone
    /// problems that do not belong to a library.
    #[serde(default, deserialize_with = "recorded_path")]
    pub path: Option<Text>,
    /// Theorems in source order.
    #[serde(default)]
    pub theorems: Vec<Loaded<Theorem>>,
}

impl FileRecord {
    /// Returns `true` if the file belongs to a library.
    #[must_use]
    pub const fn is_library(&self) -> bool {
        self.path.is_some()
    }
}

/// A theorem with its tactic blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Theorem {
    /// Declared name, when the theorem has one.
    #[serde(default)]
    pub name: Option<Text>,
    /// `by` blocks in source order.
    #[serde(default)]
    pub by_blocks: Vec<Loaded<ByBlock>>,
}

/// A tactic block and its recorded proof tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ByBlock {
    /// Recorded tree. Absent when the block was not replayed.
    #[serde(default)]
    pub tree: Option<Loaded<ProofTree>>,
}
