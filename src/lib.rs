//! `leantree-augment`: structure-preserving randomized rewriting of
//! recorded proof trees.
//!
//! The crate reads proof-tree corpora recorded from a dependently-typed
//! proof assistant and produces varied copies of their proof states by
//! renaming hypotheses, relabelling goals and shuffling goal and
//! hypothesis order, without changing what the states mean.

/// Rewriting engine: token substitution, fresh names and transformers.
pub mod augment;
/// JSON Lines corpus loading with typed failure placeholders.
pub mod corpus;
/// Orchestration of augmentation passes over a corpus.
pub mod driver;
/// Proof-state data model and textual rendering.
pub mod state;
