//! Proof-state data model.
//!
//! Snapshots recorded from the prover: hypotheses, goals, proof states and
//! the proof trees that pair each applied tactic with the state it left
//! behind. All values are immutable snapshots; text is held in `Arc<str>`
//! and sequences in persistent `im::Vector`s so that rewritten copies share
//! every part they did not change.

pub(crate) mod de;
mod ids;
mod render;
mod tree;
mod types;

pub use ids::{FVarId, MVarId, NodeId};
pub use tree::{Nodes, ProofTree, ProofTreeNode, Tactic};
pub use types::{Goal, Hypothesis, ProofState, Text};
