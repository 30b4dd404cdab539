//! Recorded proof trees.

use serde::{Deserialize, Serialize};

use super::ids::NodeId;
use super::types::{ProofState, Text};

/// The tactic applied at a proof step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tactic {
    /// Tactic source text as written in the proof.
    pub text: Text,
    /// Identities of the hypotheses and goals the tactic referenced.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<Text>,
}

/// One step of a proof attempt.
///
/// Each node owns its children; the tree owns all nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProofTreeNode {
    /// Stable identity of the node.
    pub id: NodeId,
    /// Tactic applied at this step. Absent for a root that has not been
    /// acted on.
    #[serde(default)]
    pub tactic: Option<Tactic>,
    /// Proof state at this step, when it was recorded.
    #[serde(default)]
    pub state: Option<ProofState>,
    /// Steps that continue from this one.
    #[serde(default)]
    pub children: Vec<ProofTreeNode>,
}

/// A recorded proof tree for one tactic block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProofTree {
    /// The first step of the block.
    pub root: ProofTreeNode,
}

impl ProofTree {
    /// Iterates over all nodes in pre-order.
    #[must_use]
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: vec![&self.root],
        }
    }
}

/// Pre-order iterator over the nodes of a [`ProofTree`].
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    stack: Vec<&'a ProofTreeNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a ProofTreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
