//! Hypotheses, goals and proof states.

use std::collections::HashSet;
use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::de::non_empty_text;
use super::ids::{FVarId, MVarId};

/// Shared, immutable text of a name or an expression.
pub type Text = Arc<str>;

// ── Hypothesis ──────────────────────────────────────────────────────

/// A named, typed assumption in a goal's local context.
///
/// `ty` and `value` are expression text in the prover's surface syntax.
/// They are treated as opaque strings; only identifier-token boundaries
/// are ever inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hypothesis {
    /// Stable identity, never rewritten.
    #[serde(rename = "fvar_id")]
    pub id: FVarId,
    /// Surface name shown to a reader.
    pub user_name: Text,
    /// Type of the hypothesis.
    #[serde(rename = "type")]
    pub ty: Text,
    /// Body of a `let`-bound hypothesis, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Text>,
}

impl Hypothesis {
    /// Creates a hypothesis without a value.
    pub fn new(id: FVarId, user_name: impl Into<Text>, ty: impl Into<Text>) -> Self {
        Self {
            id,
            user_name: user_name.into(),
            ty: ty.into(),
            value: None,
        }
    }

    /// Replaces the value text.
    #[must_use]
    pub fn with_value(self, value: Option<Text>) -> Self {
        Self { value, ..self }
    }
}

// ── Goal ────────────────────────────────────────────────────────────

/// One open proof obligation: a type to inhabit under named hypotheses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Goal {
    /// Stable identity, never rewritten.
    #[serde(rename = "mvar_id")]
    pub id: MVarId,
    /// Optional human-facing label (`case` name). An empty tag in input
    /// data is read as absent.
    #[serde(
        default,
        deserialize_with = "non_empty_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub tag: Option<Text>,
    /// The target type.
    #[serde(rename = "type")]
    pub ty: Text,
    /// Local context, in prover order.
    #[serde(default)]
    pub hypotheses: Vector<Hypothesis>,
}

impl Goal {
    /// Creates an untagged goal with an empty context.
    pub fn new(id: MVarId, ty: impl Into<Text>) -> Self {
        Self {
            id,
            tag: None,
            ty: ty.into(),
            hypotheses: Vector::new(),
        }
    }

    /// Replaces the tag.
    #[must_use]
    pub fn with_tag(self, tag: Option<Text>) -> Self {
        Self { tag, ..self }
    }

    /// Replaces the target type.
    #[must_use]
    pub fn with_type(self, ty: Text) -> Self {
        Self { ty, ..self }
    }

    /// Replaces the whole local context.
    #[must_use]
    pub fn with_hypotheses(self, hypotheses: Vector<Hypothesis>) -> Self {
        Self { hypotheses, ..self }
    }

    /// Appends one hypothesis to the local context.
    #[must_use]
    pub fn with_hypothesis(mut self, hypothesis: Hypothesis) -> Self {
        self.hypotheses.push_back(hypothesis);
        self
    }

    /// Returns the tag, treating an empty tag as absent.
    #[must_use]
    pub fn tag_str(&self) -> Option<&str> {
        self.tag.as_deref().filter(|t| !t.is_empty())
    }

    /// Iterates over the surface names of the local context.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hypotheses.iter().map(|h| &*h.user_name)
    }

    /// Returns the first name that is visible twice in this goal.
    ///
    /// Hypothesis names and the tag must be pairwise distinct. Empty names
    /// are anonymous and never clash.
    #[must_use]
    pub fn first_shadowed_name(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.names()
            .chain(self.tag_str())
            .filter(|name| !name.is_empty())
            .find(|name| !seen.insert(*name))
    }

    /// Returns `true` if `name` is visible more than once in this goal.
    #[must_use]
    pub fn is_shadowed(&self, name: &str) -> bool {
        !name.is_empty()
            && self
                .names()
                .chain(self.tag_str())
                .filter(|visible| *visible == name)
                .nth(1)
                .is_some()
    }
}

// ── ProofState ──────────────────────────────────────────────────────

/// All goals open at one point of a proof.
///
/// The order of `goals` carries no logical meaning but is preserved by
/// every transformer except the shuffler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProofState {
    /// The open goals.
    pub goals: Vector<Goal>,
}

impl ProofState {
    /// Creates a state from its goals.
    pub fn new(goals: impl IntoIterator<Item = Goal>) -> Self {
        Self {
            goals: goals.into_iter().collect(),
        }
    }

    /// Number of open goals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Returns `true` when the proof is complete.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}

impl FromIterator<Goal> for ProofState {
    fn from_iter<I: IntoIterator<Item = Goal>>(iter: I) -> Self {
        Self::new(iter)
    }
}
