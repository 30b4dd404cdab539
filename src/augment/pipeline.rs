//! Composition of transformers into one augmentation pass.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::AugmentError;
use super::fresh::NameGenerator;
use super::probability::Probability;
use super::shuffle::shuffle;
use super::tags::rename_goal_tags_with;
use super::variables::rename_variables_in_state;
use crate::state::ProofState;

const AUGMENTATION_NAMES: &str = "rename-variables, rename-goal-tags, shuffle";

/// One transformer of a [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Augmentation {
    /// Consistent random renaming of hypotheses, goal by goal.
    #[serde(alias = "rename_variables")]
    RenameVariables,
    /// Random relabelling of goal tags across the state.
    #[serde(alias = "rename_goal_tags")]
    RenameGoalTags,
    /// All-or-nothing shuffle of goal and hypothesis order.
    Shuffle,
}

impl Augmentation {
    /// Every augmentation, in the default application order.
    pub const ALL: [Self; 3] = [Self::RenameVariables, Self::RenameGoalTags, Self::Shuffle];

    /// Returns the kebab-case name used in configuration and flags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RenameVariables => "rename-variables",
            Self::RenameGoalTags => "rename-goal-tags",
            Self::Shuffle => "shuffle",
        }
    }
}

impl fmt::Display for Augmentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Augmentation {
    type Err = AugmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s || a.as_str().replace('-', "_") == s)
            .ok_or_else(|| AugmentError::UnknownAugmentation {
                name: s.to_owned(),
                expected: AUGMENTATION_NAMES,
            })
    }
}

/// An ordered list of transformers applied to one proof state.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    steps: Vec<Augmentation>,
    names: NameGenerator,
    shuffle_probability: Probability,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Augmentation::ALL.to_vec())
    }
}

impl Pipeline {
    /// Default probability that [`Augmentation::Shuffle`] reorders a state.
    pub const DEFAULT_SHUFFLE_PROBABILITY: Probability = Probability(0.8);

    /// Creates a pipeline with default generator and shuffle settings.
    #[must_use]
    pub fn new(steps: Vec<Augmentation>) -> Self {
        Self {
            steps,
            names: NameGenerator::default(),
            shuffle_probability: Self::DEFAULT_SHUFFLE_PROBABILITY,
        }
    }

    /// Replaces the fresh-name generator.
    #[must_use]
    pub fn with_names(mut self, names: NameGenerator) -> Self {
        self.names = names;
        self
    }

    /// Replaces the shuffle gate probability.
    #[must_use]
    pub fn with_shuffle_probability(mut self, probability: Probability) -> Self {
        self.shuffle_probability = probability;
        self
    }

    /// The transformers, in application order.
    #[must_use]
    pub fn steps(&self) -> &[Augmentation] {
        &self.steps
    }

    /// Runs every step in order, feeding each the previous step's output.
    ///
    /// # Errors
    ///
    /// Fails with the first transformer error; no partial result is
    /// returned.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        state: &ProofState,
        rng: &mut R,
    ) -> Result<ProofState, AugmentError> {
        let mut current = state.clone();
        for step in &self.steps {
            current = match step {
                Augmentation::RenameVariables => {
                    rename_variables_in_state(&current, &self.names, rng)?
                }
                Augmentation::RenameGoalTags => rename_goal_tags_with(&current, &self.names, rng)?,
                Augmentation::Shuffle => shuffle(&current, rng, self.shuffle_probability),
            };
        }
        Ok(current)
    }
}
