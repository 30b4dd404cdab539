//! Driver configuration.
//!
//! Configuration is a YAML mapping with `TitleCase` keys (lowercase
//! aliases accepted) and strict unknown-key rejection. Every field is
//! optional; command-line flags override file values.

use std::num::NonZeroUsize;

use camino::Utf8Path;
use serde::Deserialize;

use super::error::DriverError;
use crate::augment::{Augmentation, DEFAULT_MAX_ATTEMPTS, NameGenerator, Pipeline, Probability};

/// Settings of one augmentation pass.
///
/// # Examples
///
///     use leantree_augment::driver::DriverConfig;
///
///     let config = DriverConfig::from_yaml("Seed: 7\nJobs: 2\nLibraryOnly: true\n").unwrap();
///     assert_eq!(config.seed, Some(7));
///     assert!(config.library_only);
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Base seed. Without one, a random base seed is drawn per pass.
    #[serde(rename = "Seed", alias = "seed")]
    pub seed: Option<u64>,

    /// Transformers applied to every state, in order.
    #[serde(rename = "Augmentations", alias = "augmentations")]
    pub augmentations: Vec<Augmentation>,

    /// Probability that the shuffle transformer reorders a state.
    #[serde(rename = "ShuffleProbability", alias = "shuffle_probability")]
    pub shuffle_probability: Probability,

    /// Probability that a fresh name ends in a subscript digit.
    #[serde(rename = "SubscriptProbability", alias = "subscript_probability")]
    pub subscript_probability: Probability,

    /// Candidates drawn per fresh name before the node is abandoned.
    #[serde(rename = "MaxAttempts", alias = "max_attempts")]
    pub max_attempts: usize,

    /// Visit at most this many nodes of each tree, in pre-order.
    #[serde(rename = "MaxNodesPerTree", alias = "max_nodes_per_tree")]
    pub max_nodes_per_tree: Option<usize>,

    /// Stop after this many augmented nodes in total.
    #[serde(rename = "MaxSamples", alias = "max_samples")]
    pub max_samples: Option<usize>,

    /// Skip records that do not belong to a library.
    #[serde(rename = "LibraryOnly", alias = "library_only")]
    pub library_only: bool,

    /// Number of worker threads.
    #[serde(rename = "Jobs", alias = "jobs")]
    pub jobs: NonZeroUsize,

    /// Log before/after renderings instead of writing records.
    #[serde(rename = "DryRun", alias = "dry_run")]
    pub dry_run: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            seed: None,
            augmentations: Augmentation::ALL.to_vec(),
            shuffle_probability: Pipeline::DEFAULT_SHUFFLE_PROBABILITY,
            subscript_probability: NameGenerator::default().subscript_probability(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_nodes_per_tree: None,
            max_samples: None,
            library_only: false,
            jobs: NonZeroUsize::MIN,
            dry_run: false,
        }
    }
}

impl DriverConfig {
    /// Parses and validates a YAML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Config`] if the YAML is malformed, contains
    /// unknown keys or fails validation.
    pub fn from_yaml(input: &str) -> Result<Self, DriverError> {
        let config: Self = serde_saphyr::from_str(input).map_err(|error| DriverError::Config {
            reason: error.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::ConfigIo`] if the file cannot be read and
    /// otherwise behaves like [`DriverConfig::from_yaml`].
    pub fn load(path: &Utf8Path) -> Result<Self, DriverError> {
        let input = std::fs::read_to_string(path).map_err(|error| DriverError::ConfigIo {
            path: path.to_string(),
            error,
        })?;
        Self::from_yaml(&input)
    }

    /// Checks constraints serde attributes cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Config`] on the first violated constraint.
    pub fn validate(&self) -> Result<(), DriverError> {
        if self.max_attempts == 0 {
            return Err(DriverError::Config {
                reason: "MaxAttempts must be positive".to_owned(),
            });
        }
        Ok(())
    }

    /// Builds the transformer pipeline described by this configuration.
    #[must_use]
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.augmentations.clone())
            .with_names(NameGenerator::new(
                self.subscript_probability,
                self.max_attempts,
            ))
            .with_shuffle_probability(self.shuffle_probability)
    }
}
