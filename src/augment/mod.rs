//! The rewriting engine.
//!
//! Every transformer is a pure function from one immutable snapshot to a
//! new one. Randomness is always passed in explicitly as `&mut R where
//! R: Rng`, so a fixed seed and a fixed call sequence reproduce the same
//! output, and parallel workers can each own an independent source.

mod error;
mod fresh;
mod pipeline;
mod probability;
mod shuffle;
mod tags;
mod tokens;
mod variables;

pub use error::AugmentError;
pub use fresh::{AvoidSet, DEFAULT_MAX_ATTEMPTS, NameGenerator, SUBSCRIPTS};
pub use pipeline::{Augmentation, Pipeline};
pub use probability::Probability;
pub use shuffle::shuffle;
pub use tags::{rename_goal_tags, rename_goal_tags_with};
pub use tokens::{is_identifier_like, substitute, tokens};
pub use variables::{
    rename_hypothesis, rename_variables, rename_variables_in_state, rename_variables_with,
};
