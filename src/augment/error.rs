//! Error types for the rewriting engine.

use crate::state::{MVarId, Text};

/// Errors raised while rewriting a proof state.
///
/// Each of these aborts the rewrite of the goal or state being processed
/// and nothing else.
#[derive(Debug, thiserror::Error)]
pub enum AugmentError {
    /// No fresh name outside the avoid-set was found within the retry
    /// budget.
    #[error("no fresh name of length {length} found in {attempts} attempts")]
    ExhaustedNameSpace {
        /// Requested name length in characters.
        length: usize,
        /// Number of candidates drawn before giving up.
        attempts: usize,
    },

    /// Token substitution was asked to replace the empty string.
    #[error("cannot substitute an empty token")]
    EmptyToken,

    /// A probability outside `0.0 ..= 1.0` (or NaN) was supplied.
    #[error("invalid probability {value}: must lie within 0.0 ..= 1.0")]
    InvalidProbability {
        /// The rejected value.
        value: f64,
    },

    /// A goal already shows the same name twice, so a renaming could not
    /// be attributed to a single binder.
    #[error("goal '{goal}' shadows name '{name}'")]
    ShadowedName {
        /// The offending goal.
        goal: MVarId,
        /// The name visible more than once.
        name: Text,
    },

    /// A hypothesis index outside the goal's context was requested.
    #[error("goal '{goal}' has no hypothesis at position {index}")]
    NoSuchHypothesis {
        /// The goal that was addressed.
        goal: MVarId,
        /// The requested position.
        index: usize,
    },

    /// An augmentation name did not match any known transformer.
    #[error("unknown augmentation '{name}' (expected one of: {expected})")]
    UnknownAugmentation {
        /// The unrecognised name.
        name: String,
        /// Comma-separated list of accepted names.
        expected: &'static str,
    },
}
