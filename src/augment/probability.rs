//! Validated probabilities.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize, de};

use super::error::AugmentError;

/// A probability within `0.0 ..= 1.0`.
///
/// Construction (via deserialization or [`Probability::new`]) rejects
/// values outside the unit interval and NaN, so sampling never panics.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Probability(pub(super) f64);

impl Probability {
    /// Never.
    pub const ZERO: Self = Self(0.0);
    /// A fair coin.
    pub const HALF: Self = Self(0.5);
    /// Always.
    pub const ONE: Self = Self(1.0);

    /// Creates a probability after validating the input.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::InvalidProbability`] if `value` is NaN or
    /// lies outside `0.0 ..= 1.0`.
    pub fn new(value: f64) -> Result<Self, AugmentError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AugmentError::InvalidProbability { value })
        }
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Draws one Bernoulli trial with this probability.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> bool {
        rng.gen_bool(self.0)
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for Probability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
        Self::new(value).map_err(|e| e.to_string())
    }
}

impl<'de> Deserialize<'de> for Probability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(de::Error::custom)
    }
}
