//! Fresh-name generation against an avoid-set.

use std::num::NonZeroUsize;

use indexmap::IndexSet;
use rand::Rng;
use rand::seq::SliceRandom;

use super::error::AugmentError;
use super::probability::Probability;
use super::tokens::tokens;
use crate::state::{Goal, ProofState, Text};

/// Decorative subscript digits that may end a generated name.
pub const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// Default number of candidates drawn before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const DEFAULT_SUBSCRIPT_PROBABILITY: f64 = 0.2;

// ── AvoidSet ────────────────────────────────────────────────────────

/// Names a freshly generated name must not collide with.
///
/// Besides the visible hypothesis names and tags, the scope constructors
/// also record every identifier token occurring in the scope's expression
/// text. A fresh name therefore can never capture a bound variable or a
/// constant that merely happens to share its spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvoidSet(IndexSet<Text>);

impl AvoidSet {
    /// Creates an empty avoid-set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the names visible in one goal.
    #[must_use]
    pub fn for_goal(goal: &Goal) -> Self {
        let mut avoid = Self::new();
        avoid.add_goal(goal);
        avoid
    }

    /// Collects the names visible anywhere in a proof state.
    #[must_use]
    pub fn for_state(state: &ProofState) -> Self {
        let mut avoid = Self::new();
        for goal in &state.goals {
            avoid.add_goal(goal);
        }
        avoid
    }

    /// Adds a name. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<Text>) -> bool {
        self.0.insert(name.into())
    }

    /// Returns `true` if `name` must be avoided.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    fn add_goal(&mut self, goal: &Goal) {
        for hypothesis in &goal.hypotheses {
            self.add_name(&hypothesis.user_name);
            self.add_tokens(&hypothesis.ty);
            if let Some(value) = &hypothesis.value {
                self.add_tokens(value);
            }
        }
        if let Some(tag) = &goal.tag {
            self.add_name(tag);
        }
        self.add_tokens(&goal.ty);
    }

    fn add_name(&mut self, name: &Text) {
        if !name.is_empty() {
            self.0.insert(Text::clone(name));
        }
    }

    fn add_tokens(&mut self, text: &str) {
        for token in tokens(text) {
            if !self.0.contains(token) {
                self.0.insert(Text::from(token));
            }
        }
    }
}

impl<T: Into<Text>> FromIterator<T> for AvoidSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

// ── NameGenerator ───────────────────────────────────────────────────

/// Draws short random names outside an [`AvoidSet`].
///
/// A candidate is `length` ASCII letters, followed with
/// `subscript_probability` by one subscript digit. Candidates found in the
/// avoid-set are redrawn, at most `max_attempts` times in total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NameGenerator {
    subscript_probability: Probability,
    max_attempts: usize,
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self {
            subscript_probability: Probability(DEFAULT_SUBSCRIPT_PROBABILITY),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl NameGenerator {
    /// Creates a generator with explicit settings.
    #[must_use]
    pub const fn new(subscript_probability: Probability, max_attempts: usize) -> Self {
        Self {
            subscript_probability,
            max_attempts,
        }
    }

    /// Probability that a candidate ends in a subscript digit.
    #[must_use]
    pub const fn subscript_probability(&self) -> Probability {
        self.subscript_probability
    }

    /// Number of candidates drawn before giving up.
    #[must_use]
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Generates a name of `length` letters that is not in `avoid`.
    ///
    /// The caller is responsible for adding the returned name to `avoid`
    /// when later calls must not repeat it.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::ExhaustedNameSpace`] when every candidate
    /// drawn within the retry budget collides.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        length: NonZeroUsize,
        avoid: &AvoidSet,
        rng: &mut R,
    ) -> Result<Text, AugmentError> {
        for _ in 0..self.max_attempts {
            let candidate = self.candidate(length, rng);
            if !avoid.contains(&candidate) {
                return Ok(Text::from(candidate));
            }
        }
        Err(AugmentError::ExhaustedNameSpace {
            length: length.get(),
            attempts: self.max_attempts,
        })
    }

    fn candidate<R: Rng + ?Sized>(&self, length: NonZeroUsize, rng: &mut R) -> String {
        let mut name: String = (0..length.get())
            .filter_map(|_| LETTERS.choose(rng))
            .map(|&letter| char::from(letter))
            .collect();
        if self.subscript_probability.sample(rng) {
            if let Some(&subscript) = SUBSCRIPTS.choose(rng) {
                name.push(subscript);
            }
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::state::{FVarId, Hypothesis, MVarId};

    fn single_letters() -> AvoidSet {
        LETTERS.iter().map(|&b| char::from(b).to_string()).collect()
    }

    fn length(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("test lengths are positive")
    }

    #[test]
    fn exhausts_when_every_single_letter_is_taken() {
        let generator = NameGenerator::new(Probability::ZERO, DEFAULT_MAX_ATTEMPTS);
        let mut rng = StdRng::seed_from_u64(0);
        let result = generator.generate(length(1), &single_letters(), &mut rng);
        assert!(matches!(
            result,
            Err(AugmentError::ExhaustedNameSpace { length: 1, attempts })
                if attempts == generator.max_attempts()
        ));
    }

    #[test]
    fn exhausts_when_subscripted_variants_are_taken_too() {
        let mut avoid = single_letters();
        for &letter in LETTERS {
            for subscript in SUBSCRIPTS {
                avoid.insert(format!("{}{subscript}", char::from(letter)));
            }
        }
        let mut rng = StdRng::seed_from_u64(1);
        let result = NameGenerator::default().generate(length(1), &avoid, &mut rng);
        assert!(matches!(result, Err(AugmentError::ExhaustedNameSpace { .. })));
    }

    #[test]
    fn generated_names_avoid_taken_names() {
        let avoid: AvoidSet = ["a", "b", "c", "x", "y"].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let name = NameGenerator::default()
                .generate(length(1), &avoid, &mut rng)
                .expect("plenty of single letters remain");
            assert!(!avoid.contains(&name));
        }
    }

    #[test]
    fn generated_names_have_requested_length_plus_optional_subscript() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let name = NameGenerator::default()
                .generate(length(3), &AvoidSet::new(), &mut rng)
                .expect("empty avoid-set");
            let letters = name.chars().take_while(char::is_ascii_alphabetic).count();
            let rest: Vec<char> = name.chars().skip(letters).collect();
            assert_eq!(letters, 3);
            assert!(rest.is_empty() || (rest.len() == 1 && SUBSCRIPTS.contains(&rest[0])));
        }
    }

    #[test]
    fn same_seed_reproduces_same_names() {
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10)
                .map(|_| {
                    NameGenerator::default()
                        .generate(length(4), &AvoidSet::new(), &mut rng)
                        .expect("empty avoid-set")
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn goal_avoid_set_covers_names_tag_and_expression_tokens() {
        let goal = Goal::new(MVarId::new("g"), "∀ k, f k = n")
            .with_tag(Some("succ".into()))
            .with_hypothesis(Hypothesis::new(FVarId::new("1"), "n", "Nat"))
            .with_hypothesis(
                Hypothesis::new(FVarId::new("2"), "f", "Nat → Nat").with_value(Some("id".into())),
            );
        let avoid = AvoidSet::for_goal(&goal);
        for name in ["n", "f", "succ", "k", "Nat", "id"] {
            assert!(avoid.contains(name), "missing {name}");
        }
        assert!(!avoid.contains("g"));
    }
}
