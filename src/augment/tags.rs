//! Randomised relabelling of goal tags.

use std::borrow::Cow;
use std::num::NonZeroUsize;

use im::Vector;
use rand::Rng;

use super::error::AugmentError;
use super::fresh::{AvoidSet, NameGenerator};
use super::probability::Probability;
use super::tokens::substitute;
use crate::state::{Goal, ProofState, Text};

/// Chance that an untagged goal receives a tag.
const ASSIGN_PROBABILITY: Probability = Probability::HALF;

/// Chance that a tag mentioned in the target is renamed together with it.
const RENAME_MENTIONED_PROBABILITY: Probability = Probability::HALF;

/// Longest tag minted for an untagged goal.
const MAX_NEW_TAG_LENGTH: usize = 5;

/// Randomly relabels the goals of `state` using the default
/// [`NameGenerator`].
///
/// # Errors
///
/// See [`rename_goal_tags_with`].
pub fn rename_goal_tags<R: Rng + ?Sized>(
    state: &ProofState,
    rng: &mut R,
) -> Result<ProofState, AugmentError> {
    rename_goal_tags_with(state, &NameGenerator::default(), rng)
}

/// Randomly relabels the goals of `state`.
///
/// One avoid-set is shared by the whole state, so a new tag never
/// collides with a hypothesis name, tag or expression token of any goal,
/// nor with a tag chosen for an earlier goal. Each goal is decided
/// independently:
///
/// - untagged: gains a fresh tag of length 1 to 5 with probability one
///   half;
/// - tag mentioned in the target: with probability one half, tag and
///   every mention are renamed together, otherwise the goal is unchanged;
/// - tag not mentioned: kept, replaced by a fresh tag, or cleared, each
///   with probability one third.
///
/// # Errors
///
/// Passes through [`AugmentError::ExhaustedNameSpace`] from the generator.
pub fn rename_goal_tags_with<R: Rng + ?Sized>(
    state: &ProofState,
    names: &NameGenerator,
    rng: &mut R,
) -> Result<ProofState, AugmentError> {
    let mut avoid = AvoidSet::for_state(state);
    let goals = state
        .goals
        .iter()
        .map(|goal| retag(goal, names, &mut avoid, rng))
        .collect::<Result<Vector<_>, _>>()?;
    Ok(ProofState { goals })
}

fn retag<R: Rng + ?Sized>(
    goal: &Goal,
    names: &NameGenerator,
    avoid: &mut AvoidSet,
    rng: &mut R,
) -> Result<Goal, AugmentError> {
    let Some(tag) = goal.tag_str() else {
        let length = NonZeroUsize::new(rng.gen_range(1..=MAX_NEW_TAG_LENGTH))
            .unwrap_or(NonZeroUsize::MIN);
        let fresh = names.generate(length, avoid, rng)?;
        if !ASSIGN_PROBABILITY.sample(rng) {
            return Ok(goal.clone());
        }
        avoid.insert(Text::clone(&fresh));
        return Ok(goal.clone().with_tag(Some(fresh)));
    };

    let length = NonZeroUsize::new(tag.chars().count()).unwrap_or(NonZeroUsize::MIN);
    let fresh = names.generate(length, avoid, rng)?;
    match substitute(&goal.ty, tag, &fresh)? {
        Cow::Owned(ty) => {
            if !RENAME_MENTIONED_PROBABILITY.sample(rng) {
                return Ok(goal.clone());
            }
            avoid.insert(Text::clone(&fresh));
            Ok(goal
                .clone()
                .with_tag(Some(fresh))
                .with_type(Text::from(ty)))
        }
        Cow::Borrowed(_) => match rng.gen_range(0..3) {
            0 => Ok(goal.clone()),
            1 => {
                avoid.insert(Text::clone(&fresh));
                Ok(goal.clone().with_tag(Some(fresh)))
            }
            _ => Ok(goal.clone().with_tag(None)),
        },
    }
}
