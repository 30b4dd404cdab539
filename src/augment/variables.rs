//! Consistent renaming of hypotheses within a goal.
//!
//! Renaming is atomic per hypothesis: the new surface name and every
//! rewritten occurrence in the goal's hypothesis types, values and target
//! land together. Rewrites are goal-scoped; a hypothesis identity that is
//! visible in several goals is renamed independently in each of them.

use std::borrow::Cow;
use std::num::NonZeroUsize;

use im::Vector;
use rand::Rng;

use super::error::AugmentError;
use super::fresh::{AvoidSet, NameGenerator};
use super::probability::Probability;
use super::tokens::substitute;
use crate::state::{Goal, Hypothesis, ProofState, Text};

/// Chance that any single hypothesis is selected for renaming.
const RENAME_PROBABILITY: Probability = Probability::HALF;

/// Renames a random subset of the hypotheses in `goal`.
///
/// Uses the default [`NameGenerator`]; see [`rename_variables_with`].
///
/// # Errors
///
/// See [`rename_variables_with`].
pub fn rename_variables<R: Rng + ?Sized>(goal: &Goal, rng: &mut R) -> Result<Goal, AugmentError> {
    rename_variables_with(goal, &NameGenerator::default(), rng)
}

/// Renames a random subset of the hypotheses in `goal`.
///
/// Each hypothesis is selected independently with probability one half
/// and receives a fresh name of the same length, drawn outside every name
/// and token visible in the goal and every name chosen earlier in the
/// pass. Hypotheses are processed in context order and each renaming is
/// propagated to all hypothesis types and values and to the target before
/// the next one starts. Identities, hypothesis count and order are kept.
///
/// A name the goal already shows twice, such as a repeated inaccessible
/// `a✝`, is ambiguous in the text and is never selected; the other
/// hypotheses are still renamed.
///
/// # Errors
///
/// Passes through [`AugmentError::ExhaustedNameSpace`] from the generator.
pub fn rename_variables_with<R: Rng + ?Sized>(
    goal: &Goal,
    names: &NameGenerator,
    rng: &mut R,
) -> Result<Goal, AugmentError> {
    let mut avoid = AvoidSet::for_goal(goal);
    let mut hypotheses = goal.hypotheses.clone();
    let mut ty = Text::clone(&goal.ty);
    for index in 0..hypotheses.len() {
        if !RENAME_PROBABILITY.sample(rng) {
            continue;
        }
        let Some(old) = hypotheses.get(index).map(|h| Text::clone(&h.user_name)) else {
            continue;
        };
        if goal.is_shadowed(&old) {
            continue;
        }
        let Some(length) = NonZeroUsize::new(old.chars().count()) else {
            continue;
        };
        let new = names.generate(length, &avoid, rng)?;
        avoid.insert(Text::clone(&new));
        apply_renaming(&mut hypotheses, &mut ty, index, &old, &new)?;
    }

    Ok(goal.clone().with_hypotheses(hypotheses).with_type(ty))
}

/// Applies [`rename_variables_with`] to every goal of `state`.
///
/// # Errors
///
/// Fails with the first error raised for any goal.
pub fn rename_variables_in_state<R: Rng + ?Sized>(
    state: &ProofState,
    names: &NameGenerator,
    rng: &mut R,
) -> Result<ProofState, AugmentError> {
    let goals = state
        .goals
        .iter()
        .map(|goal| rename_variables_with(goal, names, rng))
        .collect::<Result<Vector<_>, _>>()?;
    Ok(ProofState { goals })
}

/// Renames the hypothesis at `index` to `new_name` and propagates the
/// change through the whole goal.
///
/// # Errors
///
/// Returns [`AugmentError::NoSuchHypothesis`] for an out-of-range index,
/// [`AugmentError::EmptyToken`] if the hypothesis is anonymous and
/// [`AugmentError::ShadowedName`] if `new_name` is already visible in the
/// goal.
pub fn rename_hypothesis(goal: &Goal, index: usize, new_name: &str) -> Result<Goal, AugmentError> {
    let old = goal
        .hypotheses
        .get(index)
        .map(|h| Text::clone(&h.user_name))
        .ok_or_else(|| AugmentError::NoSuchHypothesis {
            goal: goal.id.clone(),
            index,
        })?;
    if &*old != new_name && goal.names().chain(goal.tag_str()).any(|n| n == new_name) {
        return Err(AugmentError::ShadowedName {
            goal: goal.id.clone(),
            name: Text::from(new_name),
        });
    }

    let mut hypotheses = goal.hypotheses.clone();
    let mut ty = Text::clone(&goal.ty);
    apply_renaming(&mut hypotheses, &mut ty, index, &old, &Text::from(new_name))?;
    Ok(goal.clone().with_hypotheses(hypotheses).with_type(ty))
}

fn apply_renaming(
    hypotheses: &mut Vector<Hypothesis>,
    ty: &mut Text,
    index: usize,
    old: &str,
    new: &Text,
) -> Result<(), AugmentError> {
    if old.is_empty() {
        return Err(AugmentError::EmptyToken);
    }
    if let Some(slot) = hypotheses.get_mut(index) {
        slot.user_name = Text::clone(new);
    }
    for position in 0..hypotheses.len() {
        let update = match hypotheses.get(position) {
            Some(hypothesis) => rewrite_hypothesis(hypothesis, old, new)?,
            None => None,
        };
        if let Some(rewritten) = update {
            if let Some(slot) = hypotheses.get_mut(position) {
                *slot = rewritten;
            }
        }
    }
    if let Some(rewritten) = rewrite(ty, old, new)? {
        *ty = rewritten;
    }
    Ok(())
}

/// Returns the rewritten hypothesis, or `None` when its text is untouched.
fn rewrite_hypothesis(
    hypothesis: &Hypothesis,
    old: &str,
    new: &str,
) -> Result<Option<Hypothesis>, AugmentError> {
    let ty = rewrite(&hypothesis.ty, old, new)?;
    let value = match &hypothesis.value {
        Some(value) => rewrite(value, old, new)?,
        None => None,
    };
    if ty.is_none() && value.is_none() {
        return Ok(None);
    }
    Ok(Some(Hypothesis {
        ty: ty.unwrap_or_else(|| Text::clone(&hypothesis.ty)),
        value: value.or_else(|| hypothesis.value.clone()),
        ..hypothesis.clone()
    }))
}

fn rewrite(text: &Text, old: &str, new: &str) -> Result<Option<Text>, AugmentError> {
    Ok(match substitute(text, old, new)? {
        Cow::Borrowed(_) => None,
        Cow::Owned(rewritten) => Some(Text::from(rewritten)),
    })
}

#[cfg(test)]
#[path = "variables_tests.rs"]
mod tests;
