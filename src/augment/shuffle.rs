//! Order randomisation of goals and hypotheses.

use im::Vector;
use rand::Rng;
use rand::seq::SliceRandom;

use super::probability::Probability;
use crate::state::{Goal, ProofState};

/// Shuffles goal order and every goal's hypothesis order, all or nothing.
///
/// With probability `probability` every goal's context is permuted
/// uniformly at random and then the goals themselves are permuted;
/// otherwise `state` is returned unchanged. No element is added, removed
/// or rewritten.
#[must_use]
pub fn shuffle<R: Rng + ?Sized>(
    state: &ProofState,
    rng: &mut R,
    probability: Probability,
) -> ProofState {
    if !probability.sample(rng) {
        return state.clone();
    }
    let mut goals: Vec<Goal> = state
        .goals
        .iter()
        .map(|goal| {
            let mut hypotheses: Vec<_> = goal.hypotheses.iter().cloned().collect();
            hypotheses.shuffle(rng);
            goal.clone().with_hypotheses(Vector::from(hypotheses))
        })
        .collect();
    goals.shuffle(rng);
    ProofState {
        goals: Vector::from(goals),
    }
}
