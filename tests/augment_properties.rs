//! Property tests for the rewriting engine.

use std::num::NonZeroUsize;

use leantree_augment::augment::{
    AvoidSet, NameGenerator, Probability, rename_variables, shuffle, substitute,
};
use leantree_augment::state::{FVarId, Goal, Hypothesis, MVarId, ProofState};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

const TOKENS: [&str; 9] = ["x", "y", "xy", "x'", "x₁", "max", "_x", "yx", "h"];
const SEPARATORS: [&str; 6] = [" ", "(", ")", " + ", " → ", ", "];
const NAMES: [&str; 8] = ["x", "y", "h", "hx", "n", "m", "f", "ih"];

fn goal_from(names: &[&str]) -> Goal {
    let mut goal = Goal::new(MVarId::new("goal"), names.join(" = "));
    let mut previous: Option<&str> = None;
    for (i, name) in names.iter().enumerate() {
        let ty = previous.map_or_else(|| "Nat".to_owned(), |p| format!("{p} ≤ {p} + 1"));
        goal = goal.with_hypothesis(Hypothesis::new(FVarId::new(format!("fv{i}")), *name, ty));
        previous = Some(*name);
    }
    goal
}

fn state_from(sizes: &[usize]) -> ProofState {
    sizes
        .iter()
        .enumerate()
        .map(|(g, &size)| {
            (0..size).fold(Goal::new(MVarId::new(format!("g{g}")), "True"), |goal, h| {
                goal.with_hypothesis(Hypothesis::new(
                    FVarId::new(format!("g{g}.{h}")),
                    format!("h{h}"),
                    "Prop",
                ))
            })
        })
        .collect()
}

fn layout(state: &ProofState) -> Vec<String> {
    let mut ids: Vec<String> = state
        .goals
        .iter()
        .flat_map(|goal| {
            std::iter::once(goal.id.to_string())
                .chain(goal.hypotheses.iter().map(|hyp| hyp.id.to_string()))
        })
        .collect();
    ids.sort_unstable();
    ids
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Substitution rewrites exactly the whole-token occurrences.
    #[test]
    fn substitution_respects_token_boundaries(
        parts in prop::collection::vec(
            (prop::sample::select(TOKENS.to_vec()), prop::sample::select(SEPARATORS.to_vec())),
            0..12,
        ),
        old in prop::sample::select(vec!["x", "y", "max", "h"]),
        new in prop::sample::select(vec!["q", "zz", "a₁"]),
    ) {
        let text: String = parts.iter().map(|(token, sep)| format!("{token}{sep}")).collect();
        let expected: String = parts
            .iter()
            .map(|(token, sep)| format!("{}{sep}", if *token == old { new } else { *token }))
            .collect();
        let rewritten = substitute(&text, old, new).expect("non-empty token");
        prop_assert_eq!(rewritten.as_ref(), expected.as_str());
    }

    /// Fresh names have the requested letter count and avoid the set.
    #[test]
    fn fresh_names_never_collide(
        taken in prop::collection::vec("[a-zA-Z]{1,2}", 0..200),
        length in 1usize..4,
        seed in any::<u64>(),
    ) {
        let avoid: AvoidSet = taken.iter().map(String::as_str).collect();
        let length = NonZeroUsize::new(length).expect("positive");
        let mut rng = StdRng::seed_from_u64(seed);
        if let Ok(name) = NameGenerator::default().generate(length, &avoid, &mut rng) {
            prop_assert!(!avoid.contains(&name));
            let letters = name.chars().take_while(char::is_ascii_alphabetic).count();
            prop_assert_eq!(letters, length.get());
        }
    }

    /// Renaming keeps identities and lengths and never introduces shadowing.
    #[test]
    fn renaming_is_collision_free(
        names in prop::sample::subsequence(NAMES.to_vec(), 0..=NAMES.len()),
        seed in any::<u64>(),
    ) {
        let goal = goal_from(&names);
        let mut rng = StdRng::seed_from_u64(seed);
        let renamed = rename_variables(&goal, &mut rng).expect("name space is large");
        prop_assert!(renamed.first_shadowed_name().is_none());
        prop_assert_eq!(renamed.hypotheses.len(), goal.hypotheses.len());
        for (before, after) in goal.hypotheses.iter().zip(renamed.hypotheses.iter()) {
            prop_assert_eq!(&before.id, &after.id);
            let letters = after.user_name.chars().take_while(char::is_ascii_alphabetic).count();
            prop_assert!(
                after.user_name == before.user_name || letters == before.user_name.chars().count(),
                "{} renamed to {}",
                before.user_name,
                after.user_name
            );
        }
    }

    /// Shuffling permutes goals and hypotheses without touching them.
    #[test]
    fn shuffle_is_a_permutation(
        sizes in prop::collection::vec(0usize..6, 0..6),
        seed in any::<u64>(),
    ) {
        let state = state_from(&sizes);
        let mut rng = StdRng::seed_from_u64(seed);
        let shuffled = shuffle(&state, &mut rng, Probability::ONE);
        prop_assert_eq!(layout(&shuffled), layout(&state));
        for goal in &shuffled.goals {
            let original = state.goals.iter().find(|g| g.id == goal.id).expect("same goals");
            prop_assert_eq!(goal.hypotheses.len(), original.hypotheses.len());
        }
    }

    /// A closed gate returns the state unchanged.
    #[test]
    fn closed_shuffle_gate_is_identity(
        sizes in prop::collection::vec(0usize..6, 0..6),
        seed in any::<u64>(),
    ) {
        let state = state_from(&sizes);
        let mut rng = StdRng::seed_from_u64(seed);
        prop_assert_eq!(shuffle(&state, &mut rng, Probability::ZERO), state);
    }
}
