//! Unit tests for hypothesis renaming.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rstest::*;

use super::*;
use crate::state::{FVarId, MVarId};

fn hyp(id: &str, name: &str, ty: &str) -> Hypothesis {
    Hypothesis::new(FVarId::new(id), name, ty)
}

/// `x : Nat, h : x = 0 ⊢ x + 1 = 1`
#[fixture]
fn small_goal() -> Goal {
    Goal::new(MVarId::new("g"), "x + 1 = 1")
        .with_hypothesis(hyp("1", "x", "Nat"))
        .with_hypothesis(hyp("2", "h", "x = 0"))
}

/// A context whose later entries mention earlier ones, including a
/// `let`-bound value.
#[fixture]
fn dependent_goal() -> Goal {
    Goal::new(MVarId::new("g"), "f a ≤ f b ∧ s.card = n")
        .with_tag(Some("step".into()))
        .with_hypothesis(hyp("1", "a", "ℕ"))
        .with_hypothesis(hyp("2", "b", "ℕ"))
        .with_hypothesis(hyp("3", "hab", "a ≤ b"))
        .with_hypothesis(hyp("4", "f", "ℕ → ℕ").with_value(Some("fun k => k + a".into())))
        .with_hypothesis(hyp("5", "s", "Finset ℕ"))
        .with_hypothesis(hyp("6", "n", "ℕ").with_value(Some("s.card".into())))
        .with_hypothesis(hyp("7", "hf", "Monotone f"))
}

fn names(goal: &Goal) -> Vec<&str> {
    goal.names().collect()
}

fn types(goal: &Goal) -> Vec<&str> {
    goal.hypotheses.iter().map(|h| &*h.ty).collect()
}

// ── Explicit renaming ───────────────────────────────────────────────

#[rstest]
fn renaming_propagates_to_other_hypotheses_and_target(small_goal: Goal) {
    let renamed = rename_hypothesis(&small_goal, 0, "q").expect("q is free");
    assert_eq!(names(&renamed), vec!["q", "h"]);
    assert_eq!(types(&renamed), vec!["Nat", "q = 0"]);
    assert_eq!(&*renamed.ty, "q + 1 = 1");
}

#[rstest]
fn renaming_rewrites_let_values(dependent_goal: Goal) {
    let renamed = rename_hypothesis(&dependent_goal, 0, "z").expect("z is free");
    let f = renamed.hypotheses.get(3).expect("f is present");
    assert_eq!(f.value.as_deref(), Some("fun k => k + z"));
    assert_eq!(&*renamed.ty, "f z ≤ f b ∧ s.card = n");
}

#[rstest]
fn renaming_keeps_identities_and_order(dependent_goal: Goal) {
    let renamed = rename_hypothesis(&dependent_goal, 4, "t").expect("t is free");
    let before: Vec<&str> = dependent_goal.hypotheses.iter().map(|h| h.id.as_str()).collect();
    let after: Vec<&str> = renamed.hypotheses.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(before, after);
    assert_eq!(renamed.id, dependent_goal.id);
    assert_eq!(&*renamed.ty, "f a ≤ f b ∧ t.card = n");
}

#[rstest]
#[case::existing_hypothesis("h")]
#[case::existing_tag("step")]
fn renaming_onto_a_visible_name_is_rejected(#[case] new_name: &str) {
    let goal = Goal::new(MVarId::new("g"), "x = x")
        .with_tag(Some("step".into()))
        .with_hypothesis(hyp("1", "x", "Nat"))
        .with_hypothesis(hyp("2", "h", "True"));
    assert!(matches!(
        rename_hypothesis(&goal, 0, new_name),
        Err(AugmentError::ShadowedName { .. })
    ));
}

#[rstest]
fn renaming_out_of_range_is_rejected(small_goal: Goal) {
    assert!(matches!(
        rename_hypothesis(&small_goal, 9, "q"),
        Err(AugmentError::NoSuchHypothesis { index: 9, .. })
    ));
}

#[test]
fn renaming_an_anonymous_hypothesis_is_rejected() {
    let goal = Goal::new(MVarId::new("g"), "True").with_hypothesis(hyp("1", "", "Nat"));
    assert!(matches!(
        rename_hypothesis(&goal, 0, "q"),
        Err(AugmentError::EmptyToken)
    ));
}

// ── Random renaming ─────────────────────────────────────────────────

/// Re-applies the renamings observed in `after` to the texts of `before`,
/// in context order.
fn replay(before: &Goal, after: &Goal) -> Goal {
    let mut expected = before.clone();
    for (index, (old, new)) in before.hypotheses.iter().zip(after.hypotheses.iter()).enumerate() {
        if old.user_name != new.user_name {
            expected =
                rename_hypothesis(&expected, index, &new.user_name).expect("replay is valid");
        }
    }
    expected
}

#[rstest]
fn random_renaming_is_collision_free_and_complete(dependent_goal: Goal) {
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let after = rename_variables(&dependent_goal, &mut rng).expect("name space is large");

        assert_eq!(after.first_shadowed_name(), None, "seed {seed}");
        assert_eq!(after.hypotheses.len(), dependent_goal.hypotheses.len());
        assert_eq!(after, replay(&dependent_goal, &after), "seed {seed}");
    }
}

#[rstest]
fn random_renaming_preserves_name_lengths(dependent_goal: Goal) {
    let mut rng = StdRng::seed_from_u64(5);
    let after = rename_variables(&dependent_goal, &mut rng).expect("name space is large");
    for (old, new) in dependent_goal.hypotheses.iter().zip(after.hypotheses.iter()) {
        if old.user_name != new.user_name {
            let letters = new.user_name.chars().filter(char::is_ascii_alphabetic).count();
            assert_eq!(letters, old.user_name.chars().count());
        }
    }
}

#[rstest]
fn random_renaming_is_reproducible(dependent_goal: Goal) {
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        rename_variables(&dependent_goal, &mut rng).expect("name space is large")
    };
    assert_eq!(run(17), run(17));
}

#[test]
fn untouched_text_is_shared_with_the_input() {
    let goal = Goal::new(MVarId::new("g"), "n = m")
        .with_hypothesis(hyp("1", "n", "Nat"))
        .with_hypothesis(hyp("2", "m", "Int"));
    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let after = rename_variables(&goal, &mut rng).expect("name space is large");
        for (old, new) in goal.hypotheses.iter().zip(after.hypotheses.iter()) {
            assert!(Arc::ptr_eq(&old.ty, &new.ty));
        }
    }
}

#[test]
fn shadowed_names_are_kept_while_others_are_renamed() {
    let goal = Goal::new(MVarId::new("g"), "a✝ = y")
        .with_hypothesis(hyp("1", "a✝", "Nat"))
        .with_hypothesis(hyp("2", "a✝", "Nat"))
        .with_hypothesis(hyp("3", "y", "Nat"));
    let mut renamed_y = false;
    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        let after = rename_variables(&goal, &mut rng).expect("duplicates are skipped");
        let names: Vec<&str> = after.names().collect();
        assert_eq!(names[..2], ["a✝", "a✝"], "seed {seed}");
        if names[2] != "y" {
            renamed_y = true;
            assert_eq!(&*after.ty, format!("a✝ = {}", names[2]));
        }
    }
    assert!(renamed_y, "y should be renamed for some seed");
}

#[rstest]
#[case::repeated_hypothesis("x", true)]
#[case::tag_and_hypothesis("step", true)]
#[case::unique("h", false)]
#[case::anonymous("", false)]
fn shadowing_is_detected_per_name(#[case] name: &str, #[case] shadowed: bool) {
    let goal = Goal::new(MVarId::new("g"), "True")
        .with_tag(Some("step".into()))
        .with_hypothesis(hyp("1", "x", "Nat"))
        .with_hypothesis(hyp("2", "x", "Nat"))
        .with_hypothesis(hyp("3", "h", "True"))
        .with_hypothesis(hyp("4", "step", "True"))
        .with_hypothesis(hyp("5", "", "Nat"))
        .with_hypothesis(hyp("6", "", "Nat"));
    assert_eq!(goal.is_shadowed(name), shadowed);
}

#[test]
fn exhausted_generator_aborts_the_goal() {
    let goal = (0..16).fold(Goal::new(MVarId::new("g"), "True"), |goal, i| {
        goal.with_hypothesis(hyp(&i.to_string(), &format!("h{i}"), "Prop"))
    });
    let names = NameGenerator::new(Probability::ZERO, 0);
    let mut rng = StdRng::seed_from_u64(2);
    assert!(matches!(
        rename_variables_with(&goal, &names, &mut rng),
        Err(AugmentError::ExhaustedNameSpace { .. })
    ));
}

#[rstest]
fn state_renaming_is_goal_scoped(small_goal: Goal) {
    let other = Goal::new(MVarId::new("g2"), "x = x").with_hypothesis(hyp("1", "x", "Nat"));
    let state = ProofState::new([small_goal, other]);
    let mut rng = StdRng::seed_from_u64(9);
    let after = rename_variables_in_state(&state, &NameGenerator::default(), &mut rng)
        .expect("name space is large");
    assert_eq!(after.len(), 2);
    for (before, goal) in state.goals.iter().zip(after.goals.iter()) {
        assert_eq!(goal, &replay(before, goal));
    }
}
