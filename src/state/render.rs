//! Human-readable rendering in the prover's goal-display style.
//!
//! The output is meant for before/after inspection and is never parsed
//! back.

use std::fmt;

use super::types::{Goal, Hypothesis, ProofState};

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.user_name, self.ty)?;
        if let Some(value) = &self.value {
            write!(f, " := {value}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = self.tag_str() {
            writeln!(f, "case {tag}")?;
        }
        for hypothesis in &self.hypotheses {
            writeln!(f, "{hypothesis}")?;
        }
        write!(f, "⊢ {}", self.ty)
    }
}

impl fmt::Display for ProofState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no goals");
        }
        for (i, goal) in self.goals.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{goal}")?;
        }
        Ok(())
    }
}
