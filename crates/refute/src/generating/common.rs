//! Common types and utilities for inference rules

use crate::logic::{Clause, Literal, Substitution};
use crate::state::{ClauseRecord, Derivation};

/// Result of an inference rule application
#[derive(Debug, Clone)]
pub struct InferenceResult {
    pub derivation: Derivation,
    pub conclusion: Clause,
}

/// Trait for generating inference rules.
///
/// Rules are stateless and shared between pair-evaluation workers.
pub trait GeneratingInference: Send + Sync {
    /// Get the name of this rule
    fn name(&self) -> &str;

    /// All conclusions of the rule on an ordered pair of stored clauses
    fn generate(&self, left: &ClauseRecord, right: &ClauseRecord) -> Vec<InferenceResult>;
}

/// Collect literals from a clause, excluding one index, with substitution applied.
pub fn collect_literals_except(clause: &Clause, exclude: usize, subst: &Substitution) -> Vec<Literal> {
    clause
        .literals()
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != exclude)
        .map(|(_, lit)| lit.apply_substitution(subst))
        .collect()
}
