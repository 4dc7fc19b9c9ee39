//! Binary resolution inference rule

use super::common::{collect_literals_except, GeneratingInference, InferenceResult};
use crate::logic::{unify_literal_args_with, Clause, Substitution, UnifyOptions};
use crate::state::{ClauseId, ClauseRecord, Derivation};
use tracing::trace;

/// Apply binary resolution between two clauses.
///
/// Every pair of opposite-sign literals with the same predicate whose
/// argument lists unify yields one candidate; candidates containing a
/// complementary pair are discarded. Structurally equal resolvents are
/// reported once.
pub fn resolve(
    clause1: &Clause,
    idx1: ClauseId,
    clause2: &Clause,
    idx2: ClauseId,
    options: UnifyOptions,
) -> Vec<InferenceResult> {
    let mut results: Vec<InferenceResult> = Vec::new();

    for (i, lit1) in clause1.literals().iter().enumerate() {
        for (j, lit2) in clause2.literals().iter().enumerate() {
            if lit1.polarity == lit2.polarity || !lit1.same_predicate(lit2) {
                continue;
            }

            let mgu = match unify_literal_args_with(&lit1.args, &lit2.args, Substitution::new(), options) {
                Ok(mgu) => mgu,
                Err(_) => continue,
            };

            let mut new_literals = collect_literals_except(clause1, i, &mgu);
            new_literals.extend(collect_literals_except(clause2, j, &mgu));
            let new_clause = Clause::new(new_literals);

            if new_clause.is_tautology() {
                trace!(
                    left = idx1,
                    right = idx2,
                    "dropping tautologous resolvent {}",
                    new_clause
                );
                continue;
            }

            if results.iter().any(|r| r.conclusion == new_clause) {
                continue;
            }

            results.push(InferenceResult {
                derivation: Derivation::Resolution {
                    premises: [idx1, idx2],
                    resolved: [lit1.clone(), lit2.clone()],
                    unifier: mgu,
                },
                conclusion: new_clause,
            });
        }
    }

    results
}

/// Resolution inference rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolutionRule {
    options: UnifyOptions,
}

impl ResolutionRule {
    pub fn new(options: UnifyOptions) -> Self {
        ResolutionRule { options }
    }
}

impl GeneratingInference for ResolutionRule {
    fn name(&self) -> &str {
        "Resolution"
    }

    fn generate(&self, left: &ClauseRecord, right: &ClauseRecord) -> Vec<InferenceResult> {
        resolve(&left.clause, left.id, &right.clause, right.id, self.options)
    }
}
