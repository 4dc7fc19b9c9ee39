//! Proof reconstruction, verification and the result record handed to
//! presentation code.

use crate::error::{Error, Result};
use crate::logic::{Clause, Literal, Substitution};
use crate::prover::{LimitReason, ProofResult};
use crate::state::{ClauseId, ClauseRepository, Derivation};
use std::collections::HashSet;
use std::fmt;

/// One resolution step of a linear proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofStep {
    /// Id of the clause this step produces
    pub clause_id: ClauseId,
    pub premises: [ClauseId; 2],
    /// Contents of the two parent clauses
    pub parents: [Clause; 2],
    /// The eliminated literal of each parent
    pub resolved: [Literal; 2],
    pub unifier: Substitution,
    pub conclusion: Clause,
}

/// A refutation: resolution steps ordered so that every step comes after
/// the steps producing its parents. The last step derives the empty clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    pub steps: Vec<ProofStep>,
    pub empty_clause_id: ClauseId,
}

impl Proof {
    /// Proof of a knowledge base that already contains the empty clause
    pub fn trivial(empty_clause_id: ClauseId) -> Self {
        Proof {
            steps: Vec::new(),
            empty_clause_id,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Rebuild the derivation of `empty_clause_id` from parent links.
///
/// Walks the derivation graph depth-first, recording a clause only after
/// both its parents. Each clause appears at most once; input clauses are
/// referenced as parents but never emitted.
pub fn build_proof(empty_clause_id: ClauseId, repository: &ClauseRepository) -> Result<Proof> {
    let root = repository.record(empty_clause_id)?;
    if !root.clause.is_empty() {
        return Err(Error::Internal(format!(
            "clause {} is not the empty clause: {}",
            empty_clause_id, root.clause
        )));
    }
    if root.derivation.is_input() {
        return Err(Error::Internal(format!(
            "empty clause {} has no parents",
            empty_clause_id
        )));
    }

    let mut steps = Vec::new();
    let mut visited = HashSet::new();
    // (clause id, parents already scheduled)
    let mut stack = vec![(empty_clause_id, false)];

    while let Some((id, expanded)) = stack.pop() {
        let record = repository.record(id)?;

        if expanded {
            steps.push(proof_step(id, &record.derivation, &record.clause, repository)?);
            continue;
        }
        if !visited.insert(id) {
            continue;
        }

        if let Derivation::Resolution { premises, .. } = &record.derivation {
            stack.push((id, true));
            stack.push((premises[1], false));
            stack.push((premises[0], false));
        }
    }

    Ok(Proof {
        steps,
        empty_clause_id,
    })
}

fn proof_step(
    id: ClauseId,
    derivation: &Derivation,
    conclusion: &Clause,
    repository: &ClauseRepository,
) -> Result<ProofStep> {
    match derivation {
        Derivation::Resolution {
            premises,
            resolved,
            unifier,
        } => {
            let left = repository.record(premises[0])?;
            let right = repository.record(premises[1])?;
            Ok(ProofStep {
                clause_id: id,
                premises: *premises,
                parents: [(*left.clause).clone(), (*right.clause).clone()],
                resolved: resolved.clone(),
                unifier: unifier.clone(),
                conclusion: conclusion.clone(),
            })
        }
        Derivation::Input => Err(Error::Internal(format!(
            "input clause {} scheduled as a proof step",
            id
        ))),
    }
}

// =============================================================================
// Verification
// =============================================================================

/// A proof step that does not check out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("step {step_idx}: premise {premise} is neither an input clause nor derived earlier")]
    InvalidPremise { step_idx: usize, premise: ClauseId },

    #[error("step {step_idx}: recorded parent {premise} differs from the stored clause")]
    ParentMismatch { step_idx: usize, premise: ClauseId },

    #[error("step {step_idx}: resolved literal {literal} does not occur in its parent")]
    MissingLiteral { step_idx: usize, literal: String },

    #[error("step {step_idx}: resolved literals are not complementary under the unifier")]
    NotComplementary { step_idx: usize },

    #[error("step {step_idx}: conclusion {found} should be {expected}")]
    InvalidConclusion {
        step_idx: usize,
        expected: String,
        found: String,
    },

    #[error("proof does not end in the empty clause {empty_clause_id}")]
    NotARefutation { empty_clause_id: ClauseId },
}

/// Re-derive every step of `proof` against the repository it came from.
pub fn verify_proof(
    proof: &Proof,
    repository: &ClauseRepository,
) -> std::result::Result<(), VerificationError> {
    let mut derived: HashSet<ClauseId> = HashSet::new();

    for (step_idx, step) in proof.steps.iter().enumerate() {
        for (side, &premise) in step.premises.iter().enumerate() {
            let record = repository
                .get(premise)
                .filter(|r| r.derivation.is_input() || derived.contains(&premise))
                .ok_or(VerificationError::InvalidPremise { step_idx, premise })?;
            if *record.clause != step.parents[side] {
                return Err(VerificationError::ParentMismatch { step_idx, premise });
            }
            if !step.parents[side].literals().contains(&step.resolved[side]) {
                return Err(VerificationError::MissingLiteral {
                    step_idx,
                    literal: step.resolved[side].to_string(),
                });
            }
        }

        let [left, right] = &step.resolved;
        let left_inst = left.apply_substitution(&step.unifier);
        let right_inst = right.apply_substitution(&step.unifier);
        if !left_inst.is_complement_of(&right_inst) {
            return Err(VerificationError::NotComplementary { step_idx });
        }

        let expected: Clause = step.parents[0]
            .literals()
            .iter()
            .filter(|lit| *lit != left)
            .chain(step.parents[1].literals().iter().filter(|lit| *lit != right))
            .map(|lit| lit.apply_substitution(&step.unifier))
            .collect();
        if expected != step.conclusion {
            return Err(VerificationError::InvalidConclusion {
                step_idx,
                expected: expected.to_string(),
                found: step.conclusion.to_string(),
            });
        }

        derived.insert(step.clause_id);
    }

    let ends_empty = match proof.steps.last() {
        Some(last) => last.clause_id == proof.empty_clause_id && last.conclusion.is_empty(),
        None => repository
            .get(proof.empty_clause_id)
            .is_some_and(|r| r.derivation.is_input() && r.clause.is_empty()),
    };
    if !ends_empty {
        return Err(VerificationError::NotARefutation {
            empty_clause_id: proof.empty_clause_id,
        });
    }

    Ok(())
}

// =============================================================================
// ProofReport
// =============================================================================

/// How a proof attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Proved,
    Saturated,
    ResourceLimit(LimitReason),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Proved => write!(f, "proved"),
            Outcome::Saturated => write!(f, "saturated"),
            Outcome::ResourceLimit(reason) => write!(f, "not demonstrated within bound ({})", reason),
        }
    }
}

/// Result record of one proof attempt, ready for printing or persisting.
///
/// `Saturated` and `ResourceLimit` both report `proved = false`; `outcome`
/// keeps them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofReport {
    pub proved: bool,
    pub step_count: usize,
    pub outcome: Outcome,
    pub steps: Vec<ProofStep>,
}

impl ProofReport {
    pub fn from_result(result: &ProofResult) -> Self {
        match result {
            ProofResult::Proof(proof) => ProofReport {
                proved: true,
                step_count: proof.steps.len(),
                outcome: Outcome::Proved,
                steps: proof.steps.clone(),
            },
            ProofResult::Saturated => ProofReport {
                proved: false,
                step_count: 0,
                outcome: Outcome::Saturated,
                steps: Vec::new(),
            },
            ProofResult::ResourceLimit(reason) => ProofReport {
                proved: false,
                step_count: 0,
                outcome: Outcome::ResourceLimit(*reason),
                steps: Vec::new(),
            },
        }
    }
}

impl fmt::Display for ProofStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} with [{}] {} on {} / {}",
            self.premises[0],
            self.parents[0],
            self.premises[1],
            self.parents[1],
            self.resolved[0],
            self.resolved[1]
        )?;
        if !self.unifier.is_empty() {
            write!(f, " using {}", self.unifier.resolved())?;
        }
        write!(f, " => [{}] {}", self.clause_id, self.conclusion)
    }
}

impl fmt::Display for ProofReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "Step {}: {}", i + 1, step)?;
        }
        if self.proved {
            write!(f, "Result: DEMONSTRATED in {} steps", self.step_count)
        } else {
            write!(f, "Result: NOT DEMONSTRATED ({})", self.outcome)
        }
    }
}
