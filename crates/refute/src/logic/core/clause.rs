//! Clauses as canonical literal sets

use super::literal::Literal;
use super::term::Variable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A clause (disjunction of literals).
///
/// Literals are kept sorted and deduplicated, so two clauses holding the same
/// literal set compare equal regardless of the order they were written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    /// Create a new clause from literals (sorted, duplicates collapsed)
    pub fn new(mut literals: Vec<Literal>) -> Self {
        literals.sort();
        literals.dedup();
        Clause { literals }
    }

    /// The empty clause
    pub fn empty() -> Self {
        Clause { literals: Vec::new() }
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Check if this clause is empty (contradiction)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// A unit clause holds exactly one literal
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Check if this clause contains a literal together with its exact complement
    pub fn is_tautology(&self) -> bool {
        // complements differ only in polarity, which sorts last
        self.literals
            .windows(2)
            .any(|pair| pair[0].is_complement_of(&pair[1]))
    }

    /// Distinct variables occurring in the clause
    pub fn variables(&self) -> HashSet<Variable> {
        let mut vars = HashSet::new();
        for lit in &self.literals {
            lit.collect_variables(&mut vars);
        }
        vars
    }

    /// Structural key used for duplicate detection
    pub fn key(&self) -> ClauseKey {
        ClauseKey {
            literals: self.literals.clone(),
        }
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Clause::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "⊥")
        } else {
            for (i, lit) in self.literals.iter().enumerate() {
                if i > 0 {
                    write!(f, " ∨ ")?;
                }
                write!(f, "{}", lit)?;
            }
            Ok(())
        }
    }
}

// =============================================================================
// ClauseKey - Structural hash key for clause deduplication
// =============================================================================

/// Canonical (sorted) literal list of a clause.
///
/// Clauses differing only in literal order or repeated literals map to the
/// same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClauseKey {
    literals: Vec<Literal>,
}
