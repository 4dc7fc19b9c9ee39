//! Clause repository for one proof attempt.
//!
//! The repository is an arena of immutable clause records addressed by
//! [`ClauseId`]. It owns every clause; everything else refers to clauses by
//! id. A canonical-key index rejects structurally duplicate clauses.

use crate::error::{Error, Result};
use crate::logic::{Clause, ClauseKey, Literal, Substitution};
use std::collections::HashMap;
use std::sync::Arc;

/// Position of a clause in the repository
pub type ClauseId = usize;

// =============================================================================
// Derivation
// =============================================================================

/// How a clause entered the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derivation {
    /// Part of the input knowledge base
    Input,
    /// Binary resolvent of two stored clauses
    Resolution {
        /// Parent clause ids, in the order they were resolved
        premises: [ClauseId; 2],
        /// The complementary literals that were eliminated, one per parent
        resolved: [Literal; 2],
        /// Unifier applied to the remaining literals
        unifier: Substitution,
    },
}

impl Derivation {
    pub fn is_input(&self) -> bool {
        matches!(self, Derivation::Input)
    }

    /// Parent clause ids (empty for input clauses)
    pub fn premises(&self) -> &[ClauseId] {
        match self {
            Derivation::Input => &[],
            Derivation::Resolution { premises, .. } => premises,
        }
    }
}

// =============================================================================
// ClauseRecord
// =============================================================================

/// A stored clause with its id and provenance
#[derive(Debug, Clone)]
pub struct ClauseRecord {
    pub id: ClauseId,
    pub clause: Arc<Clause>,
    pub derivation: Derivation,
}

/// Outcome of offering a clause to the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The clause was new and received this id
    Added(ClauseId),
    /// A structurally equal clause is already stored under this id
    Duplicate(ClauseId),
}

// =============================================================================
// ClauseRepository
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ClauseRepository {
    /// Storage for all clauses, indexed by clause ID
    records: Vec<ClauseRecord>,
    /// Canonical key -> clause ID
    index: HashMap<ClauseKey, ClauseId>,
    /// Number of input clauses stored
    initial_clause_count: usize,
}

impl ClauseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `clause` unless a structurally equal clause is already present.
    ///
    /// Tautologies never enter the repository; offering one is an engine bug.
    pub fn insert(&mut self, clause: Clause, derivation: Derivation) -> Result<Insertion> {
        if clause.is_tautology() {
            return Err(Error::Internal(format!("tautology offered to repository: {}", clause)));
        }

        let key = clause.key();
        if let Some(&existing) = self.index.get(&key) {
            return Ok(Insertion::Duplicate(existing));
        }

        let id = self.records.len();
        for &premise in derivation.premises() {
            if premise >= id {
                return Err(Error::Internal(format!(
                    "clause {} derived from unknown premise {}",
                    id, premise
                )));
            }
        }
        if derivation.is_input() {
            self.initial_clause_count += 1;
        }

        self.index.insert(key, id);
        self.records.push(ClauseRecord {
            id,
            clause: Arc::new(clause),
            derivation,
        });
        Ok(Insertion::Added(id))
    }

    pub fn get(&self, id: ClauseId) -> Option<&ClauseRecord> {
        self.records.get(id)
    }

    /// Like [`get`](Self::get), but a missing id is an internal error
    pub fn record(&self, id: ClauseId) -> Result<&ClauseRecord> {
        self.records
            .get(id)
            .ok_or_else(|| Error::Internal(format!("unknown clause id {}", id)))
    }

    pub fn clause(&self, id: ClauseId) -> Option<&Arc<Clause>> {
        self.records.get(id).map(|r| &r.clause)
    }

    /// Id of a stored clause structurally equal to `clause`
    pub fn find(&self, clause: &Clause) -> Option<ClauseId> {
        self.index.get(&clause.key()).copied()
    }

    pub fn contains(&self, clause: &Clause) -> bool {
        self.index.contains_key(&clause.key())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of input clauses stored; they hold ids `0..initial_clause_count()`
    pub fn initial_clause_count(&self) -> usize {
        self.initial_clause_count
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClauseRecord> {
        self.records.iter()
    }

    /// All stored clause bodies, in id order
    pub fn clauses(&self) -> Vec<Clause> {
        self.records.iter().map(|r| (*r.clause).clone()).collect()
    }
}
