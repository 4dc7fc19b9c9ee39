//! Counters collected during one proof search

use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Completed sweeps over the pair space
    pub sweeps: usize,
    /// Clause pairs handed to the resolver
    pub pair_evaluations: usize,
    /// Resolvents stored in the repository
    pub resolvents_added: usize,
    /// Resolvents already present in the repository
    pub duplicates: usize,
    /// Input clauses dropped while seeding (tautologies and repeats)
    pub inputs_skipped: usize,
    /// Wall-clock time spent inside `prove()`
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}
