//! Prover: drives resolution refutation over a clause repository.
//!
//! The `Prover` seeds a [`ClauseRepository`] with the input clauses and then
//! sweeps over all untried pairs of stored clauses, resolving each pair once.
//! The search ends when the empty clause is stored (proved), when a sweep adds
//! nothing (saturated), or when a configured bound is hit.
//!
//! Use `prove()` to run to completion, or `step()` for one sweep at a time.

pub mod stats;

pub use self::stats::SearchStats;

use crate::config::ProverConfig;
use crate::error::{Error, Result};
use crate::generating::{GeneratingInference, InferenceResult, ResolutionRule};
use crate::logic::{Clause, UnifyOptions};
use crate::proof::{build_proof, Proof};
use crate::state::{ClauseId, ClauseRepository, Derivation, Insertion};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Which bound stopped the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitReason {
    PairEvaluations,
    Clauses,
    Timeout,
    Cancelled,
}

impl fmt::Display for LimitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitReason::PairEvaluations => write!(f, "pair evaluation limit reached"),
            LimitReason::Clauses => write!(f, "clause limit reached"),
            LimitReason::Timeout => write!(f, "timeout"),
            LimitReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Where the search currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Input clauses stored, no pair evaluated yet
    Seeded,
    Expanding,
    /// The empty clause is stored under this id
    Proved(ClauseId),
    Saturated,
    ResourceLimit(LimitReason),
}

impl SearchPhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SearchPhase::Seeded | SearchPhase::Expanding)
    }
}

/// Outcome of a proof attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofResult {
    /// The empty clause was derived
    Proof(Proof),
    /// Every pair was tried and nothing new appeared
    Saturated,
    /// A bound was hit before either of the above
    ResourceLimit(LimitReason),
}

impl ProofResult {
    pub fn is_proof(&self) -> bool {
        matches!(self, ProofResult::Proof(_))
    }

    pub fn proof(&self) -> Option<&Proof> {
        match self {
            ProofResult::Proof(proof) => Some(proof),
            _ => None,
        }
    }
}

/// Per-problem resolution engine.
pub struct Prover {
    config: ProverConfig,
    /// Owner of every clause seen in this attempt
    repository: ClauseRepository,
    rule: Box<dyn GeneratingInference>,
    /// Unordered pairs already resolved, stored as (smaller id, larger id)
    processed_pairs: HashSet<(ClauseId, ClauseId)>,
    phase: SearchPhase,
    stats: SearchStats,
    start_time: Option<Instant>,
    /// Dedicated pool for pair evaluation (None when `workers == 1`)
    pool: Option<rayon::ThreadPool>,
    /// Cancellation flag; set to `true` to stop the search
    cancel: Arc<AtomicBool>,
}

impl Prover {
    /// Create a prover and seed its repository with `clauses`.
    ///
    /// Tautologous and repeated input clauses are skipped. An input empty
    /// clause leaves the prover already in the proved phase.
    pub fn new(clauses: Vec<Clause>, config: ProverConfig) -> Result<Self> {
        config.validate()?;

        let pool = if config.workers > 1 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(config.workers)
                    .build()
                    .map_err(|e| Error::Config(format!("failed to create thread pool: {}", e)))?,
            )
        } else {
            None
        };

        let rule = ResolutionRule::new(UnifyOptions {
            occurs_check: config.occurs_check,
        });

        let mut prover = Prover {
            config,
            repository: ClauseRepository::new(),
            rule: Box::new(rule),
            processed_pairs: HashSet::new(),
            phase: SearchPhase::Seeded,
            stats: SearchStats::default(),
            start_time: None,
            pool,
            cancel: Arc::new(AtomicBool::new(false)),
        };
        prover.seed(clauses)?;
        Ok(prover)
    }

    fn seed(&mut self, clauses: Vec<Clause>) -> Result<()> {
        for clause in clauses {
            if clause.is_tautology() {
                debug!("skipping tautologous input clause {}", clause);
                self.stats.inputs_skipped += 1;
                continue;
            }
            let is_empty = clause.is_empty();
            match self.repository.insert(clause, Derivation::Input)? {
                Insertion::Added(id) => {
                    trace!(id, "seeded input clause");
                    if is_empty && !self.phase.is_terminal() {
                        info!(id, "input contains the empty clause");
                        self.phase = SearchPhase::Proved(id);
                    }
                }
                Insertion::Duplicate(id) => {
                    debug!(id, "skipping repeated input clause");
                    self.stats.inputs_skipped += 1;
                }
            }
        }
        debug!(
            clauses = self.repository.len(),
            skipped = self.stats.inputs_skipped,
            "repository seeded"
        );
        Ok(())
    }

    /// Run the search to completion.
    ///
    /// Calling `prove()` again continues from the current state: a saturated
    /// search stays saturated without adding clauses, and a search stopped by
    /// a bound resumes (with a fresh timeout).
    pub fn prove(&mut self) -> Result<ProofResult> {
        let start_time = Instant::now();
        self.start_time = Some(start_time);

        let result = loop {
            if let Some(result) = self.step()? {
                break result;
            }
        };

        self.stats.elapsed += start_time.elapsed();
        match &result {
            ProofResult::Proof(proof) => info!(
                steps = proof.len(),
                clauses = self.repository.len(),
                pairs = self.stats.pair_evaluations,
                "refutation found"
            ),
            ProofResult::Saturated => info!(
                clauses = self.repository.len(),
                pairs = self.stats.pair_evaluations,
                "clause set saturated"
            ),
            ProofResult::ResourceLimit(reason) => info!(
                %reason,
                clauses = self.repository.len(),
                pairs = self.stats.pair_evaluations,
                "search stopped"
            ),
        }
        Ok(result)
    }

    /// Run one sweep over every untried pair of the current repository.
    ///
    /// Returns `Some(result)` once the search is over, `None` to continue.
    /// Resolvents stored during the sweep are paired up by the next sweep.
    pub fn step(&mut self) -> Result<Option<ProofResult>> {
        self.start_time.get_or_insert_with(Instant::now);

        if let SearchPhase::Proved(id) = self.phase {
            return Ok(Some(ProofResult::Proof(self.proof_for(id)?)));
        }
        self.phase = SearchPhase::Expanding;

        let extent = self.repository.len();
        let pairs = self.pending_pairs(extent);
        trace!(sweep = self.stats.sweeps, extent, pairs = pairs.len(), "starting sweep");

        let chunk_size = if self.pool.is_some() {
            self.config.chunk_size
        } else {
            1
        };

        let mut pos = 0;
        let mut skipped = false;
        while pos < pairs.len() {
            if let Some(reason) = self.check_limits() {
                return Ok(Some(self.stop(reason)));
            }

            let budget = self.config.max_pair_evaluations - self.stats.pair_evaluations;
            let end = pairs.len().min(pos + chunk_size.min(budget));
            let chunk = &pairs[pos..end];
            pos = end;

            let outcomes = self.evaluate_chunk(chunk);
            for (&pair, outcome) in chunk.iter().zip(outcomes) {
                // Skipped by a worker after a stop was signalled
                let Some(results) = outcome? else {
                    skipped = true;
                    continue;
                };
                self.stats.pair_evaluations += 1;
                for result in results {
                    if let Some(done) = self.add_resolvent(result)? {
                        return Ok(Some(done));
                    }
                }
                self.processed_pairs.insert(pair);
            }
        }

        if skipped {
            // An untried pair left behind rules out saturation
            if let Some(reason) = self.check_limits() {
                return Ok(Some(self.stop(reason)));
            }
            return Ok(None);
        }

        self.stats.sweeps += 1;
        if self.repository.len() == extent {
            self.phase = SearchPhase::Saturated;
            return Ok(Some(ProofResult::Saturated));
        }
        debug!(
            sweep = self.stats.sweeps,
            new = self.repository.len() - extent,
            total = self.repository.len(),
            "sweep finished"
        );
        Ok(None)
    }

    /// Untried pairs over ids `0..extent` in scheduling order
    fn pending_pairs(&self, extent: ClauseId) -> Vec<(ClauseId, ClauseId)> {
        let mut pairs: Vec<(ClauseId, ClauseId)> = (0..extent)
            .flat_map(|j| (0..j).map(move |i| (i, j)))
            .filter(|pair| !self.processed_pairs.contains(pair))
            .collect();

        if self.config.unit_preference {
            let is_unit = |id: ClauseId| self.repository.clause(id).is_some_and(|c| c.is_unit());
            pairs.sort_by_key(|&(i, j)| (!(is_unit(i) || is_unit(j)), j, i));
        }
        pairs
    }

    /// Resolve every pair of `chunk`; `None` marks a pair skipped after a stop
    fn evaluate_chunk(
        &self,
        chunk: &[(ClauseId, ClauseId)],
    ) -> Vec<Result<Option<Vec<InferenceResult>>>> {
        let repository = &self.repository;
        let rule = self.rule.as_ref();

        match &self.pool {
            None => chunk
                .iter()
                .map(|&(i, j)| resolve_pair(repository, rule, i, j).map(Some))
                .collect(),
            Some(pool) => {
                let found_empty = AtomicBool::new(false);
                let cancel = self.cancel.as_ref();
                pool.install(|| {
                    chunk
                        .par_iter()
                        .map(|&(i, j)| -> Result<Option<Vec<InferenceResult>>> {
                            if found_empty.load(Ordering::Relaxed) || cancel.load(Ordering::Relaxed) {
                                return Ok(None);
                            }
                            let results = resolve_pair(repository, rule, i, j)?;
                            if results.iter().any(|r| r.conclusion.is_empty()) {
                                found_empty.store(true, Ordering::Relaxed);
                            }
                            Ok(Some(results))
                        })
                        .collect()
                })
            }
        }
    }

    /// Store one resolvent; returns the final result if this ends the search
    fn add_resolvent(&mut self, result: InferenceResult) -> Result<Option<ProofResult>> {
        if self.repository.contains(&result.conclusion) {
            self.stats.duplicates += 1;
            return Ok(None);
        }
        let is_empty = result.conclusion.is_empty();
        // The empty clause ends the search, so it is stored even at the cap
        if !is_empty && self.repository.len() >= self.config.max_clauses {
            return Ok(Some(self.stop(LimitReason::Clauses)));
        }

        match self.repository.insert(result.conclusion, result.derivation)? {
            Insertion::Added(id) => {
                self.stats.resolvents_added += 1;
                let record = self.repository.record(id)?;
                debug!(id, premises = ?record.derivation.premises(), "derived {}", record.clause);
                if is_empty {
                    self.phase = SearchPhase::Proved(id);
                    return Ok(Some(ProofResult::Proof(self.proof_for(id)?)));
                }
            }
            Insertion::Duplicate(_) => self.stats.duplicates += 1,
        }
        Ok(None)
    }

    fn check_limits(&self) -> Option<LimitReason> {
        if self.cancel.load(Ordering::Relaxed) {
            return Some(LimitReason::Cancelled);
        }
        if self.stats.pair_evaluations >= self.config.max_pair_evaluations {
            return Some(LimitReason::PairEvaluations);
        }
        if let Some(start) = self.start_time {
            if start.elapsed() >= self.config.timeout {
                return Some(LimitReason::Timeout);
            }
        }
        None
    }

    fn stop(&mut self, reason: LimitReason) -> ProofResult {
        self.phase = SearchPhase::ResourceLimit(reason);
        ProofResult::ResourceLimit(reason)
    }

    fn proof_for(&self, empty_clause_id: ClauseId) -> Result<Proof> {
        let record = self.repository.record(empty_clause_id)?;
        if record.derivation.is_input() && record.clause.is_empty() {
            return Ok(Proof::trivial(empty_clause_id));
        }
        build_proof(empty_clause_id, &self.repository)
    }

    // =========================================================================
    // Public accessors
    // =========================================================================

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// The repository, including every derived clause
    pub fn repository(&self) -> &ClauseRepository {
        &self.repository
    }

    pub fn config(&self) -> &ProverConfig {
        &self.config
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Shared flag that stops the search when set to `true`
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }
}

fn resolve_pair(
    repository: &ClauseRepository,
    rule: &dyn GeneratingInference,
    left: ClauseId,
    right: ClauseId,
) -> Result<Vec<InferenceResult>> {
    let left = repository.record(left)?;
    let right = repository.record(right)?;
    Ok(rule.generate(left, right))
}

/// Seed a prover with `clauses` and run it to completion.
///
/// The prover is returned alongside the result so callers can inspect the
/// repository and statistics.
pub fn saturate(clauses: Vec<Clause>, config: ProverConfig) -> Result<(ProofResult, Prover)> {
    let mut prover = Prover::new(clauses, config)?;
    let result = prover.prove()?;
    Ok((result, prover))
}
