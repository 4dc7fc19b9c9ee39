//! Refute: a resolution-refutation prover for first-order clause sets
//!
//! Given a knowledge base in clause form (with the negated goal already
//! added), the prover saturates it under binary resolution with syntactic
//! unification and reports whether the empty clause is derivable, together
//! with the linear proof that derives it.

pub mod config;
pub mod error;
pub mod generating;
pub mod json;
pub mod logic;
pub mod parser;
pub mod proof;
pub mod prover;
pub mod state;

pub use config::ProverConfig;
pub use error::{Error, Result};

// Re-export the clause model
pub use logic::{
    unify, unify_with, Clause, Constant, FunctionSymbol, Literal, PredicateSymbol, Substitution,
    Term, UnificationError, UnificationResult, UnifyOptions, Variable,
};

pub use generating::{resolve, GeneratingInference, InferenceResult, ResolutionRule};
pub use state::{ClauseId, ClauseRecord, ClauseRepository, Derivation, Insertion};

pub use prover::{saturate, LimitReason, ProofResult, Prover, SearchPhase, SearchStats};
pub use proof::{build_proof, verify_proof, Outcome, Proof, ProofReport, ProofStep, VerificationError};

pub use parser::{clauses_from_strings, load_knowledge_base, parse_knowledge_base, parse_literal};
