//! First-order logic representation and manipulation
//!
//! This module provides the fundamental types for representing clauses:
//! terms, literals, clauses, substitutions, and unification.

pub mod core;
pub mod unification;

// Re-export commonly used types
pub use self::core::clause::{Clause, ClauseKey};
pub use self::core::literal::{Literal, PredicateSymbol};
pub use self::core::term::{is_variable_name, Constant, FunctionSymbol, Term, Variable};
pub use unification::{
    unify, unify_literal_args, unify_literal_args_with, unify_with, Substitution,
    UnificationError, UnificationResult, UnifyOptions,
};
