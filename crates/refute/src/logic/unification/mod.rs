//! Unification algorithm for first-order terms

mod mgu;
mod substitution;

#[cfg(test)]
mod proptest_tests;

pub use mgu::{
    unify, unify_literal_args, unify_literal_args_with, unify_with, UnificationError,
    UnificationResult, UnifyOptions,
};
pub use substitution::Substitution;
