//! Core FOL data types: terms, literals, and clauses

pub mod clause;
pub mod literal;
pub mod term;
