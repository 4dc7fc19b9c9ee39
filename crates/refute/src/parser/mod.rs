//! Knowledge-base parsing

pub mod kb;

pub use kb::{clauses_from_strings, load_knowledge_base, parse_knowledge_base, parse_literal};
