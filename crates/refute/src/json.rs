//! JSON serialization types for proof reports

use crate::logic::{Clause, Literal, Substitution, Term};
use crate::proof::{Outcome, ProofReport, ProofStep};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// JSON representation of a term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TermJson {
    Variable { name: String },
    Constant { name: String },
    Function { name: String, args: Vec<TermJson> },
}

impl From<&Term> for TermJson {
    fn from(term: &Term) -> Self {
        match term {
            Term::Variable(v) => TermJson::Variable { name: v.name.clone() },
            Term::Constant(c) => TermJson::Constant { name: c.name.clone() },
            Term::Function(f, args) => TermJson::Function {
                name: f.name.clone(),
                args: args.iter().map(TermJson::from).collect(),
            },
        }
    }
}

/// JSON representation of a literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralJson {
    pub polarity: bool,
    pub predicate: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TermJson>,
}

impl From<&Literal> for LiteralJson {
    fn from(lit: &Literal) -> Self {
        LiteralJson {
            polarity: lit.polarity,
            predicate: lit.predicate.name.clone(),
            args: lit.args.iter().map(TermJson::from).collect(),
        }
    }
}

/// JSON representation of a clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<usize>,
    /// Rendered form, e.g. `~P(x) ∨ Q(x)`
    pub text: String,
    pub literals: Vec<LiteralJson>,
}

impl ClauseJson {
    pub fn from_clause(clause: &Clause, id: Option<usize>) -> Self {
        ClauseJson {
            id,
            text: clause.to_string(),
            literals: clause.literals().iter().map(LiteralJson::from).collect(),
        }
    }
}

/// One variable binding of a unifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingJson {
    pub variable: String,
    pub term: TermJson,
}

fn bindings(subst: &Substitution) -> Vec<BindingJson> {
    subst
        .resolved()
        .iter()
        .map(|(var, term)| BindingJson {
            variable: var.name.clone(),
            term: TermJson::from(term),
        })
        .collect()
}

/// JSON representation of a proof step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStepJson {
    pub clause_id: usize,
    pub premises: Vec<usize>,
    pub parents: Vec<ClauseJson>,
    pub resolved: Vec<LiteralJson>,
    pub unifier: Vec<BindingJson>,
    pub conclusion: ClauseJson,
}

impl From<&ProofStep> for ProofStepJson {
    fn from(step: &ProofStep) -> Self {
        ProofStepJson {
            clause_id: step.clause_id,
            premises: step.premises.to_vec(),
            parents: step
                .premises
                .iter()
                .zip(step.parents.iter())
                .map(|(&id, clause)| ClauseJson::from_clause(clause, Some(id)))
                .collect(),
            resolved: step.resolved.iter().map(LiteralJson::from).collect(),
            unifier: bindings(&step.unifier),
            conclusion: ClauseJson::from_clause(&step.conclusion, Some(step.clause_id)),
        }
    }
}

/// JSON representation of a proof report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofReportJson {
    pub proved: bool,
    pub step_count: usize,
    /// `proved`, `saturated` or `resource_limit`
    pub outcome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub knowledge_base: Vec<ClauseJson>,
    pub steps: Vec<ProofStepJson>,
    pub time_seconds: f64,
}

impl ProofReportJson {
    pub fn new(report: &ProofReport, knowledge_base: &[Clause], elapsed: Duration) -> Self {
        let (outcome, reason) = match report.outcome {
            Outcome::Proved => ("proved", None),
            Outcome::Saturated => ("saturated", None),
            Outcome::ResourceLimit(reason) => ("resource_limit", Some(reason.to_string())),
        };
        ProofReportJson {
            proved: report.proved,
            step_count: report.step_count,
            outcome: outcome.to_string(),
            reason,
            knowledge_base: knowledge_base
                .iter()
                .enumerate()
                .map(|(id, clause)| ClauseJson::from_clause(clause, Some(id)))
                .collect(),
            steps: report.steps.iter().map(ProofStepJson::from).collect(),
            time_seconds: elapsed.as_secs_f64(),
        }
    }
}
