//! Variable substitutions

use crate::logic::{Clause, Literal, Term, Variable};
use indexmap::IndexMap;
use std::fmt;

/// A substitution mapping variables to terms.
///
/// Bindings may be triangular (`x -> y`, `y -> A`); application follows the
/// chain so `x` becomes `A`. Bindings keep their insertion order, which is
/// also the order they are displayed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    map: IndexMap<Variable, Term>,
}

impl Substitution {
    /// Create a new empty substitution
    pub fn new() -> Self {
        Substitution {
            map: IndexMap::new(),
        }
    }

    /// Add a variable -> term mapping
    pub fn insert(&mut self, var: Variable, term: Term) {
        self.map.insert(var, term);
    }

    /// Get the term for a variable, if bound
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.map.get(var)
    }

    /// Check if a variable is bound
    pub fn contains(&self, var: &Variable) -> bool {
        self.map.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.map.iter()
    }

    /// Fully resolved binding of every variable in the domain
    pub fn resolved(&self) -> Substitution {
        let mut result = Substitution::new();
        for var in self.map.keys() {
            let term = Term::Variable(var.clone()).apply_substitution(self);
            result.insert(var.clone(), term);
        }
        result
    }

    fn apply_term(&self, term: &Term, expanding: &mut Vec<Variable>) -> Term {
        match term {
            Term::Variable(v) => match self.map.get(v) {
                // a variable met again inside its own expansion stays put;
                // without the occurs-check `x -> F(x)` is a legal binding
                Some(bound) if !expanding.contains(v) => {
                    expanding.push(v.clone());
                    let result = self.apply_term(bound, expanding);
                    expanding.pop();
                    result
                }
                _ => term.clone(),
            },
            Term::Constant(_) => term.clone(),
            Term::Function(f, args) => Term::Function(
                f.clone(),
                args.iter()
                    .map(|arg| self.apply_term(arg, expanding))
                    .collect(),
            ),
        }
    }
}

impl FromIterator<(Variable, Term)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (Variable, Term)>>(iter: I) -> Self {
        Substitution {
            map: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", var, term)?;
        }
        write!(f, "}}")
    }
}

impl Term {
    /// Apply a substitution to this term
    pub fn apply_substitution(&self, subst: &Substitution) -> Term {
        if subst.is_empty() {
            return self.clone();
        }
        subst.apply_term(self, &mut Vec::new())
    }
}

impl Literal {
    /// Apply a substitution to this literal
    pub fn apply_substitution(&self, subst: &Substitution) -> Literal {
        Literal {
            predicate: self.predicate.clone(),
            args: self
                .args
                .iter()
                .map(|arg| arg.apply_substitution(subst))
                .collect(),
            polarity: self.polarity,
        }
    }
}

impl Clause {
    /// Apply a substitution to this clause
    pub fn apply_substitution(&self, subst: &Substitution) -> Clause {
        self.literals()
            .iter()
            .map(|lit| lit.apply_substitution(subst))
            .collect()
    }
}
