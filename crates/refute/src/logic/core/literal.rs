//! Literals in first-order logic

use super::term::{Term, Variable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A predicate symbol with arity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PredicateSymbol {
    pub name: String,
    pub arity: usize,
}

impl PredicateSymbol {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        PredicateSymbol {
            name: name.into(),
            arity,
        }
    }
}

/// A literal (positive or negative atomic formula)
///
/// Field order matters for the derived `Ord`: literals sort by predicate,
/// then arguments, then polarity, which keeps a literal next to its
/// complement in a canonically ordered clause.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub predicate: PredicateSymbol,
    pub args: Vec<Term>,
    pub polarity: bool, // true = positive, false = negative
}

impl Literal {
    /// Create a new positive literal
    pub fn positive(predicate: PredicateSymbol, args: Vec<Term>) -> Self {
        Literal {
            predicate,
            args,
            polarity: true,
        }
    }

    /// Create a new negative literal
    pub fn negative(predicate: PredicateSymbol, args: Vec<Term>) -> Self {
        Literal {
            predicate,
            args,
            polarity: false,
        }
    }

    /// Build a literal from a predicate name; the arity is taken from `args`
    pub fn atom(name: impl Into<String>, args: Vec<Term>, polarity: bool) -> Self {
        Literal {
            predicate: PredicateSymbol::new(name, args.len()),
            args,
            polarity,
        }
    }

    /// Get the complement of this literal
    pub fn complement(&self) -> Literal {
        Literal {
            predicate: self.predicate.clone(),
            args: self.args.clone(),
            polarity: !self.polarity,
        }
    }

    /// Same predicate name and argument count
    pub fn same_predicate(&self, other: &Literal) -> bool {
        self.predicate == other.predicate
    }

    /// Exact complement: same predicate, identical arguments, opposite sign
    pub fn is_complement_of(&self, other: &Literal) -> bool {
        self.polarity != other.polarity && self.predicate == other.predicate && self.args == other.args
    }

    /// Collect all variables in this literal
    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        for term in &self.args {
            term.collect_variables(vars);
        }
    }
}

impl fmt::Display for PredicateSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "~")?;
        }
        write!(f, "{}", self.predicate.name)?;
        if !self.args.is_empty() {
            write!(f, "(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement() {
        let lit = Literal::atom("Odia", vec![Term::var("x"), Term::constant("Cesar")], true);
        let comp = lit.complement();
        assert!(!comp.polarity);
        assert!(lit.is_complement_of(&comp));
        assert!(comp.is_complement_of(&lit));
        assert!(!lit.is_complement_of(&lit));
        assert_eq!(comp.complement(), lit);
    }

    #[test]
    fn test_same_predicate_requires_arity() {
        let p1 = Literal::atom("P", vec![Term::var("x")], true);
        let p2 = Literal::atom("P", vec![Term::var("x"), Term::var("y")], false);
        let p3 = Literal::atom("P", vec![Term::constant("A")], false);
        assert!(!p1.same_predicate(&p2));
        assert!(p1.same_predicate(&p3));
        assert!(!p1.is_complement_of(&p3));
    }

    #[test]
    fn test_display() {
        let lit = Literal::atom("Odia", vec![Term::constant("Marco"), Term::constant("Cesar")], false);
        assert_eq!(lit.to_string(), "~Odia(Marco,Cesar)");
        assert_eq!(Literal::atom("A", vec![], true).to_string(), "A");
    }
}
