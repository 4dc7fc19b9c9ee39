//! Terms in first-order logic

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A variable in first-order logic
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }
}

/// A constant symbol
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
}

impl Constant {
    pub fn new(name: impl Into<String>) -> Self {
        Constant { name: name.into() }
    }
}

/// A function symbol with arity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub name: String,
    pub arity: usize,
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        FunctionSymbol {
            name: name.into(),
            arity,
        }
    }
}

/// A term in first-order logic.
///
/// `Function` is the compound case: a functor applied to argument terms.
/// Two function terms are equal only if their functors, arities and all
/// arguments are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
    Function(FunctionSymbol, Vec<Term>),
}

impl Term {
    /// Create a variable term
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(Variable::new(name))
    }

    /// Create a constant term
    pub fn constant(name: impl Into<String>) -> Self {
        Term::Constant(Constant::new(name))
    }

    /// Create a function term; the arity is taken from `args`
    pub fn function(name: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Function(FunctionSymbol::new(name, args.len()), args)
    }

    /// Build an atomic term from a bare symbol.
    ///
    /// A symbol whose first character is lowercase is a variable, anything
    /// else is a constant. This is the only place the naming convention is
    /// consulted.
    pub fn from_symbol(name: &str) -> Self {
        if is_variable_name(name) {
            Term::var(name)
        } else {
            Term::constant(name)
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Get all variables in this term, in order of occurrence
    pub fn variables(&self) -> Vec<Variable> {
        match self {
            Term::Variable(v) => vec![v.clone()],
            Term::Constant(_) => vec![],
            Term::Function(_, args) => args.iter().flat_map(|arg| arg.variables()).collect(),
        }
    }

    /// Collect all variables in this term
    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        match self {
            Term::Variable(v) => {
                vars.insert(v.clone());
            }
            Term::Constant(_) => {}
            Term::Function(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Check whether `var` occurs anywhere in this term
    pub fn contains_variable(&self, var: &Variable) -> bool {
        match self {
            Term::Variable(v) => v == var,
            Term::Constant(_) => false,
            Term::Function(_, args) => args.iter().any(|arg| arg.contains_variable(var)),
        }
    }
}

/// Whether a bare symbol names a variable (first character lowercase)
pub fn is_variable_name(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_lowercase)
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
            Term::Function(func, args) => {
                write!(f, "{}(", func.name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_convention() {
        assert_eq!(Term::from_symbol("x"), Term::var("x"));
        assert_eq!(Term::from_symbol("marco"), Term::var("marco"));
        assert_eq!(Term::from_symbol("Marco"), Term::constant("Marco"));
        assert_eq!(Term::from_symbol("_tmp"), Term::constant("_tmp"));
    }

    #[test]
    fn test_function_equality() {
        let f1 = Term::function("F", vec![Term::var("x"), Term::constant("A")]);
        let f2 = Term::function("F", vec![Term::var("x"), Term::constant("A")]);
        let g = Term::function("G", vec![Term::var("x"), Term::constant("A")]);
        let f_short = Term::function("F", vec![Term::var("x")]);

        assert_eq!(f1, f2);
        assert_ne!(f1, g);
        assert_ne!(f1, f_short);
    }

    #[test]
    fn test_variables() {
        let t = Term::function(
            "F",
            vec![Term::var("x"), Term::function("G", vec![Term::var("y")])],
        );
        assert_eq!(t.variables(), vec![Variable::new("x"), Variable::new("y")]);
        assert!(t.contains_variable(&Variable::new("y")));
        assert!(!t.contains_variable(&Variable::new("z")));
    }

    #[test]
    fn test_display() {
        let t = Term::function("Padre", vec![Term::var("x"), Term::constant("Cesar")]);
        assert_eq!(t.to_string(), "Padre(x,Cesar)");
    }
}
