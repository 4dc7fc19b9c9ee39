//! Most General Unifier (MGU) computation

use super::Substitution;
use crate::logic::{Term, Variable};

/// Result of a unification attempt
pub type UnificationResult = Result<Substitution, UnificationError>;

/// Reasons two terms fail to unify.
///
/// A failed unification is an ordinary outcome for the resolver, not an
/// engine error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnificationError {
    /// Occurs check failed - variable occurs in term
    OccursCheck(Variable, Term),
    /// Function symbols don't match
    FunctionClash(String, String),
    /// Arities (or argument list lengths) don't match
    ArityMismatch(usize, usize),
    /// Constant symbols don't match
    ConstantClash(String, String),
    /// Function-constant clash
    FunctionConstantClash(String, String),
}

/// Unification switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnifyOptions {
    /// Reject bindings `x -> t` where `x` occurs in `t`
    pub occurs_check: bool,
}

/// Unify two terms under `theta`, returning `theta` extended to a unifier.
///
/// No occurs-check is performed; see [`unify_with`].
pub fn unify(term1: &Term, term2: &Term, theta: Substitution) -> UnificationResult {
    unify_with(term1, term2, theta, UnifyOptions::default())
}

/// Unify two terms under `theta` with explicit options
pub fn unify_with(
    term1: &Term,
    term2: &Term,
    theta: Substitution,
    options: UnifyOptions,
) -> UnificationResult {
    let mut unifier = Unifier::new(theta, options);
    unifier.unify(term1, term2)?;
    Ok(unifier.theta)
}

/// Unify two literal argument lists position by position.
///
/// Bindings from earlier positions are visible to later ones. Lists of
/// different length never unify.
pub fn unify_literal_args(args1: &[Term], args2: &[Term], theta: Substitution) -> UnificationResult {
    unify_literal_args_with(args1, args2, theta, UnifyOptions::default())
}

/// [`unify_literal_args`] with explicit options
pub fn unify_literal_args_with(
    args1: &[Term],
    args2: &[Term],
    theta: Substitution,
    options: UnifyOptions,
) -> UnificationResult {
    if args1.len() != args2.len() {
        return Err(UnificationError::ArityMismatch(args1.len(), args2.len()));
    }

    let mut unifier = Unifier::new(theta, options);
    for (arg1, arg2) in args1.iter().zip(args2.iter()) {
        unifier.unify(arg1, arg2)?;
    }
    Ok(unifier.theta)
}

/// Working state of one unification problem.
struct Unifier {
    theta: Substitution,
    options: UnifyOptions,
    /// Pairs currently being unified through a variable binding. Revisiting
    /// one of them means the bindings are cyclic; the pair is then treated as
    /// already unified, which keeps unification terminating without the
    /// occurs-check.
    pending: Vec<(Term, Term)>,
}

impl Unifier {
    fn new(theta: Substitution, options: UnifyOptions) -> Self {
        Unifier {
            theta,
            options,
            pending: Vec::new(),
        }
    }

    fn unify(&mut self, term1: &Term, term2: &Term) -> Result<(), UnificationError> {
        if term1 == term2 {
            return Ok(());
        }

        match (term1, term2) {
            (Term::Variable(v), t) | (t, Term::Variable(v)) => self.unify_variable(v, t),

            (Term::Constant(c1), Term::Constant(c2)) => Err(UnificationError::ConstantClash(
                c1.name.clone(),
                c2.name.clone(),
            )),

            (Term::Function(f1, args1), Term::Function(f2, args2)) => {
                if f1.name != f2.name {
                    return Err(UnificationError::FunctionClash(
                        f1.name.clone(),
                        f2.name.clone(),
                    ));
                }
                if args1.len() != args2.len() {
                    return Err(UnificationError::ArityMismatch(args1.len(), args2.len()));
                }
                for (arg1, arg2) in args1.iter().zip(args2.iter()) {
                    self.unify(arg1, arg2)?;
                }
                Ok(())
            }

            (Term::Function(f, _), Term::Constant(c)) | (Term::Constant(c), Term::Function(f, _)) => {
                Err(UnificationError::FunctionConstantClash(
                    f.name.clone(),
                    c.name.clone(),
                ))
            }
        }
    }

    fn unify_variable(&mut self, var: &Variable, term: &Term) -> Result<(), UnificationError> {
        if let Some(bound) = self.theta.get(var).cloned() {
            return self.unify_through_binding(bound, term.clone());
        }

        if let Term::Variable(other) = term {
            if other == var {
                return Ok(());
            }
            if let Some(bound) = self.theta.get(other).cloned() {
                return self.unify_through_binding(Term::Variable(var.clone()), bound);
            }
        }

        if self.options.occurs_check && self.occurs(var, term) {
            return Err(UnificationError::OccursCheck(var.clone(), term.clone()));
        }

        self.theta.insert(var.clone(), term.clone());
        Ok(())
    }

    fn unify_through_binding(&mut self, left: Term, right: Term) -> Result<(), UnificationError> {
        if self.pending.iter().any(|(l, r)| *l == left && *r == right) {
            return Ok(());
        }
        self.pending.push((left.clone(), right.clone()));
        let result = self.unify(&left, &right);
        self.pending.pop();
        result
    }

    /// Does `var` occur in `term` once the current bindings are followed?
    fn occurs(&self, var: &Variable, term: &Term) -> bool {
        let mut visited = Vec::new();
        self.occurs_inner(var, term, &mut visited)
    }

    fn occurs_inner(&self, var: &Variable, term: &Term, visited: &mut Vec<Variable>) -> bool {
        match term {
            Term::Variable(v) if v == var => true,
            Term::Variable(v) => {
                if visited.contains(v) {
                    return false;
                }
                visited.push(v.clone());
                match self.theta.get(v) {
                    Some(bound) => self.occurs_inner(var, bound, visited),
                    None => false,
                }
            }
            Term::Constant(_) => false,
            Term::Function(_, args) => args.iter().any(|arg| self.occurs_inner(var, arg, visited)),
        }
    }
}
