//! Property-based tests for unification and substitution using proptest.

use super::{unify, unify_with, Substitution, UnifyOptions};
use crate::logic::{Clause, Literal, Term, Variable};
use proptest::prelude::*;

/// Term description: small fixed symbol pools keep collisions likely
#[derive(Debug, Clone)]
enum TermDesc {
    Var(u8),                 // Variable index 0-3
    Const(u8),               // Constant index 0-3
    Func(u8, Vec<TermDesc>), // Function index 0-1, with args
}

fn arb_term_desc(max_depth: u32) -> BoxedStrategy<TermDesc> {
    if max_depth == 0 {
        prop_oneof![
            (0..4u8).prop_map(TermDesc::Var),
            (0..4u8).prop_map(TermDesc::Const),
        ]
        .boxed()
    } else {
        prop_oneof![
            3 => (0..4u8).prop_map(TermDesc::Var),
            3 => (0..4u8).prop_map(TermDesc::Const),
            2 => (0..2u8, proptest::collection::vec(arb_term_desc(max_depth - 1), 1..=2))
                .prop_map(|(f, args)| TermDesc::Func(f, args)),
        ]
        .boxed()
    }
}

fn arb_ground_term_desc(max_depth: u32) -> BoxedStrategy<TermDesc> {
    if max_depth == 0 {
        (0..4u8).prop_map(TermDesc::Const).boxed()
    } else {
        prop_oneof![
            3 => (0..4u8).prop_map(TermDesc::Const),
            2 => (0..2u8, proptest::collection::vec(arb_ground_term_desc(max_depth - 1), 1..=2))
                .prop_map(|(f, args)| TermDesc::Func(f, args)),
        ]
        .boxed()
    }
}

fn build_term(desc: &TermDesc) -> Term {
    match desc {
        TermDesc::Var(i) => Term::var(format!("x{}", i)),
        TermDesc::Const(i) => Term::constant(format!("C{}", i)),
        TermDesc::Func(f, args) => {
            Term::function(format!("F{}", f), args.iter().map(build_term).collect())
        }
    }
}

fn arb_term(max_depth: u32) -> impl Strategy<Value = Term> {
    arb_term_desc(max_depth).prop_map(|desc| build_term(&desc))
}

fn arb_ground_term(max_depth: u32) -> impl Strategy<Value = Term> {
    arb_ground_term_desc(max_depth).prop_map(|desc| build_term(&desc))
}

fn arb_substitution() -> impl Strategy<Value = Substitution> {
    proptest::collection::vec((0..4u8, arb_ground_term(2)), 0..4).prop_map(|bindings| {
        bindings
            .into_iter()
            .map(|(i, t)| (Variable::new(format!("x{}", i)), t))
            .collect()
    })
}

fn arb_literal() -> impl Strategy<Value = Literal> {
    (0..2u8, proptest::collection::vec(arb_term(2), 0..3), any::<bool>())
        .prop_map(|(p, args, polarity)| Literal::atom(format!("P{}", p), args, polarity))
}

const CHECKED: UnifyOptions = UnifyOptions { occurs_check: true };

// =========================================================================
// Unification properties
// =========================================================================

proptest! {
    /// Soundness: if unify(s, t) = σ, then sσ = tσ
    #[test]
    fn unification_soundness(t1 in arb_term(3), t2 in arb_term(3)) {
        if let Ok(sigma) = unify_with(&t1, &t2, Substitution::new(), CHECKED) {
            let t1_sigma = t1.apply_substitution(&sigma);
            let t2_sigma = t2.apply_substitution(&sigma);
            prop_assert_eq!(t1_sigma, t2_sigma, "unifier must make terms equal");
        }
    }

    /// Symmetry: unify(s, t) succeeds iff unify(t, s) succeeds
    #[test]
    fn unification_symmetry(t1 in arb_term(3), t2 in arb_term(3)) {
        let r1 = unify_with(&t1, &t2, Substitution::new(), CHECKED);
        let r2 = unify_with(&t2, &t1, Substitution::new(), CHECKED);
        prop_assert_eq!(r1.is_ok(), r2.is_ok(), "unification should be symmetric");
    }

    /// Identity: a ground term unifies with itself under the empty substitution
    #[test]
    fn unification_identity_ground(t in arb_ground_term(3)) {
        let sigma = unify(&t, &t, Substitution::new());
        prop_assert_eq!(sigma, Ok(Substitution::new()));
    }

    /// Unification without the occurs-check always terminates and agrees
    /// with the checked variant whenever the checked variant succeeds
    #[test]
    fn unchecked_accepts_everything_checked_accepts(t1 in arb_term(3), t2 in arb_term(3)) {
        let checked = unify_with(&t1, &t2, Substitution::new(), CHECKED);
        let unchecked = unify(&t1, &t2, Substitution::new());
        if checked.is_ok() {
            prop_assert!(unchecked.is_ok());
        }
    }

    /// Occurs check: x = F(...x...) fails when the check is enabled
    #[test]
    fn unification_occurs_check(depth in 1..4u32) {
        let x = Term::var("x");
        let mut term = x.clone();
        for _ in 0..depth {
            term = Term::function("F", vec![term]);
        }
        prop_assert!(unify_with(&x, &term, Substitution::new(), CHECKED).is_err());
    }
}

// =========================================================================
// Substitution properties
// =========================================================================

proptest! {
    /// Empty substitution is identity
    #[test]
    fn substitution_identity(t in arb_term(3)) {
        let t_applied = t.apply_substitution(&Substitution::new());
        prop_assert_eq!(t, t_applied);
    }

    /// Application is a homomorphism: clause = literals = arguments
    #[test]
    fn substitution_homomorphism(
        literals in proptest::collection::vec(arb_literal(), 0..4),
        sigma in arb_substitution(),
    ) {
        let clause = Clause::new(literals.clone());

        let by_clause = clause.apply_substitution(&sigma);
        let by_literal: Clause = clause
            .literals()
            .iter()
            .map(|lit| lit.apply_substitution(&sigma))
            .collect();
        let by_argument: Clause = clause
            .literals()
            .iter()
            .map(|lit| Literal {
                predicate: lit.predicate.clone(),
                args: lit.args.iter().map(|t| t.apply_substitution(&sigma)).collect(),
                polarity: lit.polarity,
            })
            .collect();

        prop_assert_eq!(&by_clause, &by_literal);
        prop_assert_eq!(&by_clause, &by_argument);
    }

    /// Ground substitutions make every bound variable disappear
    #[test]
    fn ground_substitution_removes_bound_variables(t in arb_term(3), sigma in arb_substitution()) {
        let applied = t.apply_substitution(&sigma);
        for (var, _) in sigma.iter() {
            prop_assert!(!applied.contains_variable(var));
        }
    }
}
