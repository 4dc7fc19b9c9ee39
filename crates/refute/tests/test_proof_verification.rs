//! Every proof the prover returns must re-check step by step.

use refute::{
    build_proof, parse_knowledge_base, saturate, verify_proof, ClauseId, ProofReport,
    ProverConfig, VerificationError,
};
use std::collections::HashSet;

const PROBLEMS: &[&str] = &[
    "A\n~A",
    "P(x) | Q(x)\n~P(A)\n~Q(A)",
    "A\n~A | B\n~B | C\n~C",
    "Padre(Juan, Hijo(Juan))\n~Padre(x, y) | Progenitor(x, y)\n~Progenitor(Juan, Hijo(z))",
    "Hombre(Marco)\nPompeyano(Marco)\n~Pompeyano(x) | Romano(x)\nGobernante(Cesar)\n\
     ~Romano(x) | Leal(x,Cesar) | Odia(x,Cesar)\n\
     ~Hombre(x) | ~Gobernante(y) | ~IntentaAsesinar(x,y) | ~Leal(x,y)\n\
     IntentaAsesinar(Marco,Cesar)\n~Odia(Marco,Cesar)",
];

fn configs() -> Vec<ProverConfig> {
    vec![
        ProverConfig::default(),
        ProverConfig {
            unit_preference: false,
            ..Default::default()
        },
        ProverConfig {
            workers: 2,
            chunk_size: 3,
            ..Default::default()
        },
    ]
}

#[test]
fn test_all_proofs_verify() {
    for problem in PROBLEMS {
        for config in configs() {
            let clauses = parse_knowledge_base(problem).unwrap();
            let (result, prover) = saturate(clauses, config).unwrap();
            let proof = result
                .proof()
                .unwrap_or_else(|| panic!("no proof for {:?}", problem));
            verify_proof(proof, prover.repository())
                .unwrap_or_else(|e| panic!("{:?}: {}", problem, e));
        }
    }
}

#[test]
fn test_parents_precede_steps() {
    for problem in PROBLEMS {
        let clauses = parse_knowledge_base(problem).unwrap();
        let (result, prover) = saturate(clauses, ProverConfig::default()).unwrap();
        let proof = result.proof().unwrap();
        let repo = prover.repository();

        let mut seen: HashSet<ClauseId> = HashSet::new();
        for step in &proof.steps {
            for premise in step.premises {
                assert!(premise < step.clause_id);
                let is_input = repo.get(premise).unwrap().derivation.is_input();
                assert!(is_input || seen.contains(&premise));
            }
            assert!(seen.insert(step.clause_id), "clause {} emitted twice", step.clause_id);
        }

        let (last, rest) = proof.steps.split_last().unwrap();
        assert!(last.conclusion.is_empty());
        assert_eq!(last.clause_id, proof.empty_clause_id);
        assert!(rest.iter().all(|s| !s.conclusion.is_empty()));
    }
}

#[test]
fn test_rebuilt_proof_matches() {
    let clauses = parse_knowledge_base("P(x) | Q(x)\n~P(A)\n~Q(A)").unwrap();
    let (result, prover) = saturate(clauses, ProverConfig::default()).unwrap();
    let proof = result.proof().unwrap();
    let rebuilt = build_proof(proof.empty_clause_id, prover.repository()).unwrap();
    assert_eq!(&rebuilt, proof);
}

#[test]
fn test_tampered_proof_rejected() {
    let clauses = parse_knowledge_base("P(x) | Q(x)\n~P(A)\n~Q(A)").unwrap();
    let (result, prover) = saturate(clauses, ProverConfig::default()).unwrap();
    let mut proof = result.proof().unwrap().clone();

    // Drop the step producing Q(A); the refutation step now cites an unknown premise
    proof.steps.remove(0);
    assert!(matches!(
        verify_proof(&proof, prover.repository()),
        Err(VerificationError::InvalidPremise { step_idx: 0, .. })
    ));
}

#[test]
fn test_report_trace() {
    let clauses = parse_knowledge_base("P(x) | Q(x)\n~P(A)\n~Q(A)").unwrap();
    let (result, _) = saturate(clauses, ProverConfig::default()).unwrap();
    let report = ProofReport::from_result(&result);

    let text = report.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Step 1: "));
    assert!(lines[0].ends_with("=> [3] Q(A)"));
    assert!(lines[1].starts_with("Step 2: [2] ~Q(A) with [3] Q(A)"));
    assert!(lines[1].ends_with("=> [5] ⊥"));
    assert_eq!(lines[2], "Result: DEMONSTRATED in 2 steps");
}
