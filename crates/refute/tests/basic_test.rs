//! Integration tests for the prover

use refute::{
    parse_knowledge_base, saturate, verify_proof, LimitReason, ProofResult, ProverConfig,
    SearchPhase,
};

fn prove(text: &str) -> (ProofResult, refute::Prover) {
    let clauses = parse_knowledge_base(text).unwrap();
    saturate(clauses, ProverConfig::default()).unwrap()
}

#[test]
fn test_simple_resolution() {
    let kb = r#"
        P(A)
        ~P(x) | Q(x)
        ~Q(A)
    "#;

    let (result, prover) = prove(kb);
    match result {
        ProofResult::Proof(proof) => {
            verify_proof(&proof, prover.repository()).expect("proof verification failed");
            assert_eq!(proof.steps.len(), 2);
        }
        _ => panic!("Expected proof, got {:?}", result),
    }
}

#[test]
fn test_marco_hates_cesar() {
    let kb = r#"
        # Marco es hombre y pompeyano; los pompeyanos son romanos
        Hombre(Marco)
        Pompeyano(Marco)
        ~Pompeyano(x) | Romano(x)
        Gobernante(Cesar)
        # Todo romano es leal a Cesar o lo odia
        ~Romano(x) | Leal(x,Cesar) | Odia(x,Cesar)
        # Nadie intenta asesinar a un gobernante al que es leal
        ~Hombre(x) | ~Gobernante(y) | ~IntentaAsesinar(x,y) | ~Leal(x,y)
        IntentaAsesinar(Marco,Cesar)
        # Negated goal
        ~Odia(Marco,Cesar)
    "#;

    let (result, prover) = prove(kb);
    match result {
        ProofResult::Proof(proof) => {
            verify_proof(&proof, prover.repository()).expect("proof verification failed");
            assert!(proof.steps.last().unwrap().conclusion.is_empty());
        }
        _ => panic!("Expected proof, got {:?}", result),
    }
}

#[test]
fn test_propositional_chain() {
    let (result, prover) = prove("A\n~A | B\n~B | C\n~C");
    let proof = result.proof().expect("expected proof");
    assert_eq!(proof.steps.len(), 3);
    verify_proof(proof, prover.repository()).unwrap();
}

#[test]
fn test_satisfiable_formula() {
    let kb = r#"
        P(A)
        ~P(x) | Q(x)
        R(B)
    "#;

    let (result, prover) = prove(kb);
    assert_eq!(result, ProofResult::Saturated);
    assert_eq!(prover.phase(), SearchPhase::Saturated);
    assert!(!result.is_proof());
}

#[test]
fn test_no_resolvents() {
    let (result, prover) = prove("P(A)\nQ(B)");
    assert_eq!(result, ProofResult::Saturated);
    assert_eq!(prover.repository().len(), 2);
}

#[test]
fn test_function_terms() {
    let kb = r#"
        Padre(Juan, Hijo(Juan))
        ~Padre(x, y) | Progenitor(x, y)
        ~Progenitor(Juan, Hijo(z))
    "#;

    let (result, prover) = prove(kb);
    let proof = result.proof().expect("expected proof");
    verify_proof(proof, prover.repository()).unwrap();
}

#[test]
fn test_occurs_check_is_configurable() {
    let kb = "P(x, F(x))\n~P(y, y)";

    // Without the occurs-check x = y = F(x) is accepted
    let (result, _) = prove(kb);
    assert!(result.is_proof());

    let config = ProverConfig {
        occurs_check: true,
        ..Default::default()
    };
    let (result, _) = saturate(parse_knowledge_base(kb).unwrap(), config).unwrap();
    assert_eq!(result, ProofResult::Saturated);
}

#[test]
fn test_unbounded_search_hits_limit() {
    let config = ProverConfig {
        max_clauses: 50,
        ..Default::default()
    };
    let clauses = parse_knowledge_base("Nat(Cero)\n~Nat(x) | Nat(Suc(x))\n~Nat(Menos)").unwrap();
    let (result, prover) = saturate(clauses, config).unwrap();
    assert_eq!(result, ProofResult::ResourceLimit(LimitReason::Clauses));
    assert_eq!(prover.repository().len(), 50);
}

#[test]
fn test_rerun_is_idempotent() {
    let clauses = parse_knowledge_base("P(A)\n~P(x) | Q(x)\nR(B)").unwrap();
    let (first, mut prover) = saturate(clauses, ProverConfig::default()).unwrap();
    let size = prover.repository().len();

    let second = prover.prove().unwrap();
    assert_eq!(first, second);
    assert_eq!(prover.repository().len(), size);
}
