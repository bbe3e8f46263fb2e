use std::collections::HashSet;

use rand::RngCore;

use packguard_engine::entropy::{
    client_entropy, commitment, fair_rng, server_entropy, verify_commitment,
};

#[test]
fn server_entropy_is_distinct_across_100_calls() {
    let mut seen = HashSet::new();
    for i in 0..100 {
        let token = server_entropy().expect("os entropy available");
        assert!(seen.insert(token), "server entropy repeated at call {}", i);
    }
}

#[test]
fn client_entropy_is_distinct_across_100_calls() {
    let mut seen = HashSet::new();
    for i in 0..100 {
        let token = client_entropy().expect("os entropy available");
        assert!(seen.insert(token), "client entropy repeated at call {}", i);
    }
}

#[test]
fn entropy_tokens_are_64_hex_chars() {
    let token = server_entropy().expect("os entropy available");
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn commitment_round_trip_verifies() {
    let secret = server_entropy().expect("os entropy available");
    let published = commitment(&secret);
    assert!(verify_commitment(&published, &secret));
}

#[test]
fn tampered_reveal_fails_verification() {
    let secret = server_entropy().expect("os entropy available");
    let published = commitment(&secret);
    assert!(!verify_commitment(&published, "not-the-secret"));
}

#[test]
fn fair_rng_is_deterministic_in_its_inputs() {
    let mut a = fair_rng("server-seed", "client-seed");
    let mut b = fair_rng("server-seed", "client-seed");
    let seq_a: Vec<u64> = (0..10).map(|_| a.next_u64()).collect();
    let seq_b: Vec<u64> = (0..10).map(|_| b.next_u64()).collect();
    assert_eq!(seq_a, seq_b, "same revealed entropy must re-derive the same draw rng");
}

#[test]
fn fair_rng_differs_when_either_side_changes() {
    let mut base = fair_rng("server-seed", "client-seed");
    let mut other_client = fair_rng("server-seed", "different-client");
    let mut other_server = fair_rng("different-server", "client-seed");
    let a: Vec<u64> = (0..4).map(|_| base.next_u64()).collect();
    let b: Vec<u64> = (0..4).map(|_| other_client.next_u64()).collect();
    let c: Vec<u64> = (0..4).map(|_| other_server.next_u64()).collect();
    assert_ne!(a, b);
    assert_ne!(a, c);
}
