//! Example: largest common balanced embedding of two bracket sequences.
//!
//! Run with:
//! `cargo run --example embed`

use balanced_embedding::{longest_common_balanced_embedding, NodeAffinity, TokenPairing};

fn main() {
    let pairing = TokenPairing::new([(b'(', b')'), (b'[', b']')]).unwrap();

    let seq1 = b"(()[()[]])[]";
    let seq2 = b"([()]())[]";

    let found = longest_common_balanced_embedding(
        seq1,
        seq2,
        &pairing,
        NodeAffinity::StrictEquality,
    )
    .unwrap();

    println!("score: {}", found.score);
    println!("embedded in seq1: {}", String::from_utf8_lossy(&found.seq1));
    println!("embedded in seq2: {}", String::from_utf8_lossy(&found.seq2));

    // Any open may pair with any open under the universal affinity, so the
    // score counts the largest common nesting shape instead.
    let shape = longest_common_balanced_embedding(seq1, seq2, &pairing, NodeAffinity::Universal)
        .unwrap();
    println!("shape score: {}", shape.score);
}
