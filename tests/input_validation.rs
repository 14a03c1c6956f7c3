mod common;

use balanced_embedding::{
    longest_common_balanced_embedding, EmbeddingEngineBuilder, EmbeddingError, NodeAffinity,
    TokenPairing,
};
use common::paren_pairing;

#[test]
fn malformed_pairings_are_rejected_at_construction() {
    // Two opens mapping to the same close.
    assert!(matches!(
        TokenPairing::new([(b'(', b')'), (b'[', b')')]),
        Err(EmbeddingError::InvalidAlphabet { .. })
    ));
    // A token in both roles.
    assert!(matches!(
        TokenPairing::new([(b'(', b'['), (b'[', b']')]),
        Err(EmbeddingError::InvalidAlphabet { .. })
    ));
    // Self-paired token.
    assert!(matches!(
        TokenPairing::new([(b'"', b'"')]),
        Err(EmbeddingError::InvalidAlphabet { .. })
    ));
}

#[test]
fn unknown_tokens_are_rejected_at_call_entry() {
    let pairing = paren_pairing();
    let err = longest_common_balanced_embedding(
        b"(a)",
        b"()",
        &pairing,
        NodeAffinity::StrictEquality,
    )
    .unwrap_err();
    assert_eq!(
        err,
        EmbeddingError::UnknownToken {
            token: b'a',
            offset: 1
        }
    );

    // The second input is validated too.
    let err = longest_common_balanced_embedding(
        b"()",
        b"[z]",
        &pairing,
        NodeAffinity::StrictEquality,
    )
    .unwrap_err();
    assert_eq!(
        err,
        EmbeddingError::UnknownToken {
            token: b'z',
            offset: 1
        }
    );
}

#[test]
fn unbalanced_inputs_are_rejected_at_call_entry() {
    let pairing = paren_pairing();

    for (input, offset) in [
        (&b"((("[..], 2usize), // opens never closed
        (&b")("[..], 0),       // close with no open
        (&b"(]"[..], 1),       // mismatched close
        (&b"()("[..], 2),      // trailing open
    ] {
        let err =
            longest_common_balanced_embedding(input, b"()", &pairing, NodeAffinity::StrictEquality)
                .unwrap_err();
        assert_eq!(err, EmbeddingError::Unbalanced { offset }, "input {input:?}");
    }
}

#[test]
fn empty_pairing_accepts_only_empty_inputs() {
    let pairing = TokenPairing::new([]).unwrap();
    let found =
        longest_common_balanced_embedding(b"", b"", &pairing, NodeAffinity::StrictEquality)
            .unwrap();
    assert_eq!(found.score, 0.0);

    let err = longest_common_balanced_embedding(b"()", b"", &pairing, NodeAffinity::Universal)
        .unwrap_err();
    assert!(matches!(err, EmbeddingError::UnknownToken { offset: 0, .. }));
}

#[test]
fn depth_cap_aborts_deep_recursions() {
    let pairing = paren_pairing();
    let engine = EmbeddingEngineBuilder::new(&pairing)
        .with_affinity(NodeAffinity::StrictEquality)
        .with_max_depth(2)
        .build();
    let err = engine.run(b"((()))", b"((()))").unwrap_err();
    assert!(matches!(err, EmbeddingError::ResourceExhausted { .. }));

    // Inputs shallow enough to finish under the same cap still succeed.
    let found = engine.run(b"()", b"()").unwrap();
    assert_eq!(found.score, 1.0);
}

#[test]
fn scratch_cap_aborts_allocation_heavy_runs() {
    let pairing = paren_pairing();
    let engine = EmbeddingEngineBuilder::new(&pairing)
        .with_affinity(NodeAffinity::Universal)
        .with_max_scratch_bytes(8)
        .build();
    let err = engine.run(b"(()())", b"(()())").unwrap_err();
    assert!(matches!(err, EmbeddingError::ResourceExhausted { .. }));
}

#[test]
fn errors_render_their_diagnostics() {
    let err = EmbeddingError::Unbalanced { offset: 7 };
    assert_eq!(err.to_string(), "unbalanced sequence at offset 7");

    let err = EmbeddingError::UnknownToken {
        token: 0x2a,
        offset: 3,
    };
    assert_eq!(err.to_string(), "unknown token 0x2a at offset 3");
}
