//! Shared helpers for the integration and property tests.
#![allow(dead_code)]

use balanced_embedding::{NodeAffinity, Token, TokenPairing};

pub fn paren_pairing() -> TokenPairing {
    TokenPairing::new([(b'(', b')'), (b'[', b']')]).unwrap()
}

/// Fold an arbitrary byte script into a balanced sequence over `()` and `[]`.
///
/// Each script byte either closes the innermost open pair or opens a new one
/// of a script-chosen kind; whatever remains open at the end is closed. Every
/// script maps to a balanced sequence, and every balanced sequence over the
/// two pairs is reachable, which makes this a convenient proptest carrier.
pub fn balanced_from_script(script: &[u8]) -> Vec<Token> {
    const OPENS: [(u8, u8); 2] = [(b'(', b')'), (b'[', b']')];
    let mut out = Vec::with_capacity(script.len() * 2);
    let mut stack: Vec<u8> = Vec::new();
    for &b in script {
        if b % 3 == 2 && !stack.is_empty() {
            out.push(stack.pop().unwrap());
        } else {
            let (open, close) = OPENS[(b as usize / 3) % OPENS.len()];
            out.push(open);
            stack.push(close);
        }
    }
    while let Some(close) = stack.pop() {
        out.push(close);
    }
    out
}

pub fn is_balanced(seq: &[Token], pairing: &TokenPairing) -> bool {
    let mut stack = Vec::new();
    for &tok in seq {
        if let Some(close) = pairing.close_of(tok) {
            stack.push(close);
        } else if stack.pop() != Some(tok) {
            return false;
        }
    }
    stack.is_empty()
}

/// Order-preserving containment of `needle` in `haystack`.
pub fn is_subsequence(needle: &[Token], haystack: &[Token]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|tok| rest.any(|h| h == tok))
}

pub fn count_opens(seq: &[Token], pairing: &TokenPairing) -> usize {
    seq.iter().filter(|&&tok| pairing.is_open(tok)).count()
}

/// Sum of affinities over aligned opening positions, or `None` when the two
/// outputs are not aligned open-for-open.
pub fn aligned_affinity_sum(
    out1: &[Token],
    out2: &[Token],
    pairing: &TokenPairing,
    affinity: NodeAffinity,
) -> Option<f64> {
    if out1.len() != out2.len() {
        return None;
    }
    let mut total = 0.0;
    for (&a, &b) in out1.iter().zip(out2.iter()) {
        match (pairing.is_open(a), pairing.is_open(b)) {
            (true, true) => total += affinity.score(a, b),
            (false, false) => {}
            _ => return None,
        }
    }
    Some(total)
}
