#![cfg(feature = "heavy")]
mod common;

use balanced_embedding::{longest_common_balanced_embedding, NodeAffinity};
use common::{balanced_from_script, count_opens, is_subsequence, paren_pairing};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_balanced(rng: &mut StdRng, script_len: usize) -> Vec<u8> {
    let script: Vec<u8> = (0..script_len).map(|_| rng.gen::<u8>()).collect();
    balanced_from_script(&script)
}

#[test]
fn heavy_stress_self_match_medium() {
    let mut rng = StdRng::seed_from_u64(123);
    let s = random_balanced(&mut rng, 96);
    let pairing = paren_pairing();
    let found =
        longest_common_balanced_embedding(&s, &s, &pairing, NodeAffinity::Universal).unwrap();
    assert_eq!(found.score, count_opens(&s, &pairing) as f64);
    assert_eq!(found.seq1, s);
}

#[test]
fn heavy_stress_cross_match_medium() {
    let mut rng = StdRng::seed_from_u64(456);
    let pairing = paren_pairing();
    let s1 = random_balanced(&mut rng, 80);
    let s2 = random_balanced(&mut rng, 80);
    let found =
        longest_common_balanced_embedding(&s1, &s2, &pairing, NodeAffinity::StrictEquality)
            .unwrap();
    assert!(is_subsequence(&found.seq1, &s1));
    assert!(is_subsequence(&found.seq2, &s2));
    assert!(found.score <= count_opens(&s1, &pairing).min(count_opens(&s2, &pairing)) as f64);
}
