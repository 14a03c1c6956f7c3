//! The embedding engine: memoized recursion and the calling surface.
//!
//! For two non-empty balanced views the solver decomposes each at its first
//! open's matching close and takes the best of three candidates:
//!
//! 1. drop the first view's outer pair and recurse on its `head ⊕ tail`,
//! 2. symmetrically drop the second view's outer pair,
//! 3. pair the two roots (only when their affinity is positive) and recurse
//!    independently on the two heads and the two tails.
//!
//! Candidates are compared with strict `>` in that order, so the earliest
//! candidate retains a tied score; together with the deterministic
//! decomposition this makes repeated runs byte-identical. Results are
//! memoized per ordered pair of view identities, which is exhaustive because
//! recursion only ever reaches views produced by decomposition, and
//! decompositions are deterministic per identity.

use std::collections::HashMap;

use crate::affinity::NodeAffinity;
use crate::alphabet::{Token, TokenPairing};
use crate::decompose::DecompCache;
use crate::error::{EmbeddingError, Result};
use crate::view::{SeqStore, SeqView};

/// Result of a successful embedding computation.
#[derive(Clone, Debug, PartialEq)]
pub struct Embedding {
    /// Total affinity over the aligned opening pairs. Non-negative and finite.
    pub score: f64,
    /// Balanced subsequence of the first input.
    pub seq1: Vec<Token>,
    /// Balanced subsequence of the second input, token-aligned with `seq1`.
    pub seq2: Vec<Token>,
}

/// Embedding engine configured with a pairing, an affinity and optional
/// resource caps.
///
/// One engine can serve many computations: every [`run`](Self::run) starts
/// with fresh caches and a fresh scratch arena, and tears them down before
/// returning. Construct directly via [`new`](Self::new) or through
/// [`EmbeddingEngineBuilder`](crate::EmbeddingEngineBuilder) when caps are
/// needed.
pub struct EmbeddingEngine<'p> {
    pub(crate) pairing: &'p TokenPairing,
    pub(crate) affinity: NodeAffinity,
    pub(crate) max_depth: Option<usize>,
    pub(crate) max_scratch_bytes: Option<usize>,
}

impl<'p> EmbeddingEngine<'p> {
    /// Engine with the given affinity and no resource caps.
    pub fn new(pairing: &'p TokenPairing, affinity: NodeAffinity) -> Self {
        Self {
            pairing,
            affinity,
            max_depth: None,
            max_scratch_bytes: None,
        }
    }

    /// Compute the maximum-affinity common balanced embedding of two inputs.
    ///
    /// Inputs are validated up front: every token must be an open or a close
    /// of the pairing, and both sequences must be balanced. The recursion is
    /// single-threaded and synchronous; with no `max_depth` cap it needs one
    /// stack frame per removed pair, so depth grows linearly with the input
    /// lengths.
    ///
    /// # Errors
    /// - [`EmbeddingError::UnknownToken`] for a token outside the pairing.
    /// - [`EmbeddingError::Unbalanced`] for unbalanced input.
    /// - [`EmbeddingError::ResourceExhausted`] when a configured cap is hit.
    pub fn run(&self, seq1: &[Token], seq2: &[Token]) -> Result<Embedding> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("embed_run", len1 = seq1.len(), len2 = seq2.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        validate_input(seq1, self.pairing)?;
        validate_input(seq2, self.pairing)?;

        let mut solver = Solver {
            pairing: self.pairing,
            affinity: self.affinity,
            max_depth: self.max_depth,
            max_scratch_bytes: self.max_scratch_bytes,
            store: SeqStore::new(),
            decomp: DecompCache::new(),
            memo: HashMap::new(),
        };
        let s1 = solver.store.intern(seq1.to_vec());
        let s2 = solver.store.intern(seq2.to_vec());
        let best = solver.solve(s1, s2, 0)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            score = best.score,
            memo_entries = solver.memo.len(),
            decompositions = solver.decomp.len(),
            scratch_bytes = solver.store.owned_bytes(),
            "embedding complete"
        );

        // Clone the winners out before the scratch arena is dropped.
        Ok(Embedding {
            score: best.score,
            seq1: solver.store.tokens(best.out1).to_vec(),
            seq2: solver.store.tokens(best.out2).to_vec(),
        })
    }
}

/// Single-call surface: validate, run with fresh caches, release scratch.
///
/// ```
/// use balanced_embedding::{longest_common_balanced_embedding, NodeAffinity, TokenPairing};
///
/// let pairing = TokenPairing::new([(b'(', b')'), (b'[', b']')]).unwrap();
/// let found = longest_common_balanced_embedding(
///     b"(()[])",
///     b"([])()",
///     &pairing,
///     NodeAffinity::StrictEquality,
/// )
/// .unwrap();
/// assert_eq!(found.score, 2.0);
/// assert_eq!(found.seq1, b"([])");
/// ```
pub fn longest_common_balanced_embedding(
    seq1: &[Token],
    seq2: &[Token],
    pairing: &TokenPairing,
    affinity: NodeAffinity,
) -> Result<Embedding> {
    EmbeddingEngine::new(pairing, affinity).run(seq1, seq2)
}

/// Reject unknown tokens and unbalanced nesting before any scratch is built.
fn validate_input(seq: &[Token], pairing: &TokenPairing) -> Result<()> {
    // Stack of (expected close, offset of the open that demands it).
    let mut expected: Vec<(Token, usize)> = Vec::new();
    for (offset, &token) in seq.iter().enumerate() {
        if let Some(close) = pairing.close_of(token) {
            expected.push((close, offset));
        } else if pairing.is_close(token) {
            match expected.pop() {
                Some((want, _)) if want == token => {}
                _ => return Err(EmbeddingError::Unbalanced { offset }),
            }
        } else {
            return Err(EmbeddingError::UnknownToken { token, offset });
        }
    }
    if let Some(&(_, open_offset)) = expected.last() {
        return Err(EmbeddingError::Unbalanced {
            offset: open_offset,
        });
    }
    Ok(())
}

/// Memoized outcome for one ordered pair of views.
#[derive(Clone, Copy)]
struct Scored {
    score: f64,
    out1: SeqView,
    out2: SeqView,
}

/// Per-call scratch: the arena, both caches, and the configuration they
/// answer to. Dropped wholesale when `run` returns, which releases every
/// intermediate buffer at once.
struct Solver<'p> {
    pairing: &'p TokenPairing,
    affinity: NodeAffinity,
    max_depth: Option<usize>,
    max_scratch_bytes: Option<usize>,
    store: SeqStore,
    decomp: DecompCache,
    memo: HashMap<(SeqView, SeqView), Scored>,
}

impl Solver<'_> {
    fn solve(&mut self, s1: SeqView, s2: SeqView, depth: usize) -> Result<Scored> {
        if s1.is_empty() || s2.is_empty() {
            return Ok(Scored {
                score: 0.0,
                out1: SeqView::EMPTY,
                out2: SeqView::EMPTY,
            });
        }
        if let Some(found) = self.memo.get(&(s1, s2)) {
            return Ok(*found);
        }
        if let Some(cap) = self.max_depth {
            if depth >= cap {
                return Err(EmbeddingError::ResourceExhausted {
                    reason: format!("recursion depth cap {cap} reached"),
                });
            }
        }

        let d1 = self.decomp.decompose(&mut self.store, self.pairing, s1)?;
        let d2 = self.decomp.decompose(&mut self.store, self.pairing, s2)?;
        self.check_scratch()?;

        // Candidates in fixed order; the earliest one keeps a tied score.
        let mut best = self.solve(d1.head_tail, s2, depth + 1)?;
        let dropped2 = self.solve(s1, d2.head_tail, depth + 1)?;
        if dropped2.score > best.score {
            best = dropped2;
        }

        let affinity = self.affinity.score(d1.open, d2.open);
        if affinity > 0.0 {
            let heads = self.solve(d1.head, d2.head, depth + 1)?;
            let tails = self.solve(d1.tail, d2.tail, depth + 1)?;
            let paired = affinity + heads.score + tails.score;
            if paired > best.score {
                // Only the winning candidate is ever materialized.
                let out1 = self.emit(d1.open, d1.close, heads.out1, tails.out1);
                let out2 = self.emit(d2.open, d2.close, heads.out2, tails.out2);
                self.check_scratch()?;
                best = Scored {
                    score: paired,
                    out1,
                    out2,
                };
            }
        }

        self.memo.insert((s1, s2), best);
        Ok(best)
    }

    /// Materialize `[open] ⊕ head ⊕ [close] ⊕ tail` as a fresh buffer.
    fn emit(&mut self, open: Token, close: Token, head: SeqView, tail: SeqView) -> SeqView {
        let mut out = Vec::with_capacity(2 + head.len() + tail.len());
        out.push(open);
        out.extend_from_slice(self.store.tokens(head));
        out.push(close);
        out.extend_from_slice(self.store.tokens(tail));
        self.store.intern(out)
    }

    fn check_scratch(&self) -> Result<()> {
        if let Some(cap) = self.max_scratch_bytes {
            let used = self.store.owned_bytes();
            if used > cap {
                return Err(EmbeddingError::ResourceExhausted {
                    reason: format!("scratch arena holds {used} bytes, cap is {cap}"),
                });
            }
        }
        Ok(())
    }
}
