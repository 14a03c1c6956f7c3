//! Decomposition of balanced sequences, cached by view identity.
//!
//! A non-empty balanced sequence splits at the close matching its first open
//! into `head` (the tokens strictly between the pair) and `tail` (the tokens
//! strictly after). `head ⊕ tail`, the sequence with its outer pair removed,
//! is materialized into a buffer of its own because the recursion slices into
//! it and needs stable backing storage. Each distinct view is scanned at most
//! once; repeated lookups return the record computed the first time, including
//! the identity of its `head ⊕ tail` buffer, which the memo table depends on
//! being stable.

use std::collections::HashMap;

use crate::alphabet::{Token, TokenPairing};
use crate::error::{EmbeddingError, Result};
use crate::view::{SeqStore, SeqView};

/// Split of a non-empty balanced sequence at its first open's matching close.
///
/// For a view `S`: `head = S[1..k)`, `tail = S[k+1..)` where `k` is the
/// matching close index. `head`, `tail` and `head_tail` are balanced, and
/// `|head| + |tail| = |S| - 2`.
#[derive(Clone, Copy, Debug)]
pub struct Decomposition {
    /// First token of the sequence (an open).
    pub open: Token,
    /// The close paired with `open`.
    pub close: Token,
    /// Tokens strictly between the outer pair.
    pub head: SeqView,
    /// Tokens strictly after the matching close.
    pub tail: SeqView,
    /// `head ⊕ tail`, freshly materialized in a buffer of its own.
    pub head_tail: SeqView,
}

/// Identity-keyed cache of decompositions.
#[derive(Default)]
pub struct DecompCache {
    table: HashMap<SeqView, Decomposition>,
}

impl DecompCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct views decomposed so far.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Decompose a non-empty view, scanning it on the first visit.
    ///
    /// The matching close index is the smallest `k > 0` at which the nesting
    /// depth returns to zero *and* `S[k]` is the close paired with `S[0]`.
    ///
    /// # Errors
    /// [`EmbeddingError::Unbalanced`] when `S[0]` is not an open or no
    /// matching close exists. The offset is relative to the presented view.
    pub fn decompose(
        &mut self,
        store: &mut SeqStore,
        pairing: &TokenPairing,
        seq: SeqView,
    ) -> Result<Decomposition> {
        debug_assert!(!seq.is_empty(), "empty views are never decomposed");
        if let Some(found) = self.table.get(&seq) {
            return Ok(*found);
        }

        let tokens = store.tokens(seq);
        let open = tokens[0];
        let close = pairing
            .close_of(open)
            .ok_or(EmbeddingError::Unbalanced { offset: 0 })?;

        let mut depth = 1isize;
        let mut close_idx = None;
        for (i, &tok) in tokens.iter().enumerate().skip(1) {
            if pairing.is_open(tok) {
                depth += 1;
            } else {
                depth -= 1;
            }
            if depth == 0 && tok == close {
                close_idx = Some(i);
                break;
            }
        }
        let k = close_idx.ok_or(EmbeddingError::Unbalanced { offset: 0 })?;

        let head = seq.slice(1, k);
        let tail = seq.slice(k + 1, seq.len());
        let head_tail = store.concat(head, tail);
        let record = Decomposition {
            open,
            close,
            head,
            tail,
            head_tail,
        };
        self.table.insert(seq, record);
        Ok(record)
    }
}
