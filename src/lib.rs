//! Longest Common Balanced Subsequence Embedding (LCSE)
//!
//! Balanced (parenthesis-like) token sequences encode ordered labeled trees,
//! so the maximum-affinity common balanced subsequence of two encodings is
//! the largest common ordered embedded subtree. This crate implements the
//! dynamic program that finds it.
//!
//! ## Core idea
//! 1. Describe the alphabet with a [`TokenPairing`] (an injective
//!    `open -> close` byte map).
//! 2. The solver decomposes each sequence at its first open's matching close
//!    and recurses over three candidates: drop either outer pair, or pair the
//!    two roots when their [`NodeAffinity`] is positive.
//! 3. Sub-results are memoized by *view identity*, the (buffer, offset,
//!    length) triple, so equal-content slices of different buffers never
//!    collide.
//!
//! ## Quick start
//! ```
//! use balanced_embedding::{longest_common_balanced_embedding, NodeAffinity, TokenPairing};
//!
//! let pairing = TokenPairing::new([(b'(', b')'), (b'[', b']')]).unwrap();
//! let found = longest_common_balanced_embedding(
//!     b"(()[])",
//!     b"([])()",
//!     &pairing,
//!     NodeAffinity::StrictEquality,
//! )
//! .unwrap();
//! assert_eq!(found.score, 2.0);
//! assert_eq!(found.seq1, b"([])");
//! assert_eq!(found.seq2, b"([])");
//! ```
//!
//! The computation is single-threaded and deterministic: identical inputs
//! produce identical outputs, including tie-broken ones. Resource caps
//! (recursion depth, scratch memory) are available through
//! [`EmbeddingEngineBuilder`].

pub mod affinity;
pub mod alphabet;
pub mod builder;
pub mod decompose;
pub mod engine;
pub mod error;
pub mod view;

pub use crate::affinity::NodeAffinity;
pub use crate::alphabet::{Token, TokenPairing};
pub use crate::builder::EmbeddingEngineBuilder;
pub use crate::engine::{longest_common_balanced_embedding, Embedding, EmbeddingEngine};
pub use crate::error::{EmbeddingError, Result};
pub use crate::view::{BufferId, SeqStore, SeqView};
