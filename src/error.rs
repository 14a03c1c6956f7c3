//! Error types for embedding computations.
//!
//! Every error is terminal for the call that produced it: the engine never
//! retries internally, and all scratch state is discarded when an error
//! propagates out of [`run`](crate::EmbeddingEngine::run).

use thiserror::Error;

/// Result type for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors reported by alphabet construction and the embedding engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmbeddingError {
    /// The open/close pairing is malformed: a duplicate open, a non-injective
    /// close target, or a token used as both open and close.
    #[error("invalid alphabet: {reason}")]
    InvalidAlphabet { reason: String },

    /// An input token is neither an open nor a close of the pairing.
    #[error("unknown token 0x{token:02x} at offset {offset}")]
    UnknownToken { token: u8, offset: usize },

    /// A sequence has no matching close for one of its opens, a close with no
    /// matching open, or a close that does not pair with the open it ends.
    /// The offset points at the token where matching failed.
    #[error("unbalanced sequence at offset {offset}")]
    Unbalanced { offset: usize },

    /// A configured recursion-depth or scratch-memory cap was exceeded.
    #[error("resource limit exceeded: {reason}")]
    ResourceExhausted { reason: String },
}
