use crate::affinity::NodeAffinity;
use crate::alphabet::TokenPairing;
use crate::engine::EmbeddingEngine;

pub struct EmbeddingEngineBuilder<'p> {
    pairing: &'p TokenPairing,
    affinity: NodeAffinity,
    max_depth: Option<usize>,
    max_scratch_bytes: Option<usize>,
}

impl<'p> EmbeddingEngineBuilder<'p> {
    pub fn new(pairing: &'p TokenPairing) -> Self {
        Self {
            pairing,
            affinity: NodeAffinity::StrictEquality,
            max_depth: None,
            max_scratch_bytes: None,
        }
    }
    pub fn with_affinity(mut self, affinity: NodeAffinity) -> Self {
        self.affinity = affinity;
        self
    }
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
    pub fn with_max_scratch_bytes(mut self, max_scratch_bytes: usize) -> Self {
        self.max_scratch_bytes = Some(max_scratch_bytes);
        self
    }
    pub fn build(self) -> EmbeddingEngine<'p> {
        EmbeddingEngine {
            pairing: self.pairing,
            affinity: self.affinity,
            max_depth: self.max_depth,
            max_scratch_bytes: self.max_scratch_bytes,
        }
    }
}
