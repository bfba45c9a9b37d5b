//! Mocked latent embeddings.
//!
//! Text is turned into a small fixed-width vector by hashing each
//! whitespace-delimited word into one slot. The result is deterministic and
//! order-dependent; it carries no semantic meaning.

/// Turns text into a vector. Implementations must return vectors of the same
/// width for every input so they can be compared.
pub trait Embedder {
    fn embed(&self, text: &str) -> Vec<f64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    pub const DEFAULT_DIMENSIONS: usize = 3;

    /// A zero width is bumped to one.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIMENSIONS)
    }
}

impl Embedder for HashEmbedder {
    /// Word `i` adds `hash % 100` to slot `i % dimensions`. The remainder
    /// keeps the sign of the hash, so a slot can go negative.
    fn embed(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.dimensions];
        for (i, word) in text.split_whitespace().enumerate() {
            vector[i % self.dimensions] += (word_hash(word) % 100) as f64;
        }
        vector
    }
}

/// Rolling `h * 31 + byte` hash with signed 64-bit wraparound.
pub fn word_hash(word: &str) -> i64 {
    word.bytes()
        .fold(0i64, |h, b| h.wrapping_mul(31).wrapping_add(i64::from(b)))
}

/// Cosine similarity of two vectors, over their common prefix. Returns `0.0`
/// when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let (mut dot, mut mag_a, mut mag_b) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a.sqrt() * mag_b.sqrt())
}
