//! Optional sentence-embedding capability.
//!
//! The pipeline never links a model runtime. It consumes embeddings
//! through the [`TextEmbedder`] trait; when no embedder is configured the
//! semantic signal silently degrades to lexical matching.

use once_cell::sync::Lazy;
use thiserror::Error;

/// Errors produced by embedder implementations.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// The embedder rejected or failed on the input.
    #[error("embedding failure: {0}")]
    Failure(String),
}

/// A sentence-embedding model: maps text to a fixed-length vector.
///
/// Implementations must return vectors of a consistent dimension.
pub trait TextEmbedder: Send + Sync {
    /// Embed a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;

    /// Embed a batch of texts. The default loops over [`embed`].
    ///
    /// [`embed`]: TextEmbedder::embed
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Canonical heading phrases whose embeddings anchor the semantic signal.
pub static ARCHETYPE_PHRASES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "Introduction",
        "Abstract",
        "Summary",
        "Conclusion",
        "Discussion",
        "Methodology",
        "Methods",
        "Results",
        "Analysis",
        "Evaluation",
        "Background",
        "Literature Review",
        "Implementation",
        "Experiments",
        "Chapter 1 Overview",
        "Section 2.1 Methods",
        "Appendix A Results",
        "Theoretical Framework",
        "System Design",
        "Future Work",
    ]
});

/// Archetype embeddings plus the embedder that produced them.
///
/// Built once per configured embedder; candidate texts are compared
/// against the nearest archetype at scoring time.
pub struct SemanticIndex {
    embedder: Box<dyn TextEmbedder>,
    archetypes: Vec<Vec<f32>>,
}

impl SemanticIndex {
    /// Embed the archetype phrases with the given embedder. Returns `None`
    /// when the embedder fails on them, degrading to lexical-only scoring.
    pub fn new(embedder: Box<dyn TextEmbedder>) -> Option<Self> {
        match embedder.embed_batch(&ARCHETYPE_PHRASES) {
            Ok(archetypes) if !archetypes.is_empty() => Some(Self {
                embedder,
                archetypes,
            }),
            Ok(_) => None,
            Err(e) => {
                log::warn!("could not build archetype embeddings: {e}");
                None
            }
        }
    }

    /// Cosine similarity between the text and its nearest archetype.
    /// Failures yield `None`; the caller treats that as no signal.
    pub fn best_similarity(&self, text: &str) -> Option<f32> {
        let embedding = match self.embedder.embed(text) {
            Ok(v) => v,
            Err(e) => {
                log::debug!("embedding failed for candidate text: {e}");
                return None;
            }
        };

        self.archetypes
            .iter()
            .map(|a| cosine_similarity(&embedding, a))
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }
}

impl std::fmt::Debug for SemanticIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticIndex")
            .field("archetypes", &self.archetypes.len())
            .finish()
    }
}

/// Cosine similarity of two vectors. Zero vectors and mismatched lengths
/// yield 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
