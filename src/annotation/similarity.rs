//! Word similarity used as the resolver's fallback score.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Pairwise semantic similarity between two words (lemmas).
///
/// `None` means the model has no opinion, e.g. an out-of-vocabulary word.
pub trait Similarity {
    fn similarity(&self, a: &str, b: &str) -> Option<f32>;
}

/// Similarity model that never scores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSimilarity;

impl Similarity for NoSimilarity {
    fn similarity(&self, _a: &str, _b: &str) -> Option<f32> {
        None
    }
}

/// Word vectors compared by cosine similarity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VectorTable {
    vectors: HashMap<String, Vec<f32>>,
}

impl VectorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `{"word": [f32, ...], ...}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: VectorTable = serde_json::from_str(json)?;
        Ok(Self {
            vectors: table
                .vectors
                .into_iter()
                .map(|(word, v)| (word.to_lowercase(), v))
                .collect(),
        })
    }

    pub fn insert(&mut self, word: &str, vector: Vec<f32>) {
        self.vectors.insert(word.to_lowercase(), vector);
    }

    pub fn with(mut self, word: &str, vector: Vec<f32>) -> Self {
        self.insert(word, vector);
        self
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl Similarity for VectorTable {
    fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        let va = self.vectors.get(a.to_lowercase().as_str())?;
        let vb = self.vectors.get(b.to_lowercase().as_str())?;
        if va.len() != vb.len() {
            return None;
        }
        let dot: f32 = va.iter().zip(vb).map(|(x, y)| x * y).sum();
        let na = va.iter().map(|x| x * x).sum::<f32>().sqrt();
        let nb = vb.iter().map(|x| x * x).sum::<f32>().sqrt();
        if na == 0.0 || nb == 0.0 {
            return None;
        }
        Some(dot / (na * nb))
    }
}

impl<S: Similarity + ?Sized> Similarity for &S {
    fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        (**self).similarity(a, b)
    }
}
