//! Core types for ToxLens

use serde::{Deserialize, Serialize};

/// Sparse feature vector for one vectorized SMILES string.
///
/// Indices are positions in the vectorizer's fixed vocabulary, strictly
/// ascending; values are the nonnegative occurrence-derived weights at
/// those positions. An all-zero vector (no vocabulary overlap) is a valid
/// value, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    /// Vocabulary positions with nonzero weight, ascending
    pub indices: Vec<usize>,

    /// Weight at each position, parallel to `indices`
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Create a sparse vector from parallel index/value lists
    pub fn new(indices: Vec<usize>, values: Vec<f64>) -> Self {
        debug_assert_eq!(indices.len(), values.len());
        Self { indices, values }
    }

    /// Number of nonzero positions
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Whether the input shared no features with the vocabulary
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over (vocabulary index, weight) pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }
}

/// One feature's contribution to a specific prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionEntry {
    /// The vocabulary n-gram
    pub ngram: String,

    /// Raw feature value in this input
    pub value: f64,

    /// value x oriented coefficient, rounded to 6 decimals
    pub contribution: f64,
}

/// One feature's model-wide oriented weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeight {
    /// The vocabulary n-gram
    pub ngram: String,

    /// Oriented coefficient; positive pushes toward toxic
    pub weight: f64,
}

/// Ranked local explanation for one molecule.
///
/// Both tables are empty when the input shares no n-grams with the
/// vocabulary; callers render that as "the model has no information",
/// distinct from a computation failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalExplanation {
    /// Strongest positive contributions, descending
    pub toward_toxic: Vec<ContributionEntry>,

    /// Strongest negative contributions, most negative first
    pub toward_safe: Vec<ContributionEntry>,
}

impl LocalExplanation {
    /// Whether the vectorizer found no usable features in the input
    pub fn is_empty(&self) -> bool {
        self.toward_toxic.is_empty() && self.toward_safe.is_empty()
    }
}

/// Ranked model-wide explanation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalRanking {
    /// Highest-weight features, descending
    pub toward_toxic: Vec<FeatureWeight>,

    /// Lowest-weight features, most negative first
    pub toward_safe: Vec<FeatureWeight>,
}

/// How a toxicity probability was obtained, best tier first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilitySource {
    /// The model's own probability function
    Calibrated,

    /// Logistic transform of a decision-function score
    DecisionFunction,

    /// Raw predicted label cast to 0.0/1.0
    LabelOnly,
}

/// Predicted probability of the toxic class, tagged with its tier.
///
/// Threshold comparison is deliberately absent here: binarizing is the
/// caller's job, with a per-request threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToxicityEstimate {
    /// Probability of the toxic class, in [0, 1]
    pub probability: f64,

    /// Which fallback tier produced the number
    pub source: ProbabilitySource,
}

impl ToxicityEstimate {
    /// Create a new estimate
    pub fn new(probability: f64, source: ProbabilitySource) -> Self {
        Self {
            probability,
            source,
        }
    }

    /// True when the number came from a fallback tier and the UI should
    /// warn that it is approximate
    pub fn is_approximate(&self) -> bool {
        self.source != ProbabilitySource::Calibrated
    }
}
