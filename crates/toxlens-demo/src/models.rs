//! Wire types for the JSON API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use toxlens_core::{LocalExplanation, ProbabilitySource};

/// Body of `POST /api/predict`
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Compound name or pasted SMILES
    pub query: String,

    /// Per-request decision threshold; defaults to the artifact's
    /// recommendation
    pub threshold: Option<f64>,

    /// Rows per explanation table
    pub top_k: Option<usize>,
}

/// Response of `POST /api/predict`
#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    /// The original query
    pub query: String,

    /// The SMILES actually predicted on (after salt stripping)
    pub smiles: String,

    /// Where the SMILES came from
    pub smiles_source: String,

    /// Probability of the toxic class
    pub probability: f64,

    /// Which tier produced the probability
    pub probability_source: ProbabilitySource,

    /// True when the probability came from a fallback tier
    pub approximate: bool,

    /// The threshold that was applied
    pub threshold: f64,

    /// probability >= threshold
    pub toxic: bool,

    /// How many vocabulary features the input matched; 0 means the model
    /// has no information about this input
    pub matched_features: usize,

    /// Local contribution tables; absent when the model exposes no
    /// coefficients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<LocalExplanation>,
}

/// Body of `POST /api/resolve`
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    /// Free-text compound name
    pub name: String,
}

/// Response of `GET /api/model`
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfoResponse {
    /// Label note from the artifacts (e.g. the trained assay label)
    pub label_note: String,

    /// Model kind from the artifact tag
    pub model_type: String,

    /// Class labels as fit
    pub classes: Vec<i64>,

    /// Vocabulary size V
    pub vocabulary_size: usize,

    /// Threshold recommended by the artifacts
    pub default_threshold: f64,
}

/// One completed prediction, kept in the bounded in-memory history
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRecord {
    /// Record id
    pub id: String,

    /// When the prediction completed
    pub timestamp: DateTime<Utc>,

    /// The original query
    pub query: String,

    /// The SMILES predicted on
    pub smiles: String,

    /// Where the SMILES came from
    pub smiles_source: String,

    /// Probability of the toxic class
    pub probability: f64,

    /// Binary label at the threshold that was applied
    pub toxic: bool,
}
