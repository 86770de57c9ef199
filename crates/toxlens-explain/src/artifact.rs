//! Artifact loading and the loaded engine bundle
//!
//! The vectorizer and classifier are loaded once, before any request is
//! served, and are immutable afterwards. Load failures are fatal and name
//! the file that failed; the application must never fall back to an
//! untrained model.

use crate::global::global_ranking;
use crate::local::local_contributions;
use crate::model::{LinearClassifier, ModelArtifact};
use crate::predict::predict_toxic_probability;
use crate::vectorizer::{CharNgramVectorizer, VectorizerArtifact};
use std::path::Path;
use toxlens_core::{Error, GlobalRanking, LocalExplanation, Result, ToxicityEstimate};

/// Vectorizer artifact filename inside the artifacts directory
pub const VECTORIZER_FILE: &str = "vectorizer.json";

/// Model artifact filename inside the artifacts directory
pub const MODEL_FILE: &str = "model.json";

/// Optional label-note filename inside the artifacts directory
pub const LABEL_FILE: &str = "label.txt";

const DEFAULT_LABEL_NOTE: &str = "TOXIC";
const DEFAULT_THRESHOLD: f64 = 0.5;

/// The loaded, process-wide, read-only prediction artifacts.
///
/// Handlers receive this as an explicit `Arc` dependency; tests call the
/// free functions in [`crate::local`], [`crate::global`], and
/// [`crate::predict`] with fixture models instead.
pub struct ArtifactBundle {
    vectorizer: CharNgramVectorizer,
    model: Box<dyn LinearClassifier>,
    model_type: &'static str,
    label_note: String,
    default_threshold: f64,
}

impl std::fmt::Debug for ArtifactBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactBundle")
            .field("vectorizer", &self.vectorizer)
            .field("model", &format_args!("Box<dyn LinearClassifier>"))
            .field("model_type", &self.model_type)
            .field("label_note", &self.label_note)
            .field("default_threshold", &self.default_threshold)
            .finish()
    }
}

impl ArtifactBundle {
    /// Load `vectorizer.json`, `model.json`, and the optional `label.txt`
    /// from a directory, validating that the two artifacts belong
    /// together (coefficient count == vocabulary size).
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        let vectorizer_path = dir.join(VECTORIZER_FILE);
        let raw = std::fs::read_to_string(&vectorizer_path)
            .map_err(|e| Error::artifact_load(vectorizer_path.display().to_string(), e.to_string()))?;
        let vectorizer_artifact: VectorizerArtifact = serde_json::from_str(&raw)
            .map_err(|e| Error::artifact_load(vectorizer_path.display().to_string(), e.to_string()))?;
        let vectorizer = CharNgramVectorizer::from_artifact(vectorizer_artifact)
            .map_err(|e| Error::artifact_load(vectorizer_path.display().to_string(), e.to_string()))?;

        let model_path = dir.join(MODEL_FILE);
        let raw = std::fs::read_to_string(&model_path)
            .map_err(|e| Error::artifact_load(model_path.display().to_string(), e.to_string()))?;
        let model_artifact: ModelArtifact = serde_json::from_str(&raw)
            .map_err(|e| Error::artifact_load(model_path.display().to_string(), e.to_string()))?;

        if model_artifact.n_features() != vectorizer.len() {
            return Err(Error::artifact_load(
                model_path.display().to_string(),
                format!(
                    "model has {} coefficients but the vectorizer vocabulary has {} features; \
                     the two artifacts were not trained together",
                    model_artifact.n_features(),
                    vectorizer.len()
                ),
            ));
        }

        let label_path = dir.join(LABEL_FILE);
        let label_note = match std::fs::read_to_string(&label_path) {
            Ok(text) => text.trim().to_string(),
            Err(_) => DEFAULT_LABEL_NOTE.to_string(),
        };

        let model_type = model_artifact.model_type();
        let default_threshold = model_artifact
            .best_threshold()
            .unwrap_or(DEFAULT_THRESHOLD)
            .clamp(0.0, 1.0);

        tracing::info!(
            vocabulary = vectorizer.len(),
            model_type,
            classes = ?model_artifact.classes(),
            "loaded prediction artifacts from {}",
            dir.display()
        );

        Ok(Self {
            vectorizer,
            model: model_artifact.into_classifier(),
            model_type,
            label_note,
            default_threshold,
        })
    }

    /// The loaded vectorizer
    pub fn vectorizer(&self) -> &CharNgramVectorizer {
        &self.vectorizer
    }

    /// The loaded classifier
    pub fn model(&self) -> &dyn LinearClassifier {
        self.model.as_ref()
    }

    /// Human-readable model kind from the artifact tag
    pub fn model_type(&self) -> &'static str {
        self.model_type
    }

    /// Label note shown by the UI (e.g. the trained assay label)
    pub fn label_note(&self) -> &str {
        &self.label_note
    }

    /// Decision threshold recommended by the artifact, defaulting to 0.5.
    /// Requests may override it; the engine itself never thresholds.
    pub fn default_threshold(&self) -> f64 {
        self.default_threshold
    }

    /// Vocabulary size V
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.len()
    }

    /// Tiered toxic-class probability for one SMILES string
    pub fn predict_toxic_probability(&self, smiles: &str) -> Result<ToxicityEstimate> {
        predict_toxic_probability(self.model(), &self.vectorizer, smiles)
    }

    /// Ranked per-molecule contribution tables
    pub fn local_contributions(&self, smiles: &str, k: usize) -> Result<LocalExplanation> {
        local_contributions(self.model(), &self.vectorizer, smiles, k)
    }

    /// Ranked model-wide coefficient tables
    pub fn global_ranking(&self, k: usize) -> Result<GlobalRanking> {
        global_ranking(self.model(), &self.vectorizer, k)
    }

    /// Number of vocabulary features the input actually matched
    pub fn matched_features(&self, smiles: &str) -> usize {
        self.vectorizer.transform(smiles).nnz()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_artifacts(dir: &Path, vectorizer: &str, model: &str) {
        std::fs::write(dir.join(VECTORIZER_FILE), vectorizer).unwrap();
        std::fs::write(dir.join(MODEL_FILE), model).unwrap();
    }

    const VECTORIZER_JSON: &str = r#"{
        "vocabulary": ["C", "O", "N"],
        "ngram_min": 1,
        "ngram_max": 1
    }"#;

    const MODEL_JSON: &str = r#"{
        "model_type": "logistic_regression",
        "coefficients": [0.8, -0.5, 0.1],
        "intercept": -0.2,
        "classes": [0, 1],
        "best_threshold": 0.4
    }"#;

    #[test]
    fn loads_a_matching_artifact_pair() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path(), VECTORIZER_JSON, MODEL_JSON);

        let bundle = ArtifactBundle::load(dir.path()).unwrap();
        assert_eq!(bundle.vocabulary_size(), 3);
        assert_eq!(bundle.model_type(), "logistic_regression");
        assert_eq!(bundle.label_note(), "TOXIC");
        assert_eq!(bundle.default_threshold(), 0.4);

        let estimate = bundle.predict_toxic_probability("CCO").unwrap();
        assert!(estimate.probability > 0.0 && estimate.probability < 1.0);
    }

    #[test]
    fn label_note_comes_from_label_txt() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path(), VECTORIZER_JSON, MODEL_JSON);
        std::fs::write(dir.path().join(LABEL_FILE), "ClinTox CT_TOX\n").unwrap();

        let bundle = ArtifactBundle::load(dir.path()).unwrap();
        assert_eq!(bundle.label_note(), "ClinTox CT_TOX");
    }

    #[test]
    fn missing_vectorizer_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MODEL_FILE), MODEL_JSON).unwrap();

        let err = ArtifactBundle::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(VECTORIZER_FILE), "{err}");
    }

    #[test]
    fn corrupt_model_json_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path(), VECTORIZER_JSON, "{ not json");

        let err = ArtifactBundle::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(MODEL_FILE), "{err}");
    }

    #[test]
    fn mismatched_artifact_pair_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let short_model = r#"{
            "model_type": "logistic_regression",
            "coefficients": [0.8],
            "intercept": 0.0,
            "classes": [0, 1]
        }"#;
        write_artifacts(dir.path(), VECTORIZER_JSON, short_model);

        let err = ArtifactBundle::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("not trained together"), "{err}");
    }

    #[test]
    fn matched_features_counts_vocabulary_overlap() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path(), VECTORIZER_JSON, MODEL_JSON);

        let bundle = ArtifactBundle::load(dir.path()).unwrap();
        assert_eq!(bundle.matched_features("CCO"), 2);
        assert_eq!(bundle.matched_features("zzz"), 0);
    }
}
