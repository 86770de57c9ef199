//! Linear classifier trait and artifact-backed implementations
//!
//! The classifier is consumed pre-trained and read-only. Coefficients are
//! signed relative to the model's internal second class; callers must go
//! through [`crate::orientation`] before interpreting them.

use serde::{Deserialize, Serialize};
use toxlens_core::SparseVector;

/// Seam between the explanation engine and a loaded classifier.
///
/// Tests substitute fixture implementations; production code uses the
/// models deserialized from `model.json`.
pub trait LinearClassifier: Send + Sync {
    /// Ordered class labels as fit; position 1 is the class the raw
    /// coefficient signs point toward
    fn classes(&self) -> &[i64];

    /// One coefficient per vocabulary feature, or `None` for models
    /// without a linear coefficient vector
    fn coefficients(&self) -> Option<&[f64]>;

    /// Class probabilities aligned to `classes()`, when the model has a
    /// calibrated probability function
    fn predict_proba(&self, x: &SparseVector) -> Option<Vec<f64>>;

    /// Signed decision score (positive favors `classes()[1]`), when the
    /// model exposes one
    fn decision_function(&self, x: &SparseVector) -> Option<f64>;

    /// Hard label prediction
    fn predict(&self, x: &SparseVector) -> i64;
}

/// On-disk model artifact (`model.json`), tagged by `model_type`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "model_type", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// Logistic regression: calibrated probabilities available
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
        classes: Vec<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        best_threshold: Option<f64>,
    },

    /// Linear SVC: decision scores only, no probability function
    LinearSvc {
        coefficients: Vec<f64>,
        intercept: f64,
        classes: Vec<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        best_threshold: Option<f64>,
    },
}

impl ModelArtifact {
    /// Human-readable model kind
    pub fn model_type(&self) -> &'static str {
        match self {
            Self::LogisticRegression { .. } => "logistic_regression",
            Self::LinearSvc { .. } => "linear_svc",
        }
    }

    /// Number of coefficients (must match the vocabulary size)
    pub fn n_features(&self) -> usize {
        match self {
            Self::LogisticRegression { coefficients, .. }
            | Self::LinearSvc { coefficients, .. } => coefficients.len(),
        }
    }

    /// Class labels as fit
    pub fn classes(&self) -> &[i64] {
        match self {
            Self::LogisticRegression { classes, .. } | Self::LinearSvc { classes, .. } => classes,
        }
    }

    /// Recommended decision threshold stored alongside the model, if any
    pub fn best_threshold(&self) -> Option<f64> {
        match self {
            Self::LogisticRegression { best_threshold, .. }
            | Self::LinearSvc { best_threshold, .. } => *best_threshold,
        }
    }

    /// Materialize the classifier behind the trait seam
    pub fn into_classifier(self) -> Box<dyn LinearClassifier> {
        match self {
            Self::LogisticRegression {
                coefficients,
                intercept,
                classes,
                ..
            } => Box::new(LogisticRegressionModel::new(coefficients, intercept, classes)),
            Self::LinearSvc {
                coefficients,
                intercept,
                classes,
                ..
            } => Box::new(LinearSvcModel::new(coefficients, intercept, classes)),
        }
    }
}

/// Logistic-regression classifier over sparse n-gram vectors
#[derive(Debug, Clone)]
pub struct LogisticRegressionModel {
    coefficients: Vec<f64>,
    intercept: f64,
    classes: Vec<i64>,
}

impl LogisticRegressionModel {
    /// Create a model from trained parameters
    pub fn new(coefficients: Vec<f64>, intercept: f64, classes: Vec<i64>) -> Self {
        Self {
            coefficients,
            intercept,
            classes,
        }
    }

    fn raw_score(&self, x: &SparseVector) -> f64 {
        dot(&self.coefficients, x) + self.intercept
    }
}

impl LinearClassifier for LogisticRegressionModel {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn coefficients(&self) -> Option<&[f64]> {
        Some(&self.coefficients)
    }

    fn predict_proba(&self, x: &SparseVector) -> Option<Vec<f64>> {
        if self.classes.len() != 2 {
            return None;
        }
        // Column order follows classes(): the sigmoid of the decision
        // score is the probability of classes()[1].
        let p = sigmoid(self.raw_score(x));
        Some(vec![1.0 - p, p])
    }

    fn decision_function(&self, x: &SparseVector) -> Option<f64> {
        Some(self.raw_score(x))
    }

    fn predict(&self, x: &SparseVector) -> i64 {
        predict_binary(&self.classes, self.raw_score(x))
    }
}

/// Linear SVC classifier: margins, no calibrated probabilities
#[derive(Debug, Clone)]
pub struct LinearSvcModel {
    coefficients: Vec<f64>,
    intercept: f64,
    classes: Vec<i64>,
}

impl LinearSvcModel {
    /// Create a model from trained parameters
    pub fn new(coefficients: Vec<f64>, intercept: f64, classes: Vec<i64>) -> Self {
        Self {
            coefficients,
            intercept,
            classes,
        }
    }
}

impl LinearClassifier for LinearSvcModel {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn coefficients(&self) -> Option<&[f64]> {
        Some(&self.coefficients)
    }

    fn predict_proba(&self, _x: &SparseVector) -> Option<Vec<f64>> {
        None
    }

    fn decision_function(&self, x: &SparseVector) -> Option<f64> {
        Some(dot(&self.coefficients, x) + self.intercept)
    }

    fn predict(&self, x: &SparseVector) -> i64 {
        predict_binary(&self.classes, dot(&self.coefficients, x) + self.intercept)
    }
}

/// Standard logistic transform
pub fn sigmoid(score: f64) -> f64 {
    1.0 / (1.0 + (-score).exp())
}

fn dot(coefficients: &[f64], x: &SparseVector) -> f64 {
    x.iter()
        .map(|(i, v)| v * coefficients.get(i).copied().unwrap_or(0.0))
        .sum()
}

fn predict_binary(classes: &[i64], score: f64) -> i64 {
    match classes {
        [negative, positive] => {
            if score >= 0.0 {
                *positive
            } else {
                *negative
            }
        }
        [only] => *only,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(indices: Vec<usize>, values: Vec<f64>) -> SparseVector {
        SparseVector::new(indices, values)
    }

    #[test]
    fn logistic_proba_aligns_with_classes() {
        let model = LogisticRegressionModel::new(vec![2.0, -1.0], 0.0, vec![0, 1]);
        let proba = model.predict_proba(&vector(vec![0], vec![1.0])).unwrap();
        assert_eq!(proba.len(), 2);
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
        // positive score favors classes()[1]
        assert!(proba[1] > proba[0]);
    }

    #[test]
    fn svc_has_no_probability_function() {
        let model = LinearSvcModel::new(vec![1.0], 0.0, vec![0, 1]);
        assert!(model.predict_proba(&vector(vec![0], vec![1.0])).is_none());
        assert_eq!(model.decision_function(&vector(vec![0], vec![1.0])), Some(1.0));
    }

    #[test]
    fn predict_respects_class_order() {
        let flipped = LogisticRegressionModel::new(vec![1.0], 0.0, vec![1, 0]);
        // positive score selects classes()[1], which is label 0 here
        assert_eq!(flipped.predict(&vector(vec![0], vec![1.0])), 0);
        assert_eq!(flipped.predict(&vector(vec![0], vec![-1.0])), 1);
    }

    #[test]
    fn artifact_parses_from_json() {
        let json = r#"{
            "model_type": "logistic_regression",
            "coefficients": [0.5, -0.25],
            "intercept": -1.0,
            "classes": [0, 1],
            "best_threshold": 0.35
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.model_type(), "logistic_regression");
        assert_eq!(artifact.n_features(), 2);
        assert_eq!(artifact.best_threshold(), Some(0.35));
        let model = artifact.into_classifier();
        assert_eq!(model.classes(), &[0, 1]);
    }

    #[test]
    fn sigmoid_is_bounded() {
        assert!(sigmoid(-50.0) > 0.0);
        assert!(sigmoid(50.0) < 1.0);
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
    }
}
