//! End-to-end tests for the explanation engine over on-disk artifacts

use toxlens_core::{Error, ProbabilitySource};
use toxlens_explain::{ArtifactBundle, DEFAULT_TOP_K};

const VECTORIZER_JSON: &str = r#"{
    "vocabulary": ["C", "O", "N", "Cl", "c1", "=O"],
    "ngram_min": 1,
    "ngram_max": 2
}"#;

const LOGISTIC_MODEL_JSON: &str = r#"{
    "model_type": "logistic_regression",
    "coefficients": [0.4, -0.8, 0.2, 1.5, 0.9, -0.3],
    "intercept": -0.5,
    "classes": [0, 1],
    "best_threshold": 0.45
}"#;

const SVC_MODEL_JSON: &str = r#"{
    "model_type": "linear_svc",
    "coefficients": [0.4, -0.8, 0.2, 1.5, 0.9, -0.3],
    "intercept": -0.5,
    "classes": [0, 1]
}"#;

fn bundle_with(model_json: &str) -> (tempfile::TempDir, ArtifactBundle) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("vectorizer.json"), VECTORIZER_JSON).unwrap();
    std::fs::write(dir.path().join("model.json"), model_json).unwrap();
    let bundle = ArtifactBundle::load(dir.path()).unwrap();
    (dir, bundle)
}

#[test]
fn local_explanation_is_deterministic() {
    let (_dir, bundle) = bundle_with(LOGISTIC_MODEL_JSON);
    let smiles = "CC(=O)Oc1ccccc1C(=O)O";

    let first = bundle.local_contributions(smiles, DEFAULT_TOP_K).unwrap();
    let second = bundle.local_contributions(smiles, DEFAULT_TOP_K).unwrap();

    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[test]
fn local_explanation_tables_are_sign_correct() {
    let (_dir, bundle) = bundle_with(LOGISTIC_MODEL_JSON);
    let explanation = bundle.local_contributions("ClCCO", DEFAULT_TOP_K).unwrap();

    assert!(!explanation.toward_toxic.is_empty());
    assert!(explanation
        .toward_toxic
        .iter()
        .all(|e| e.contribution > 0.0));
    assert!(explanation.toward_safe.iter().all(|e| e.contribution < 0.0));

    // descending / ascending order
    let toxic: Vec<f64> = explanation.toward_toxic.iter().map(|e| e.contribution).collect();
    assert!(toxic.windows(2).all(|w| w[0] >= w[1]));
    let safe: Vec<f64> = explanation.toward_safe.iter().map(|e| e.contribution).collect();
    assert!(safe.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn unrecognized_input_explains_as_empty() {
    let (_dir, bundle) = bundle_with(LOGISTIC_MODEL_JSON);
    let explanation = bundle.local_contributions("~", DEFAULT_TOP_K).unwrap();
    assert!(explanation.is_empty());
}

#[test]
fn probability_ignores_any_downstream_threshold() {
    let (_dir, bundle) = bundle_with(LOGISTIC_MODEL_JSON);
    let p = bundle.predict_toxic_probability("CClN").unwrap().probability;

    // The estimate carries no threshold; binarizing with different cut
    // points downstream must not feed back into the probability.
    for threshold in [0.05, 0.45, 0.95] {
        let again = bundle.predict_toxic_probability("CClN").unwrap().probability;
        assert_eq!(p, again);
        let _label = again >= threshold;
    }
}

#[test]
fn probability_tier_matches_the_model_kind() {
    let (_dir, logistic) = bundle_with(LOGISTIC_MODEL_JSON);
    let (_dir2, svc) = bundle_with(SVC_MODEL_JSON);

    let a = logistic.predict_toxic_probability("CCO").unwrap();
    assert_eq!(a.source, ProbabilitySource::Calibrated);

    let b = svc.predict_toxic_probability("CCO").unwrap();
    assert_eq!(b.source, ProbabilitySource::DecisionFunction);
    assert!(b.is_approximate());

    // Same linear parameters: the decision-function tier of the SVC is
    // numerically the logistic model's calibrated output.
    assert!((a.probability - b.probability).abs() < 1e-12);
}

#[test]
fn degenerate_classes_fail_every_entry_point() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("vectorizer.json"), VECTORIZER_JSON).unwrap();
    std::fs::write(
        dir.path().join("model.json"),
        r#"{
            "model_type": "logistic_regression",
            "coefficients": [0.4, -0.8, 0.2, 1.5, 0.9, -0.3],
            "intercept": 0.0,
            "classes": [1]
        }"#,
    )
    .unwrap();
    let bundle = ArtifactBundle::load(dir.path()).unwrap();

    assert!(matches!(
        bundle.predict_toxic_probability("CCO").unwrap_err(),
        Error::DegenerateModel(_)
    ));
    assert!(matches!(
        bundle.local_contributions("CCO", 5).unwrap_err(),
        Error::DegenerateModel(_)
    ));
    assert!(matches!(
        bundle.global_ranking(5).unwrap_err(),
        Error::DegenerateModel(_)
    ));
}

#[test]
fn global_ranking_matches_known_coefficients() {
    let (_dir, bundle) = bundle_with(LOGISTIC_MODEL_JSON);
    let ranking = bundle.global_ranking(2).unwrap();

    let pos: Vec<_> = ranking
        .toward_toxic
        .iter()
        .map(|w| (w.ngram.as_str(), w.weight))
        .collect();
    assert_eq!(pos, vec![("Cl", 1.5), ("c1", 0.9)]);

    let neg: Vec<_> = ranking
        .toward_safe
        .iter()
        .map(|w| (w.ngram.as_str(), w.weight))
        .collect();
    assert_eq!(neg, vec![("O", -0.8), ("=O", -0.3)]);
}
