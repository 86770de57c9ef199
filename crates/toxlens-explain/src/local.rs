//! Per-molecule contribution tables
//!
//! contribution = feature value x oriented coefficient, for every nonzero
//! feature position of one vectorized SMILES string.

use crate::model::LinearClassifier;
use crate::orientation::oriented_coefficients;
use crate::vectorizer::CharNgramVectorizer;
use toxlens_core::{ContributionEntry, LocalExplanation, Result};

/// Default number of rows per table
pub const DEFAULT_TOP_K: usize = 12;

/// Compute the ranked local explanation for one SMILES string.
///
/// The positive table holds the top `k` contributions pushing toward
/// toxic, descending; the negative table holds the top `k` pushing toward
/// non-toxic, most negative first. A zero contribution lands in neither.
/// Fewer than `k` qualifying features yields fewer rows without error,
/// and an input with no vocabulary overlap yields an empty explanation.
///
/// Ties keep original vocabulary order, and contributions are rounded to
/// six decimals, so repeated calls on identical input are byte-identical.
pub fn local_contributions(
    model: &dyn LinearClassifier,
    vectorizer: &CharNgramVectorizer,
    smiles: &str,
    k: usize,
) -> Result<LocalExplanation> {
    let coefficients = oriented_coefficients(model)?;
    let x = vectorizer.transform(smiles);
    if x.is_empty() {
        return Ok(LocalExplanation::default());
    }

    let names = vectorizer.feature_names();
    // Built in vocabulary order; the stable sorts below keep that order
    // for equal contributions.
    let entries: Vec<ContributionEntry> = x
        .iter()
        .map(|(i, value)| ContributionEntry {
            ngram: names[i].clone(),
            value,
            contribution: round6(value * coefficients[i]),
        })
        .collect();

    let mut toward_toxic: Vec<ContributionEntry> = entries
        .iter()
        .filter(|e| e.contribution > 0.0)
        .cloned()
        .collect();
    toward_toxic.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
    toward_toxic.truncate(k);

    let mut toward_safe: Vec<ContributionEntry> = entries
        .into_iter()
        .filter(|e| e.contribution < 0.0)
        .collect();
    toward_safe.sort_by(|a, b| a.contribution.total_cmp(&b.contribution));
    toward_safe.truncate(k);

    Ok(LocalExplanation {
        toward_toxic,
        toward_safe,
    })
}

/// Fixed six-decimal reporting precision
fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LogisticRegressionModel;
    use crate::vectorizer::VectorizerArtifact;
    use toxlens_core::Error;

    fn vectorizer() -> CharNgramVectorizer {
        let artifact = VectorizerArtifact::new(
            vec!["C".into(), "O".into(), "N".into(), "Cl".into()],
            1,
            2,
        );
        CharNgramVectorizer::from_artifact(artifact).unwrap()
    }

    #[test]
    fn contributions_are_value_times_oriented_coefficient() {
        let model =
            LogisticRegressionModel::new(vec![0.5, -0.25, 0.0, 1.0], 0.0, vec![0, 1]);
        let explanation = local_contributions(&model, &vectorizer(), "CClO", 12).unwrap();

        // 1-grams of "CClO": C, C, l, O; 2-grams: CC?, Cl, lO. Vocabulary
        // hits: value("C") = 2, value("Cl") = 1, value("O") = 1.
        // ("CC" is not in the fixture vocabulary.)
        assert_eq!(explanation.toward_toxic.len(), 2);
        assert_eq!(explanation.toward_toxic[0].ngram, "C");
        assert_eq!(explanation.toward_toxic[0].contribution, 1.0);
        assert_eq!(explanation.toward_toxic[1].ngram, "Cl");
        assert_eq!(explanation.toward_toxic[1].contribution, 1.0);

        assert_eq!(explanation.toward_safe.len(), 1);
        assert_eq!(explanation.toward_safe[0].ngram, "O");
        assert_eq!(explanation.toward_safe[0].contribution, -0.25);
    }

    #[test]
    fn empty_overlap_is_an_empty_explanation() {
        let model = LogisticRegressionModel::new(vec![1.0, 1.0, 1.0, 1.0], 0.0, vec![0, 1]);
        let explanation = local_contributions(&model, &vectorizer(), "zzz", 12).unwrap();
        assert!(explanation.is_empty());
    }

    #[test]
    fn identical_calls_are_byte_identical() {
        let model =
            LogisticRegressionModel::new(vec![0.3, -0.7, 0.2, 0.9], -0.1, vec![0, 1]);
        let v = vectorizer();
        let a = local_contributions(&model, &v, "CCNOCl", 5).unwrap();
        let b = local_contributions(&model, &v, "CCNOCl", 5).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn k_truncates_and_oversized_k_is_fine() {
        let model = LogisticRegressionModel::new(vec![3.0, 2.0, 1.0, 0.5], 0.0, vec![0, 1]);
        let v = vectorizer();
        let truncated = local_contributions(&model, &v, "CONCl", 1).unwrap();
        assert_eq!(truncated.toward_toxic.len(), 1);
        let oversized = local_contributions(&model, &v, "CONCl", 100).unwrap();
        assert!(oversized.toward_toxic.len() >= 3);
        assert!(oversized.toward_safe.is_empty());
    }

    #[test]
    fn flipped_class_order_flips_tables() {
        let canonical = LogisticRegressionModel::new(vec![0.5, -0.25, 0.0, 1.0], 0.0, vec![0, 1]);
        let relabeled = LogisticRegressionModel::new(
            vec![-0.5, 0.25, 0.0, -1.0],
            0.0,
            vec![1, 0],
        );
        let v = vectorizer();
        let a = local_contributions(&canonical, &v, "CClO", 12).unwrap();
        let b = local_contributions(&relabeled, &v, "CClO", 12).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_model_is_refused() {
        let model = LogisticRegressionModel::new(vec![1.0, 1.0, 1.0, 1.0], 0.0, vec![1]);
        let err = local_contributions(&model, &vectorizer(), "CO", 12).unwrap_err();
        assert!(matches!(err, Error::DegenerateModel(_)));
    }

    #[test]
    fn round6_truncates_reporting_noise() {
        assert_eq!(round6(0.1234567), 0.123457);
        assert_eq!(round6(-0.1234564), -0.123456);
    }
}
