//! Tiered toxic-class probability
//!
//! The probability of the class labeled `1` is looked up at its dynamic
//! position in the class list, never at a fixed array index: selecting the
//! wrong position silently inverts every prediction.

use crate::model::{sigmoid, LinearClassifier};
use crate::orientation::positive_class_index;
use crate::vectorizer::CharNgramVectorizer;
use toxlens_core::{Error, ProbabilitySource, Result, ToxicityEstimate};

/// Predict the probability that one SMILES string is toxic.
///
/// Tiers, best first, each tagged in the returned estimate so callers can
/// warn when the number is approximate:
/// 1. the model's own probability function (`Calibrated`)
/// 2. logistic transform of an oriented decision score (`DecisionFunction`)
/// 3. the hard predicted label cast to 0.0/1.0 (`LabelOnly`)
///
/// A non-binary class set fails with `DegenerateModel` before any tier
/// runs. Threshold comparison is left entirely to the caller.
pub fn predict_toxic_probability(
    model: &dyn LinearClassifier,
    vectorizer: &CharNgramVectorizer,
    smiles: &str,
) -> Result<ToxicityEstimate> {
    let positive = positive_class_index(model.classes())?;
    let x = vectorizer.transform(smiles);

    if let Some(proba) = model.predict_proba(&x) {
        let p = proba.get(positive).copied().ok_or_else(|| {
            Error::internal(format!(
                "probability vector of length {} has no entry for class position {}",
                proba.len(),
                positive
            ))
        })?;
        return Ok(ToxicityEstimate::new(p, ProbabilitySource::Calibrated));
    }

    if let Some(score) = model.decision_function(&x) {
        // Decision scores favor the model's second class; re-sign toward
        // label 1 before the logistic transform.
        let toward_toxic = if positive == 1 { score } else { -score };
        return Ok(ToxicityEstimate::new(
            sigmoid(toward_toxic),
            ProbabilitySource::DecisionFunction,
        ));
    }

    let label = model.predict(&x);
    Ok(ToxicityEstimate::new(
        if label == 1 { 1.0 } else { 0.0 },
        ProbabilitySource::LabelOnly,
    ))
}
