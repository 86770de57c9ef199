//! Class-orientation normalizer
//!
//! The classifier's coefficient signs and probability columns are relative
//! to whatever order its class list happened to be fit in. Everything that
//! interprets a sign or picks a probability column goes through this
//! module, so local explanations, global rankings, and probabilities can
//! never disagree about which direction "toxic" is.

use crate::model::LinearClassifier;
use toxlens_core::{Error, Result};

/// Position of the literal label `1` in the class list.
///
/// The class set must be exactly {0, 1}; anything else (a single-class
/// training run, extra classes, renamed labels) is a configuration error
/// and is refused rather than guessed at.
pub fn positive_class_index(classes: &[i64]) -> Result<usize> {
    match classes {
        [0, 1] => Ok(1),
        [1, 0] => Ok(0),
        _ => Err(Error::degenerate_model(classes.to_vec())),
    }
}

/// Coefficients re-signed so that positive always pushes toward label `1`.
///
/// Raw coefficients point toward the model's internal second class; when
/// that class is not `1`, every coefficient is negated. Fails with
/// `DegenerateModel` for a non-binary class set and `UnsupportedModel`
/// when the classifier has no coefficient vector.
pub fn oriented_coefficients(model: &dyn LinearClassifier) -> Result<Vec<f64>> {
    let positive = positive_class_index(model.classes())?;
    let coefficients = model.coefficients().ok_or_else(|| {
        Error::unsupported_model(
            "classifier exposes no per-feature coefficients; a linear model is required for n-gram explanations",
        )
    })?;

    if positive == 1 {
        Ok(coefficients.to_vec())
    } else {
        Ok(coefficients.iter().map(|c| -c).collect())
    }
}
