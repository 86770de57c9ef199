//! Model-wide coefficient ranking
//!
//! Ranks the oriented coefficient vector over the entire vocabulary,
//! independent of any one molecule.

use crate::model::LinearClassifier;
use crate::orientation::oriented_coefficients;
use crate::vectorizer::CharNgramVectorizer;
use toxlens_core::{Error, FeatureWeight, GlobalRanking, Result};

/// Rank the k highest and k lowest oriented coefficients.
///
/// `toward_toxic` holds the k largest weights descending, `toward_safe`
/// the k smallest ascending. Ties keep original vocabulary order (the
/// sorts are stable), so repeated calls are identical. Fails with
/// `UnsupportedModel` when the classifier has no coefficients and
/// `DegenerateModel` when its class set is not {0, 1}.
pub fn global_ranking(
    model: &dyn LinearClassifier,
    vectorizer: &CharNgramVectorizer,
    k: usize,
) -> Result<GlobalRanking> {
    let coefficients = oriented_coefficients(model)?;
    let names = vectorizer.feature_names();
    if coefficients.len() != names.len() {
        return Err(Error::internal(format!(
            "classifier has {} coefficients for a vocabulary of {}",
            coefficients.len(),
            names.len()
        )));
    }

    let weights: Vec<FeatureWeight> = names
        .iter()
        .zip(coefficients.iter())
        .map(|(ngram, &weight)| FeatureWeight {
            ngram: ngram.clone(),
            weight,
        })
        .collect();

    let mut toward_toxic = weights.clone();
    toward_toxic.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    toward_toxic.truncate(k);

    let mut toward_safe = weights;
    toward_safe.sort_by(|a, b| a.weight.total_cmp(&b.weight));
    toward_safe.truncate(k);

    Ok(GlobalRanking {
        toward_toxic,
        toward_safe,
    })
}
