//! Fixed-vocabulary character n-gram vectorizer adapter
//!
//! Maps any string to a sparse vector of n-gram occurrence weights over a
//! vocabulary learned at training time. The vocabulary is consumed, never
//! re-fit; feature index and feature string stay bijective for the
//! lifetime of a loaded vectorizer.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use toxlens_core::{Error, Result, SparseVector};

/// On-disk vectorizer artifact (`vectorizer.json`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    /// Ordered feature strings; position is the feature index
    pub vocabulary: Vec<String>,

    /// Smallest n-gram length extracted
    pub ngram_min: usize,

    /// Largest n-gram length extracted
    pub ngram_max: usize,

    /// Lowercase the input before extraction
    #[serde(default)]
    pub lowercase: bool,

    /// Per-feature IDF weights, parallel to `vocabulary` (absent for a
    /// plain count vectorizer)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idf: Option<Vec<f64>>,
}

impl VectorizerArtifact {
    /// Create a count-vectorizer artifact over a vocabulary
    pub fn new(vocabulary: Vec<String>, ngram_min: usize, ngram_max: usize) -> Self {
        Self {
            vocabulary,
            ngram_min,
            ngram_max,
            lowercase: false,
            idf: None,
        }
    }

    /// Attach IDF weights, turning counts into tf-idf values
    pub fn with_idf(mut self, idf: Vec<f64>) -> Self {
        self.idf = Some(idf);
        self
    }

    /// Lowercase inputs before extraction
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }
}

/// Character n-gram vectorizer with a fixed vocabulary.
///
/// Deterministic given the loaded vocabulary: identical inputs produce
/// identical sparse vectors with strictly ascending indices.
#[derive(Debug, Clone)]
pub struct CharNgramVectorizer {
    vocabulary: Vec<String>,
    index: HashMap<String, usize>,
    ngram_min: usize,
    ngram_max: usize,
    lowercase: bool,
    idf: Option<Vec<f64>>,
}

impl CharNgramVectorizer {
    /// Build a vectorizer from its artifact, validating invariants.
    ///
    /// Fails when the n-gram range is empty or inverted, the vocabulary
    /// contains duplicates, or the IDF table length does not match the
    /// vocabulary.
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self> {
        if artifact.ngram_min == 0 || artifact.ngram_min > artifact.ngram_max {
            return Err(Error::internal(format!(
                "invalid n-gram range {}..={}",
                artifact.ngram_min, artifact.ngram_max
            )));
        }
        if let Some(idf) = &artifact.idf {
            if idf.len() != artifact.vocabulary.len() {
                return Err(Error::internal(format!(
                    "idf table has {} entries for a vocabulary of {}",
                    idf.len(),
                    artifact.vocabulary.len()
                )));
            }
        }

        let mut index = HashMap::with_capacity(artifact.vocabulary.len());
        for (i, ngram) in artifact.vocabulary.iter().enumerate() {
            if index.insert(ngram.clone(), i).is_some() {
                return Err(Error::internal(format!(
                    "vocabulary contains duplicate n-gram {:?}",
                    ngram
                )));
            }
        }

        Ok(Self {
            vocabulary: artifact.vocabulary,
            index,
            ngram_min: artifact.ngram_min,
            ngram_max: artifact.ngram_max,
            lowercase: artifact.lowercase,
            idf: artifact.idf,
        })
    }

    /// Vectorize one SMILES string.
    ///
    /// Any string is valid input; chemical well-formedness is never
    /// checked. An input sharing no n-grams with the vocabulary yields an
    /// empty vector, which callers treat as "the model has no information",
    /// not as an error.
    pub fn transform(&self, smiles: &str) -> SparseVector {
        let text = if self.lowercase {
            smiles.to_lowercase()
        } else {
            smiles.to_string()
        };
        let chars: Vec<char> = text.chars().collect();

        // BTreeMap keeps output indices ascending without a second sort
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for n in self.ngram_min..=self.ngram_max {
            if chars.len() < n {
                break;
            }
            for window in chars.windows(n) {
                let ngram: String = window.iter().collect();
                if let Some(&i) = self.index.get(&ngram) {
                    *counts.entry(i).or_insert(0.0) += 1.0;
                }
            }
        }

        if let Some(idf) = &self.idf {
            for (i, value) in counts.iter_mut() {
                *value *= idf[*i];
            }
        }

        let (indices, values) = counts.into_iter().unzip();
        SparseVector::new(indices, values)
    }

    /// Ordered feature strings; position is the feature index
    pub fn feature_names(&self) -> &[String] {
        &self.vocabulary
    }

    /// Vocabulary size V
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Whether the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> CharNgramVectorizer {
        let artifact = VectorizerArtifact::new(
            vec!["C".into(), "CC".into(), "O".into(), "C(".into()],
            1,
            2,
        );
        CharNgramVectorizer::from_artifact(artifact).unwrap()
    }

    #[test]
    fn counts_overlapping_ngrams() {
        let v = fixture();
        let x = v.transform("CCO");
        // "C" twice, "CC" once, "O" once; "CO" not in vocabulary
        assert_eq!(x.indices, vec![0, 1, 2]);
        assert_eq!(x.values, vec![2.0, 1.0, 1.0]);
    }

    #[test]
    fn unknown_input_yields_empty_vector() {
        let v = fixture();
        let x = v.transform("xyz");
        assert!(x.is_empty());
    }

    #[test]
    fn transform_is_deterministic() {
        let v = fixture();
        assert_eq!(v.transform("C(C)CO"), v.transform("C(C)CO"));
    }

    #[test]
    fn idf_reweights_counts() {
        let artifact = VectorizerArtifact::new(vec!["C".into(), "O".into()], 1, 1)
            .with_idf(vec![0.5, 2.0]);
        let v = CharNgramVectorizer::from_artifact(artifact).unwrap();
        let x = v.transform("CCO");
        assert_eq!(x.values, vec![1.0, 2.0]);
    }

    #[test]
    fn multibyte_input_does_not_panic() {
        let v = fixture();
        let x = v.transform("Cé†O");
        assert_eq!(x.indices, vec![0, 2]);
    }

    #[test]
    fn rejects_duplicate_vocabulary() {
        let artifact = VectorizerArtifact::new(vec!["C".into(), "C".into()], 1, 1);
        assert!(CharNgramVectorizer::from_artifact(artifact).is_err());
    }

    #[test]
    fn rejects_mismatched_idf() {
        let artifact =
            VectorizerArtifact::new(vec!["C".into(), "O".into()], 1, 1).with_idf(vec![1.0]);
        assert!(CharNgramVectorizer::from_artifact(artifact).is_err());
    }

    #[test]
    fn rejects_inverted_ngram_range() {
        let artifact = VectorizerArtifact::new(vec!["C".into()], 3, 2);
        assert!(CharNgramVectorizer::from_artifact(artifact).is_err());
    }
}
