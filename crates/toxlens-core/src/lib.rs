//! ToxLens Core
//!
//! Core types and error handling shared across ToxLens components.
//!
//! This crate provides:
//! - The common error type and result alias
//! - Sparse feature vectors produced by the n-gram vectorizer
//! - Contribution and ranking types returned by the explanation engine
//! - The tagged toxicity-probability estimate

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    ContributionEntry, FeatureWeight, GlobalRanking, LocalExplanation, ProbabilitySource,
    SparseVector, ToxicityEstimate,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        ContributionEntry, FeatureWeight, GlobalRanking, LocalExplanation, ProbabilitySource,
        SparseVector, ToxicityEstimate,
    };
}
