//! Resolver trait and common types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-request timeout for resolution services
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

/// A successfully resolved structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSmiles {
    /// The SMILES string to feed the vectorizer
    pub smiles: String,

    /// Which collaborator produced it (shown to the user)
    pub source: String,
}

impl ResolvedSmiles {
    /// Create a new resolved structure
    pub fn new(smiles: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            smiles: smiles.into(),
            source: source.into(),
        }
    }
}

/// Typed failure reasons for name resolution
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The service answered but knows no structure for this name
    #[error("no structure found for {name:?}")]
    NotFound { name: String },

    /// The service answered with an unexpected HTTP status
    #[error("{service} returned status {status}")]
    Status { service: &'static str, status: u16 },

    /// The request never completed (DNS, TLS, timeout, ...)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered 200 with a shape we do not understand
    #[error("unexpected response from {service}: {reason}")]
    Decode { service: &'static str, reason: String },
}

impl ResolveError {
    /// Create a new not-found error
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Whether the name is simply unknown (as opposed to the service
    /// being unreachable or broken)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Seam between the web layer and the name-resolution collaborators.
///
/// Implementations must treat the returned SMILES as opaque text; no
/// chemical validation happens here or downstream.
#[async_trait]
pub trait SmilesResolver: Send + Sync {
    /// Resolve a free-text compound name to a SMILES string
    async fn resolve(&self, name: &str) -> Result<ResolvedSmiles, ResolveError>;

    /// Short label identifying this resolver in results and logs
    fn source_label(&self) -> &'static str;
}

/// Build the shared HTTP client used by all resolvers
pub fn build_client() -> Result<reqwest::Client, ResolveError> {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!("toxlens/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ResolveError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguishable() {
        let err = ResolveError::not_found("unobtainium");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("unobtainium"));

        let err = ResolveError::Status {
            service: "pubchem",
            status: 503,
        };
        assert!(!err.is_not_found());
    }
}
