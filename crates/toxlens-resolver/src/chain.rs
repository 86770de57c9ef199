//! Resolver fallback chain
//!
//! Tries each configured resolver in order and reports the final failure.
//! Retry/fallback policy lives entirely here, outside the explanation
//! core and outside the individual resolvers.

use crate::opsin::OpsinResolver;
use crate::pubchem::{PubChemCidResolver, PubChemPropertyResolver};
use crate::resolver::{build_client, ResolveError, ResolvedSmiles, SmilesResolver};
use async_trait::async_trait;

/// Ordered chain of resolution sources
pub struct FallbackResolver {
    sources: Vec<Box<dyn SmilesResolver>>,
}

impl FallbackResolver {
    /// Create a chain from explicit sources (tests use stubs here)
    pub fn new(sources: Vec<Box<dyn SmilesResolver>>) -> Self {
        Self { sources }
    }

    /// The production chain: PubChem direct, PubChem via CID, then OPSIN
    pub fn with_default_sources() -> Result<Self, ResolveError> {
        let client = build_client()?;
        Ok(Self::new(vec![
            Box::new(PubChemPropertyResolver::new(client.clone())),
            Box::new(PubChemCidResolver::new(client.clone())),
            Box::new(OpsinResolver::new(client)),
        ]))
    }
}

#[async_trait]
impl SmilesResolver for FallbackResolver {
    async fn resolve(&self, name: &str) -> Result<ResolvedSmiles, ResolveError> {
        let mut last = ResolveError::not_found(name);
        for source in &self.sources {
            match source.resolve(name).await {
                Ok(resolved) => {
                    tracing::debug!(
                        name,
                        source = source.source_label(),
                        "resolved compound name"
                    );
                    return Ok(resolved);
                }
                Err(err) => {
                    tracing::debug!(
                        name,
                        source = source.source_label(),
                        error = %err,
                        "resolver hop failed, trying next"
                    );
                    last = err;
                }
            }
        }
        Err(last)
    }

    fn source_label(&self) -> &'static str {
        "fallback-chain"
    }
}
