//! OPSIN systematic-name resolver
//!
//! OPSIN parses IUPAC-style systematic names offline from any compound
//! database, which makes it a useful last hop for names PubChem has
//! never indexed.

use crate::resolver::{ResolveError, ResolvedSmiles, SmilesResolver};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://opsin.ch.cam.ac.uk/opsin";
const SERVICE: &str = "opsin";

#[derive(Debug, Deserialize)]
struct OpsinResponse {
    status: String,
    #[serde(default)]
    smiles: Option<String>,
}

/// Resolver backed by the OPSIN name-to-structure service
pub struct OpsinResolver {
    client: reqwest::Client,
    base_url: String,
}

impl OpsinResolver {
    /// Create a resolver against the public OPSIN service
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point at a different base URL (tests, mirrors)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SmilesResolver for OpsinResolver {
    async fn resolve(&self, name: &str) -> Result<ResolvedSmiles, ResolveError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ResolveError::Decode {
            service: SERVICE,
            reason: format!("invalid base url: {e}"),
        })?;
        url.path_segments_mut()
            .map_err(|_| ResolveError::Decode {
                service: SERVICE,
                reason: "base url cannot carry path segments".to_string(),
            })?
            .push(&format!("{}.json", name.trim()));

        let response = self.client.get(url).send().await?;
        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Err(ResolveError::not_found(name)),
            status => {
                return Err(ResolveError::Status {
                    service: SERVICE,
                    status: status.as_u16(),
                })
            }
        }

        let parsed: OpsinResponse = response.json().await?;
        if parsed.status != "SUCCESS" {
            return Err(ResolveError::not_found(name));
        }
        parsed
            .smiles
            .map(|smiles| ResolvedSmiles::new(smiles, "OPSIN (systematic name)"))
            .ok_or_else(|| ResolveError::Decode {
                service: SERVICE,
                reason: "SUCCESS response without a smiles field".to_string(),
            })
    }

    fn source_label(&self) -> &'static str {
        "opsin"
    }
}
