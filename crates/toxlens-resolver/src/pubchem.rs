//! PubChem PUG REST resolvers
//!
//! Two lookup strategies against the same service: a direct
//! name -> property request, and the two-step name -> CID -> property
//! variant that succeeds for some names the direct route rejects.

use crate::resolver::{ResolveError, ResolvedSmiles, SmilesResolver};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";
const SERVICE: &str = "pubchem";

#[derive(Debug, Deserialize)]
struct PropertyTableResponse {
    #[serde(rename = "PropertyTable")]
    property_table: PropertyTable,
}

#[derive(Debug, Deserialize)]
struct PropertyTable {
    #[serde(rename = "Properties")]
    properties: Vec<CompoundProperties>,
}

#[derive(Debug, Deserialize)]
struct CompoundProperties {
    #[serde(rename = "IsomericSMILES")]
    isomeric_smiles: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CidListResponse {
    #[serde(rename = "IdentifierList")]
    identifier_list: IdentifierList,
}

#[derive(Debug, Deserialize)]
struct IdentifierList {
    #[serde(rename = "CID")]
    cids: Vec<u64>,
}

/// Build a PUG REST URL from path segments, percent-encoding each one
fn pug_url(base_url: &str, segments: &[&str]) -> Result<Url, ResolveError> {
    let mut url = Url::parse(base_url).map_err(|e| ResolveError::Decode {
        service: SERVICE,
        reason: format!("invalid base url: {e}"),
    })?;
    url.path_segments_mut()
        .map_err(|_| ResolveError::Decode {
            service: SERVICE,
            reason: "base url cannot carry path segments".to_string(),
        })?
        .extend(segments);
    Ok(url)
}

async fn fetch_smiles_at(
    client: &reqwest::Client,
    url: Url,
    name: &str,
) -> Result<String, ResolveError> {
    let response = client.get(url).send().await?;
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

    let table: PropertyTableResponse = response.json().await?;
    table
        .property_table
        .properties
        .into_iter()
        .filter_map(|p| p.isomeric_smiles)
        .next()
        .ok_or_else(|| ResolveError::not_found(name))
}

/// Direct name -> IsomericSMILES lookup
pub struct PubChemPropertyResolver {
    client: reqwest::Client,
    base_url: String,
}

impl PubChemPropertyResolver {
    /// Create a resolver against the public PubChem service
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
impl SmilesResolver for PubChemPropertyResolver {
    async fn resolve(&self, name: &str) -> Result<ResolvedSmiles, ResolveError> {
        let url = pug_url(
            &self.base_url,
            &[
                "compound",
                "name",
                name.trim(),
                "property",
                "IsomericSMILES",
                "JSON",
            ],
        )?;
        let smiles = fetch_smiles_at(&self.client, url, name).await?;
        Ok(ResolvedSmiles::new(smiles, "PubChem (name)"))
    }

    fn source_label(&self) -> &'static str {
        "pubchem-name"
    }
}

/// Two-step name -> CID -> IsomericSMILES lookup
pub struct PubChemCidResolver {
    client: reqwest::Client,
    base_url: String,
}

impl PubChemCidResolver {
    /// Create a resolver against the public PubChem service
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

    async fn lookup_cid(&self, name: &str) -> Result<u64, ResolveError> {
        let url = pug_url(&self.base_url, &["compound", "name", name.trim(), "cids", "JSON"])?;
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

        let list: CidListResponse = response.json().await?;
        list.identifier_list
            .cids
            .first()
            .copied()
            .ok_or_else(|| ResolveError::not_found(name))
    }
}

#[async_trait]
impl SmilesResolver for PubChemCidResolver {
    async fn resolve(&self, name: &str) -> Result<ResolvedSmiles, ResolveError> {
        let cid = self.lookup_cid(name).await?;
        tracing::debug!(name, cid, "resolved compound to PubChem CID");

        let url = pug_url(
            &self.base_url,
            &[
                "compound",
                "cid",
                &cid.to_string(),
                "property",
                "IsomericSMILES",
                "JSON",
            ],
        )?;
        let smiles = fetch_smiles_at(&self.client, url, name).await?;
        Ok(ResolvedSmiles::new(smiles, "PubChem (CID)"))
    }

    fn source_label(&self) -> &'static str {
        "pubchem-cid"
    }
}
