//! NCBI E-utilities client.
//!
//! Two sequential calls per run:
//! - `esearch.fcgi` turns a free-text query into at most `max_results` PMIDs
//! - `efetch.fcgi` returns the PubMed XML citation document for those PMIDs
//!
//! No retries are attempted; any failure is returned to the caller.

use crate::error::{PubmedError, Result};
use crate::pipeline::CitationSource;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// E-utilities base URL
pub const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Fixed cap on the number of citations retrieved per run
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Default read timeout for each request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Tool name reported to NCBI
const TOOL_NAME: &str = "get-papers-list";

/// Client configuration
#[derive(Debug, Clone)]
pub struct EutilsConfig {
    /// Base URL without the endpoint name
    pub base_url: String,
    /// `retmax` sent to esearch
    pub max_results: usize,
    /// Per-request timeout
    pub timeout: Duration,
    /// NCBI API key (raises the rate limit)
    pub api_key: Option<String>,
    /// Contact email NCBI asks tools to send
    pub email: Option<String>,
    /// Tool name NCBI asks tools to send
    pub tool: String,
}

impl Default for EutilsConfig {
    fn default() -> Self {
        Self {
            base_url: EUTILS_BASE_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout: DEFAULT_TIMEOUT,
            api_key: None,
            email: None,
            tool: TOOL_NAME.to_string(),
        }
    }
}

/// PubMed E-utilities client
pub struct EutilsClient {
    client: reqwest::Client,
    config: EutilsConfig,
}

impl EutilsClient {
    /// Create a new EutilsClient
    pub fn new(config: EutilsConfig) -> Result<Self> {
        if config.max_results == 0 {
            return Err(PubmedError::Config(
                "max_results must be at least 1".to_string(),
            ));
        }
        if config.timeout.is_zero() {
            return Err(PubmedError::Config("timeout must be positive".to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(format!("{}/{}", config.tool, env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(config.timeout))
            .build()
            .map_err(|e| PubmedError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Build the esearch URL for `query`
    pub fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = self.endpoint("esearch.fcgi")?;
        url.query_pairs_mut()
            .append_pair("db", "pubmed")
            .append_pair("term", query)
            .append_pair("retmax", &self.config.max_results.to_string())
            .append_pair("retmode", "json");
        self.append_identity(&mut url);
        Ok(url)
    }

    /// Build the efetch URL for `ids`
    pub fn fetch_url(&self, ids: &[String]) -> Result<Url> {
        let mut url = self.endpoint("efetch.fcgi")?;
        url.query_pairs_mut()
            .append_pair("db", "pubmed")
            .append_pair("id", &ids.join(","))
            .append_pair("retmode", "xml");
        self.append_identity(&mut url);
        Ok(url)
    }

    /// Search PubMed and return matching PMIDs in relevance order.
    pub async fn esearch(&self, query: &str) -> Result<Vec<String>> {
        let url = self.search_url(query)?;
        debug!(url = %url, "Sending esearch request");

        let body = self.get_text(&url).await?;
        debug!(response = %body, "PubMed ID fetch response");

        let ids = parse_search_response(&body)?;
        info!(count = ids.len(), "esearch complete");
        Ok(ids)
    }

    /// Fetch the XML citation document for `ids`.
    pub async fn efetch(&self, ids: &[String]) -> Result<String> {
        if ids.is_empty() {
            return Err(PubmedError::Validation(
                "efetch needs at least one PMID".to_string(),
            ));
        }

        let url = self.fetch_url(ids)?;
        debug!(count = ids.len(), "Sending efetch request");

        let body = self.get_text(&url).await?;
        debug!(bytes = body.len(), "Raw XML fetched");
        Ok(body)
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        Url::parse(&format!("{}/{}", base, name))
            .map_err(|e| PubmedError::Config(format!("Invalid base URL '{}': {}", base, e)))
    }

    fn append_identity(&self, url: &mut Url) {
        let mut params = url.query_pairs_mut();
        params.append_pair("tool", &self.config.tool);
        if let Some(email) = &self.config.email {
            params.append_pair("email", email);
        }
        if let Some(key) = &self.config.api_key {
            params.append_pair("api_key", key);
        }
    }

    async fn get_text(&self, url: &Url) -> Result<String> {
        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PubmedError::Api {
                code: status.as_u16(),
                message: if message.trim().is_empty() {
                    status.to_string()
                } else {
                    message.trim().to_string()
                },
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl CitationSource for EutilsClient {
    async fn search_ids(&self, query: &str) -> Result<Vec<String>> {
        self.esearch(query).await
    }

    async fn fetch_citations(&self, ids: &[String]) -> Result<String> {
        self.efetch(ids).await
    }
}

// === esearch JSON response ===

#[derive(Debug, Deserialize)]
struct ESearchResponse {
    esearchresult: Option<ESearchResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ESearchResult {
    idlist: Option<Vec<String>>,
    #[serde(rename = "ERROR", default)]
    error: Option<String>,
}

/// Extract the PMID list from an esearch JSON body
fn parse_search_response(body: &str) -> Result<Vec<String>> {
    let response: ESearchResponse = serde_json::from_str(body)
        .map_err(|e| PubmedError::InvalidResponse(format!("esearch returned invalid JSON: {}", e)))?;

    let Some(result) = response.esearchresult else {
        let reason = response
            .error
            .unwrap_or_else(|| "missing esearchresult".to_string());
        return Err(PubmedError::InvalidResponse(reason));
    };

    match (result.idlist, result.error) {
        (Some(ids), _) => Ok(ids),
        (None, Some(error)) => Err(PubmedError::InvalidResponse(error)),
        (None, None) => Err(PubmedError::InvalidResponse(
            "esearch response has no idlist".to_string(),
        )),
    }
}
