//! HTTP client for the NCBI E-utilities endpoints

use std::time::Duration;

use serde::Deserialize;

use crate::config::PubMedConfig;
use crate::errors::{Result, ScoutError};
use crate::pubmed::medline::parse_medline;
use crate::pubmed::LiteratureSource;
use crate::records::LiteratureRecord;

/// Base URL for the E-utilities service
pub const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Tool name sent with every request per NCBI etiquette
pub const DEFAULT_TOOL: &str = "ntxscout";

/// Client for PubMed searches via esearch + efetch
pub struct PubMedClient {
    client: reqwest::Client,
    base_url: String,
    tool: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct EsearchResponse {
    esearchresult: EsearchResult,
}

#[derive(Debug, Deserialize)]
struct EsearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

impl PubMedClient {
    /// Client with default endpoint and timeouts
    pub fn new() -> Result<Self> {
        Self::from_config(&PubMedConfig::default())
    }

    /// Client configured from the pubmed section of the config file
    pub fn from_config(config: &PubMedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tool: config.tool.clone(),
            email: config.email.clone(),
        })
    }

    /// tool/email identification params, skipped when unset
    fn identify_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.tool.is_empty() {
            params.push(("tool", self.tool.clone()));
        }
        if !self.email.is_empty() {
            params.push(("email", self.email.clone()));
        }
        params
    }

    /// esearch: resolve a search term to a list of PMIDs
    async fn esearch(&self, term: &str, retmax: usize) -> Result<Vec<String>> {
        let url = format!("{}/esearch.fcgi", self.base_url);
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("term", term.to_string()),
            ("retmax", retmax.to_string()),
            ("retmode", "json".to_string()),
        ];
        params.extend(self.identify_params());

        let response = self.client.get(&url).query(&params).send().await?;
        if !response.status().is_success() {
            return Err(ScoutError::PubMedApi(format!(
                "esearch returned HTTP {}",
                response.status()
            )));
        }

        let body: EsearchResponse = response.json().await?;
        Ok(body.esearchresult.idlist)
    }

    /// efetch: fetch MEDLINE flat-format blocks for a PMID batch
    async fn efetch_medline(&self, ids: &[String]) -> Result<String> {
        let url = format!("{}/efetch.fcgi", self.base_url);
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("id", ids.join(",")),
            ("rettype", "medline".to_string()),
            ("retmode", "text".to_string()),
        ];
        params.extend(self.identify_params());

        let response = self.client.get(&url).query(&params).send().await?;
        if !response.status().is_success() {
            return Err(ScoutError::PubMedApi(format!(
                "efetch returned HTTP {}",
                response.status()
            )));
        }

        Ok(response.text().await?)
    }

    /// Search PubMed and return parsed records.
    ///
    /// Two round trips: esearch for PMIDs, efetch for the article data.
    /// An empty ID list short-circuits without a second request.
    pub async fn search(&self, term: &str, max_results: usize) -> Result<Vec<LiteratureRecord>> {
        let ids = self.esearch(term, max_results).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw = self.efetch_medline(&ids).await?;
        Ok(parse_medline(&raw).into_iter().map(Into::into).collect())
    }

    /// True when the E-utilities service answers at all
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/einfo.fcgi", self.base_url);
        match self
            .client
            .get(&url)
            .query(&[("retmode", "json")])
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

#[async_trait::async_trait]
impl LiteratureSource for PubMedClient {
    async fn search(&self, term: &str, max_results: usize) -> Result<Vec<LiteratureRecord>> {
        PubMedClient::search(self, term, max_results).await
    }
}
