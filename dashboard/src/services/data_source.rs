//! Contract data source implementations
//!
//! Both sources read the same two JSON documents: `contracts.json`, a list of
//! contracts, and `contract-details.json`, a mapping from contract id to its
//! detail record.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use shared::{Contract, ContractDetail};

use crate::error::{DashboardError, DashboardResult};
use crate::traits::DataSource;

pub const CONTRACTS_DOCUMENT: &str = "contracts.json";
pub const DETAILS_DOCUMENT: &str = "contract-details.json";

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

fn parse_document<T: DeserializeOwned>(location: &str, body: &str) -> DashboardResult<T> {
    serde_json::from_str(body).map_err(|e| DashboardError::DataSourcePayload {
        message: format!("{location}: {e}"),
    })
}

/// Fetches contract documents over HTTP
#[derive(Clone)]
pub struct HttpDataSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDataSource {
    /// `base_url` should be like `http://localhost:5173` (trailing slash optional)
    pub fn new(base_url: impl Into<String>) -> DashboardResult<Self> {
        Self::with_timeout(base_url, DEFAULT_FETCH_TIMEOUT)
    }

    /// Requests that take longer than `timeout` fail as unavailable
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> DashboardResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn document_url(&self, document: &str) -> String {
        format!("{}/{}", self.base_url, document)
    }

    async fn get_document<T: DeserializeOwned>(&self, document: &str) -> DashboardResult<T> {
        let url = self.document_url(document);
        debug!(url = %url, "fetching contract document");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DashboardError::DataSourceStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = resp.text().await?;
        parse_document(&url, &body)
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_contracts(&self) -> DashboardResult<Vec<Contract>> {
        let contracts: Vec<Contract> = self.get_document(CONTRACTS_DOCUMENT).await?;
        info!(count = contracts.len(), source = %self.base_url, "fetched contracts");
        Ok(contracts)
    }

    async fn fetch_contract_details(&self) -> DashboardResult<HashMap<String, ContractDetail>> {
        let details: HashMap<String, ContractDetail> = self.get_document(DETAILS_DOCUMENT).await?;
        info!(count = details.len(), source = %self.base_url, "fetched contract details");
        Ok(details)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Reads contract documents from a local directory
#[derive(Clone)]
pub struct DirectoryDataSource {
    root: PathBuf,
}

impl DirectoryDataSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read_document<T: DeserializeOwned>(&self, document: &str) -> DashboardResult<T> {
        let path = self.root.join(document);
        debug!(path = %path.display(), "reading contract document");

        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| DashboardError::unavailable(format!("{}: {e}", path.display())))?;
        parse_document(&path.display().to_string(), &body)
    }
}

#[async_trait]
impl DataSource for DirectoryDataSource {
    async fn fetch_contracts(&self) -> DashboardResult<Vec<Contract>> {
        let contracts: Vec<Contract> = self.read_document(CONTRACTS_DOCUMENT).await?;
        info!(count = contracts.len(), source = %self.root.display(), "read contracts");
        Ok(contracts)
    }

    async fn fetch_contract_details(&self) -> DashboardResult<HashMap<String, ContractDetail>> {
        let details: HashMap<String, ContractDetail> = self.read_document(DETAILS_DOCUMENT).await?;
        info!(count = details.len(), source = %self.root.display(), "read contract details");
        Ok(details)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
