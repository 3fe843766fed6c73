//! Request and response types for the HTTP API
//!
//! Requests carry filter values as strings so that an unknown status or risk
//! is reported as an invalid query instead of a generic rejection.

use serde::{Deserialize, Serialize};

use shared::{Clause, ConfidenceBand, Contract, ContractDetail, ContractStatus, Evidence, Insight, RiskLevel};

use crate::core::intake::FileCandidate;
use crate::core::query::QueryUpdate;
use crate::core::upload::{UploadEntry, UploadId, UploadStatus};
use crate::error::{DashboardError, DashboardResult};

/// Query string of `GET /api/contracts`
///
/// Absent parameters fall back to the session query; an empty `status` or
/// `risk` (or `all`) clears that filter for the response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractsQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub risk: Option<String>,
    pub page: Option<String>,
}

impl ContractsQuery {
    pub fn into_update(self) -> DashboardResult<QueryUpdate> {
        let page = self
            .page
            .map(|raw| {
                raw.trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|page| *page > 0)
                    .ok_or_else(|| DashboardError::InvalidQuery {
                        details: format!("page must be a positive integer, got '{raw}'"),
                    })
            })
            .transpose()?;

        Ok(QueryUpdate {
            search_term: self.search,
            status: self.status.as_deref().map(parse_status).transpose()?,
            risk: self.risk.as_deref().map(parse_risk).transpose()?,
            page,
        })
    }
}

/// Body of `PUT /api/contracts/query`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub risk: Option<String>,
}

impl FilterRequest {
    pub fn into_update(self) -> DashboardResult<QueryUpdate> {
        ContractsQuery {
            search: self.search,
            status: self.status,
            risk: self.risk,
            page: None,
        }
        .into_update()
    }
}

/// Body of `PUT /api/contracts/page`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
}

/// Body of `POST /api/uploads`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadRequest {
    pub files: Vec<FileCandidate>,
}

fn is_cleared(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw.eq_ignore_ascii_case("all")
}

fn parse_status(raw: &str) -> DashboardResult<Option<ContractStatus>> {
    if is_cleared(raw) {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|e: shared::SharedError| DashboardError::InvalidQuery {
        details: e.to_string(),
    })
}

fn parse_risk(raw: &str) -> DashboardResult<Option<RiskLevel>> {
    if is_cleared(raw) {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|e: shared::SharedError| DashboardError::InvalidQuery {
        details: e.to_string(),
    })
}

/// Path segment of `DELETE /api/uploads/:id`
pub fn parse_upload_id(raw: &str) -> DashboardResult<UploadId> {
    raw.parse().map_err(|e: shared::SharedError| DashboardError::InvalidQuery {
        details: e.to_string(),
    })
}

/// Upload entry as shown in the upload panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadView {
    pub id: UploadId,
    pub name: String,
    pub size: u64,
    pub formatted_size: String,
    pub status: UploadStatus,
    pub progress: f64,
}

impl From<&UploadEntry> for UploadView {
    fn from(entry: &UploadEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            size: entry.size,
            formatted_size: entry.formatted_size(),
            status: entry.status,
            progress: entry.progress,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClauseView {
    #[serde(flatten)]
    pub clause: Clause,
    pub confidence_percent: u8,
    pub confidence_band: ConfidenceBand,
}

/// Detail record with the clause confidence already classified
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractDetailView {
    #[serde(flatten)]
    pub contract: Contract,
    pub clauses: Vec<ClauseView>,
    pub insights: Vec<Insight>,
    pub evidence: Vec<Evidence>,
}

impl From<ContractDetail> for ContractDetailView {
    fn from(detail: ContractDetail) -> Self {
        let clauses = detail
            .clauses
            .into_iter()
            .map(|clause| ClauseView {
                confidence_percent: clause.confidence_percent(),
                confidence_band: clause.confidence_band(),
                clause,
            })
            .collect();

        Self {
            contract: detail.contract,
            clauses,
            insights: detail.insights,
            evidence: detail.evidence,
        }
    }
}
