//! Per-contract analysis records
//!
//! A [`ContractDetail`] is the list record plus the clause analysis, risk
//! insights and supporting evidence produced upstream. The analysis itself
//! is opaque to the dashboard; these types only carry it.

use serde::{Deserialize, Serialize};

use super::contract::{Contract, RiskLevel};

/// Extracted clause with the analyser's confidence in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub title: String,
    pub summary: String,
    pub confidence: f64,
}

/// Coarse confidence classification shown next to each clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl Clause {
    /// Confidence rounded to a whole percentage
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    pub fn confidence_band(&self) -> ConfidenceBand {
        if self.confidence >= 0.8 {
            ConfidenceBand::High
        } else if self.confidence >= 0.6 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

/// Risk observation raised by the analyser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub risk: RiskLevel,
    pub message: String,
}

/// Source excerpt backing the analysis, with relevance in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub source: String,
    pub snippet: String,
    pub relevance: f64,
}

/// Full detail record for a single contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractDetail {
    #[serde(flatten)]
    pub contract: Contract,
    #[serde(default)]
    pub clauses: Vec<Clause>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
}

impl ContractDetail {
    pub fn id(&self) -> &str {
        &self.contract.id
    }
}
