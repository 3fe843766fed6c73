//! Contract list records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SharedError;

/// Opaque contract identifier assigned by the data source
pub type ContractId = String;

/// Lifecycle status of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    Active,
    Expired,
    #[serde(rename = "Renewal Due")]
    RenewalDue,
}

impl ContractStatus {
    pub const ALL: [ContractStatus; 3] = [
        ContractStatus::Active,
        ContractStatus::Expired,
        ContractStatus::RenewalDue,
    ];
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractStatus::Active => write!(f, "Active"),
            ContractStatus::Expired => write!(f, "Expired"),
            ContractStatus::RenewalDue => write!(f, "Renewal Due"),
        }
    }
}

impl FromStr for ContractStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "active" => Ok(ContractStatus::Active),
            "expired" => Ok(ContractStatus::Expired),
            "renewal due" | "renewaldue" => Ok(ContractStatus::RenewalDue),
            _ => Err(SharedError::UnknownStatus { input: s.to_string() }),
        }
    }
}

/// Risk rating attached to contracts and insights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(SharedError::UnknownRisk { input: s.to_string() }),
        }
    }
}

/// Immutable snapshot of one contract as listed by the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub name: String,
    pub parties: String,
    pub start: NaiveDate,
    pub expiry: NaiveDate,
    pub status: ContractStatus,
    pub risk: RiskLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&ContractStatus::RenewalDue).unwrap();
        assert_eq!(json, "\"Renewal Due\"");

        let parsed: ContractStatus = serde_json::from_str("\"Active\"").unwrap();
        assert_eq!(parsed, ContractStatus::Active);
    }

    #[test]
    fn test_status_from_str_accepts_display_and_variant_names() {
        assert_eq!("Renewal Due".parse::<ContractStatus>().unwrap(), ContractStatus::RenewalDue);
        assert_eq!("RenewalDue".parse::<ContractStatus>().unwrap(), ContractStatus::RenewalDue);
        assert_eq!("renewal_due".parse::<ContractStatus>().unwrap(), ContractStatus::RenewalDue);
        assert_eq!("EXPIRED".parse::<ContractStatus>().unwrap(), ContractStatus::Expired);
        assert!("Pending".parse::<ContractStatus>().is_err());
    }

    #[test]
    fn test_risk_from_str() {
        assert_eq!("high".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert_eq!(" Medium ".parse::<RiskLevel>().unwrap(), RiskLevel::Medium);
        assert!("severe".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_contract_parses_data_source_record() {
        let json = r#"{
            "id": "c-001",
            "name": "Master Services Agreement",
            "parties": "Acme Corp & Globex Ltd",
            "start": "2023-01-15",
            "expiry": "2025-01-14",
            "status": "Renewal Due",
            "risk": "High"
        }"#;

        let contract: Contract = serde_json::from_str(json).unwrap();
        assert_eq!(contract.id, "c-001");
        assert_eq!(contract.status, ContractStatus::RenewalDue);
        assert_eq!(contract.risk, RiskLevel::High);
        assert_eq!(contract.start, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
    }

    #[test]
    fn test_unknown_status_rejects_record() {
        let json = r#"{
            "id": "c-002", "name": "n", "parties": "p",
            "start": "2023-01-15", "expiry": "2025-01-14",
            "status": "Suspended", "risk": "Low"
        }"#;

        assert!(serde_json::from_str::<Contract>(json).is_err());
    }
}
