//! Builders shared by the core unit tests

use chrono::NaiveDate;
use shared::{Clause, Contract, ContractDetail, ContractStatus, Evidence, Insight, RiskLevel};

pub fn named(id: &str, name: &str, parties: &str, status: ContractStatus, risk: RiskLevel) -> Contract {
    Contract {
        id: id.to_string(),
        name: name.to_string(),
        parties: parties.to_string(),
        start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        expiry: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        status,
        risk,
    }
}

pub fn contract(id: &str, status: ContractStatus, risk: RiskLevel) -> Contract {
    named(id, &format!("Contract {id}"), &format!("Party {id} & Counterparty"), status, risk)
}

/// `active` Active, then `expired` Expired, then `renewal_due` RenewalDue contracts
pub fn scenario_contracts(active: usize, expired: usize, renewal_due: usize) -> Vec<Contract> {
    let statuses = std::iter::repeat_n(ContractStatus::Active, active)
        .chain(std::iter::repeat_n(ContractStatus::Expired, expired))
        .chain(std::iter::repeat_n(ContractStatus::RenewalDue, renewal_due));

    statuses
        .enumerate()
        .map(|(i, status)| {
            let risk = RiskLevel::ALL[i % RiskLevel::ALL.len()];
            contract(&format!("c-{:03}", i + 1), status, risk)
        })
        .collect()
}

pub fn detail_for(contract: Contract) -> ContractDetail {
    ContractDetail {
        contract,
        clauses: vec![Clause {
            title: "Termination".to_string(),
            summary: "30 days written notice".to_string(),
            confidence: 0.92,
        }],
        insights: vec![Insight {
            risk: RiskLevel::Medium,
            message: "Renewal window closes in 60 days".to_string(),
        }],
        evidence: vec![Evidence {
            source: "Section 9".to_string(),
            snippet: "either party may terminate".to_string(),
            relevance: 0.8,
        }],
    }
}
