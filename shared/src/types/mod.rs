//! Core types used throughout the dashboard
//!
//! Everything here mirrors the JSON documents served by the contract data
//! source (`contracts.json` and `contract-details.json`).

pub mod contract;
pub mod detail;

pub use contract::{Contract, ContractId, ContractStatus, RiskLevel};
pub use detail::{Clause, ConfidenceBand, ContractDetail, Evidence, Insight};
