//! Service trait definitions for dependency injection
//!
//! All I/O is abstracted through these traits for testability

use async_trait::async_trait;
use std::collections::HashMap;

use shared::{Contract, ContractDetail};

use crate::error::DashboardResult;

/// Read-only contract data source
///
/// Implementations must return an error rather than partial data: a failed
/// or unparseable fetch never reaches the contract store.
#[mockall::automock]
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the full contract list (list endpoint)
    async fn fetch_contracts(&self) -> DashboardResult<Vec<Contract>>;

    /// Fetch the id → detail mapping (detail endpoint)
    async fn fetch_contract_details(&self) -> DashboardResult<HashMap<String, ContractDetail>>;

    /// Human readable location, for logs
    fn describe(&self) -> String;
}
