//! Contract collection and session-scoped detail cache
//!
//! The store performs no validation: callers only hand it data that was
//! fetched and parsed successfully.

use std::collections::HashMap;

use shared::{Contract, ContractDetail};

#[derive(Debug, Default)]
pub struct ContractStore {
    contracts: Vec<Contract>,
    details: HashMap<String, ContractDetail>,
}

impl ContractStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection
    pub fn load(&mut self, contracts: Vec<Contract>) {
        self.contracts = contracts;
    }

    /// Insert or overwrite one cached detail record
    pub fn load_detail(&mut self, id: impl Into<String>, detail: ContractDetail) {
        self.details.insert(id.into(), detail);
    }

    /// Merge a full detail mapping into the cache, overwriting existing ids
    pub fn load_details(&mut self, details: HashMap<String, ContractDetail>) {
        self.details.extend(details);
    }

    pub fn get_detail(&self, id: &str) -> Option<&ContractDetail> {
        self.details.get(id)
    }

    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    pub fn get(&self, id: &str) -> Option<&Contract> {
        self.contracts.iter().find(|contract| contract.id == id)
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn cached_detail_count(&self) -> usize {
        self.details.len()
    }
}
