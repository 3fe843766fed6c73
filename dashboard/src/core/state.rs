//! Central state for one dashboard session
//!
//! Pure business logic with no I/O dependencies. The contract service owns
//! one of these and is the only component that mutates it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use shared::{Contract, ContractDetail};

use crate::core::contract_store::ContractStore;
use crate::core::query::{ContractFilter, ContractPage, ContractStats, QueryEngine, QueryUpdate};

/// Progress of the contract list fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FetchState {
    Idle,
    Loading,
    Ready { count: usize, loaded_at: DateTime<Utc> },
    Failed { message: String },
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed { .. })
    }
}

/// Everything the contract table needs in one read
#[derive(Debug, Clone, Serialize)]
pub struct ContractsView {
    pub filter: ContractFilter,
    pub page: ContractPage,
    pub stats: ContractStats,
    pub fetch: FetchState,
}

pub struct DashboardState {
    store: ContractStore,
    query: QueryEngine,
    fetch: FetchState,
}

impl DashboardState {
    pub fn new(page_size: usize) -> Self {
        Self {
            store: ContractStore::new(),
            query: QueryEngine::with_page_size(page_size),
            fetch: FetchState::Idle,
        }
    }

    pub fn store(&self) -> &ContractStore {
        &self.store
    }

    pub fn query(&self) -> &QueryEngine {
        &self.query
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    /// Mark the list fetch as in flight; false if one already is
    pub fn begin_fetch(&mut self) -> bool {
        if self.fetch.is_loading() {
            return false;
        }
        self.fetch = FetchState::Loading;
        true
    }

    /// Record a successful list fetch, replacing the collection
    pub fn complete_fetch(&mut self, contracts: Vec<Contract>) {
        let count = contracts.len();
        self.store.load(contracts);
        self.query.sync_page(self.store.contracts());
        self.fetch = FetchState::Ready {
            count,
            loaded_at: Utc::now(),
        };
    }

    /// Record a failed list fetch; the collection is left as it was
    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        self.fetch = FetchState::Failed { message: message.into() };
    }

    /// Abandon an in-flight fetch that will never report back; no-op otherwise
    pub fn cancel_fetch(&mut self, message: impl Into<String>) -> bool {
        if !self.fetch.is_loading() {
            return false;
        }
        self.fail_fetch(message);
        true
    }

    pub fn cache_details(&mut self, details: HashMap<String, ContractDetail>) {
        self.store.load_details(details);
    }

    pub fn cache_detail(&mut self, id: &str, detail: ContractDetail) {
        self.store.load_detail(id, detail);
    }

    pub fn detail(&self, id: &str) -> Option<&ContractDetail> {
        self.store.get_detail(id)
    }

    pub fn apply_query(&mut self, update: QueryUpdate) -> bool {
        self.query.apply(update)
    }

    pub fn set_filter(&mut self, filter: ContractFilter) -> bool {
        self.query.set_filter(filter)
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.set_page(page);
    }

    pub fn next_page(&mut self) -> usize {
        self.query.next_page(self.store.contracts())
    }

    pub fn previous_page(&mut self) -> usize {
        self.query.previous_page()
    }

    pub fn current_page(&self) -> ContractPage {
        self.query.evaluate(self.store.contracts())
    }

    pub fn stats(&self) -> ContractStats {
        ContractStats::compute(self.store.contracts())
    }

    pub fn view(&self) -> ContractsView {
        self.view_for(&self.query)
    }

    /// View with `update` applied to a copy of the session query
    pub fn preview(&self, update: QueryUpdate) -> ContractsView {
        let mut query = self.query.clone();
        query.apply(update);
        self.view_for(&query)
    }

    fn view_for(&self, query: &QueryEngine) -> ContractsView {
        ContractsView {
            filter: query.filter().clone(),
            page: query.evaluate(self.store.contracts()),
            stats: self.stats(),
            fetch: self.fetch.clone(),
        }
    }
}
