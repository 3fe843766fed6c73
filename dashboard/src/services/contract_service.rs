//! Contract fetch orchestration
//!
//! Owns the dashboard session state and is the only writer of the contract
//! store. List fetches are single in-flight; detail records are fetched on
//! first view and then served from the session cache.

use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::RwLock;

use shared::{ContractDetail, component_info, component_warn};

use crate::core::query::{ContractFilter, ContractStats, QueryUpdate};
use crate::core::state::{ContractsView, DashboardState, FetchState};
use crate::error::{DashboardError, DashboardResult};
use crate::traits::DataSource;

const COMPONENT: &str = "contracts";

/// Marks an in-flight list fetch as failed if the fetch future is dropped
/// before it reports back
struct FetchGuard {
    state: Option<Arc<RwLock<DashboardState>>>,
}

impl FetchGuard {
    fn new(state: &Arc<RwLock<DashboardState>>) -> Self {
        Self {
            state: Some(state.clone()),
        }
    }

    fn disarm(&mut self) {
        self.state = None;
    }
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        let Some(state) = self.state.take() else {
            return;
        };
        component_warn!(COMPONENT, "Contract fetch cancelled before completion");

        match state.try_write() {
            Ok(mut state) => {
                state.cancel_fetch("fetch cancelled");
            }
            Err(_) => {
                if let Ok(handle) = Handle::try_current() {
                    let state = Arc::clone(&state);
                    handle.spawn(async move {
                        state.write().await.cancel_fetch("fetch cancelled");
                    });
                }
            }
        }
    }
}

pub struct ContractService<D: DataSource> {
    source: D,
    state: Arc<RwLock<DashboardState>>,
}

impl<D: DataSource> ContractService<D> {
    pub fn new(source: D, page_size: usize) -> Self {
        Self {
            source,
            state: Arc::new(RwLock::new(DashboardState::new(page_size))),
        }
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    /// Fetch the contract list and replace the collection
    ///
    /// On failure the store keeps its previous contents and the fetch state
    /// records the error for the presentation layer. Dropping the returned
    /// future mid-fetch records a failure too, so a later refresh can retry.
    pub async fn refresh(&self) -> DashboardResult<usize> {
        if !self.state.write().await.begin_fetch() {
            return Err(DashboardError::FetchInProgress);
        }
        let mut guard = FetchGuard::new(&self.state);

        match self.source.fetch_contracts().await {
            Ok(contracts) => {
                let count = contracts.len();
                self.state.write().await.complete_fetch(contracts);
                guard.disarm();
                component_info!(COMPONENT, count, "📋 Loaded contracts from {}", self.source.describe());
                Ok(count)
            }
            Err(e) => {
                self.state.write().await.fail_fetch(e.to_string());
                guard.disarm();
                component_warn!(COMPONENT, error = %e, "Contract fetch failed");
                Err(e)
            }
        }
    }

    /// Detail record for `id`, fetched on first request and cached afterwards
    pub async fn contract_detail(&self, id: &str) -> DashboardResult<ContractDetail> {
        if let Some(detail) = self.state.read().await.detail(id) {
            return Ok(detail.clone());
        }

        let details = self.source.fetch_contract_details().await.inspect_err(|e| {
            component_warn!(COMPONENT, id, error = %e, "Contract detail fetch failed");
        })?;

        let mut state = self.state.write().await;
        state.cache_details(details);
        state
            .detail(id)
            .cloned()
            .ok_or_else(|| DashboardError::ContractNotFound { id: id.to_string() })
    }

    pub async fn view(&self) -> ContractsView {
        self.state.read().await.view()
    }

    pub async fn stats(&self) -> ContractStats {
        self.state.read().await.stats()
    }

    pub async fn fetch_state(&self) -> FetchState {
        self.state.read().await.fetch_state().clone()
    }

    /// View with `update` applied, without touching the session query
    pub async fn preview(&self, update: QueryUpdate) -> ContractsView {
        self.state.read().await.preview(update)
    }

    pub async fn apply_query(&self, update: QueryUpdate) -> ContractsView {
        let mut state = self.state.write().await;
        state.apply_query(update);
        state.view()
    }

    pub async fn set_filter(&self, filter: ContractFilter) -> ContractsView {
        let mut state = self.state.write().await;
        state.set_filter(filter);
        state.view()
    }

    pub async fn set_page(&self, page: usize) -> ContractsView {
        let mut state = self.state.write().await;
        state.set_page(page);
        state.view()
    }

    pub async fn next_page(&self) -> ContractsView {
        let mut state = self.state.write().await;
        state.next_page();
        state.view()
    }

    pub async fn previous_page(&self) -> ContractsView {
        let mut state = self.state.write().await;
        state.previous_page();
        state.view()
    }

    pub async fn cached_detail_count(&self) -> usize {
        self.state.read().await.store().cached_detail_count()
    }
}
