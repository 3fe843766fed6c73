//! Main dashboard implementation
//!
//! Wires the contract service and upload queue into the axum router and owns
//! the serve loop with graceful shutdown.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use shared::{component_info, component_warn, logging};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::services::{ContractService, UploadQueue};
use crate::traits::DataSource;
use crate::web::ApiState;
use crate::web::handlers::api;

const COMPONENT: &str = "dashboard";

/// Dashboard server with its data source injected
pub struct Dashboard<D: DataSource + 'static> {
    config: DashboardConfig,
    contracts: Arc<ContractService<D>>,
    uploads: UploadQueue,
    shutdown_tx: mpsc::Sender<()>,
    shutdown_rx: Option<mpsc::Receiver<()>>,
}

impl<D: DataSource + 'static> Dashboard<D> {
    pub fn new(config: DashboardConfig, source: D) -> Self {
        let contracts = Arc::new(ContractService::new(source, config.page_size));
        let uploads = UploadQueue::new(&config.uploads, config.intake.clone());
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        Self {
            config,
            contracts,
            uploads,
            shutdown_tx,
            shutdown_rx: Some(shutdown_rx),
        }
    }

    pub fn contracts(&self) -> &Arc<ContractService<D>> {
        &self.contracts
    }

    pub fn uploads(&self) -> &UploadQueue {
        &self.uploads
    }

    pub fn get_shutdown_sender(&self) -> mpsc::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        let state = ApiState::new(self.contracts.clone(), self.uploads.clone());

        Router::new()
            .route("/health", get(api::health_check))
            // Contract table
            .route("/api/contracts", get(api::list_contracts::<D>))
            .route("/api/contracts/query", put(api::update_query::<D>))
            .route("/api/contracts/page", put(api::set_page::<D>))
            .route("/api/contracts/page/next", post(api::next_page::<D>))
            .route("/api/contracts/page/previous", post(api::previous_page::<D>))
            .route("/api/contracts/stats", get(api::contract_stats::<D>))
            .route("/api/contracts/reload", post(api::reload_contracts::<D>))
            .route("/api/contracts/:id", get(api::contract_detail::<D>))
            // Upload panel
            .route(
                "/api/uploads",
                get(api::list_uploads::<D>).post(api::create_uploads::<D>),
            )
            .route("/api/uploads/:id", delete(api::dismiss_upload::<D>))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(state)
    }

    /// Serve until a shutdown signal arrives, loading contracts alongside, then stop every upload timer
    pub async fn run(&mut self) -> DashboardResult<()> {
        let mut shutdown_rx = self
            .shutdown_rx
            .take()
            .ok_or_else(|| DashboardError::ServerStartup("dashboard is already running".to_string()))?;

        let bind_address = self.config.bind_address;
        let listener = TcpListener::bind(bind_address)
            .await
            .map_err(|e| DashboardError::ServerStartup(format!("Failed to bind to {bind_address}: {e}")))?;
        let local_addr = listener.local_addr()?;

        // Load in the background so a slow source cannot hold off serving; a
        // failure is recorded in the fetch state and clients retry via reload
        let initial_load = tokio::spawn({
            let contracts = self.contracts.clone();
            async move {
                if let Err(e) = contracts.refresh().await {
                    component_warn!(COMPONENT, error = %e, "Initial contract load failed");
                }
            }
        });

        component_info!(COMPONENT, address = %local_addr, "🌐 Dashboard API listening on http://{}", local_addr);

        let served = axum::serve(listener, self.build_router())
            .with_graceful_shutdown(async move {
                shutdown_rx.recv().await;
            })
            .await
            .map_err(|e| DashboardError::ServerStartup(format!("Server error: {e}")));

        // Bounded by the data source timeout
        if let Err(e) = initial_load.await {
            logging::log_error(COMPONENT, "Initial contract load", &e);
        }
        served?;

        let cleared = self.uploads.clear().await;
        logging::log_shutdown(COMPONENT, &format!("stopped serving, cleared {cleared} upload(s)"));
        Ok(())
    }
}
