//! REST API handlers
//!
//! JSON endpoints for the contract table, contract detail and upload panel.
//! Read endpoints answer with `{"status": "ok", "data": ...}`, mutations with
//! `{"status": "success", "data": ...}`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde_json::{Value, json};

use crate::error::DashboardResult;
use crate::traits::DataSource;
use crate::types::{ContractDetailView, ContractsQuery, FilterRequest, PageRequest, UploadRequest, UploadView, parse_upload_id};
use crate::web::ApiState;

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Current contract page - /api/contracts
///
/// Query parameters shape this response only; the session query changes
/// through `PUT /api/contracts/query` and the page routes.
pub async fn list_contracts<D>(
    State(state): State<ApiState<D>>,
    Query(params): Query<ContractsQuery>,
) -> DashboardResult<Json<Value>>
where
    D: DataSource + 'static,
{
    let update = params.into_update()?;
    let view = if update.is_empty() {
        state.contracts.view().await
    } else {
        state.contracts.preview(update).await
    };

    Ok(Json(json!({ "status": "ok", "data": view })))
}

/// Replace search text and filters - /api/contracts/query
pub async fn update_query<D>(
    State(state): State<ApiState<D>>,
    Json(request): Json<FilterRequest>,
) -> DashboardResult<Json<Value>>
where
    D: DataSource + 'static,
{
    let update = request.into_update()?;
    let view = state.contracts.apply_query(update).await;
    Ok(Json(json!({ "status": "success", "data": view })))
}

/// Jump to a page - /api/contracts/page
pub async fn set_page<D>(
    State(state): State<ApiState<D>>,
    Json(request): Json<PageRequest>,
) -> Json<Value>
where
    D: DataSource + 'static,
{
    let view = state.contracts.set_page(request.page).await;
    Json(json!({ "status": "success", "data": view }))
}

pub async fn next_page<D>(State(state): State<ApiState<D>>) -> Json<Value>
where
    D: DataSource + 'static,
{
    let view = state.contracts.next_page().await;
    Json(json!({ "status": "success", "data": view }))
}

pub async fn previous_page<D>(State(state): State<ApiState<D>>) -> Json<Value>
where
    D: DataSource + 'static,
{
    let view = state.contracts.previous_page().await;
    Json(json!({ "status": "success", "data": view }))
}

/// Summary cards - /api/contracts/stats
pub async fn contract_stats<D>(State(state): State<ApiState<D>>) -> Json<Value>
where
    D: DataSource + 'static,
{
    let stats = state.contracts.stats().await;
    Json(json!({ "status": "ok", "data": stats }))
}

/// Retry the list fetch - /api/contracts/reload
pub async fn reload_contracts<D>(State(state): State<ApiState<D>>) -> DashboardResult<Json<Value>>
where
    D: DataSource + 'static,
{
    let count = state.contracts.refresh().await?;
    Ok(Json(json!({
        "status": "success",
        "message": format!("Loaded {count} contracts"),
        "data": { "count": count }
    })))
}

/// Contract detail - /api/contracts/:id
pub async fn contract_detail<D>(
    State(state): State<ApiState<D>>,
    Path(id): Path<String>,
) -> DashboardResult<Json<Value>>
where
    D: DataSource + 'static,
{
    let detail = state.contracts.contract_detail(&id).await?;
    Ok(Json(json!({ "status": "ok", "data": ContractDetailView::from(detail) })))
}

/// Upload panel - /api/uploads
pub async fn list_uploads<D>(State(state): State<ApiState<D>>) -> Json<Value>
where
    D: DataSource + 'static,
{
    let entries = state.uploads.entries().await;
    let uploads: Vec<UploadView> = entries.iter().map(UploadView::from).collect();
    let summary = state.uploads.summary().await;

    Json(json!({
        "status": "ok",
        "data": {
            "uploads": uploads,
            "summary": summary
        }
    }))
}

/// Offer files to the intake policy - /api/uploads
pub async fn create_uploads<D>(
    State(state): State<ApiState<D>>,
    Json(request): Json<UploadRequest>,
) -> (StatusCode, Json<Value>)
where
    D: DataSource + 'static,
{
    let created = state.uploads.enqueue(request.files).await;
    let uploads: Vec<UploadView> = created.iter().map(UploadView::from).collect();

    let status = if uploads.is_empty() { StatusCode::OK } else { StatusCode::CREATED };
    (
        status,
        Json(json!({
            "status": "success",
            "data": { "uploads": uploads }
        })),
    )
}

/// Dismiss an upload in any state - /api/uploads/:id
pub async fn dismiss_upload<D>(
    State(state): State<ApiState<D>>,
    Path(id): Path<String>,
) -> DashboardResult<Json<Value>>
where
    D: DataSource + 'static,
{
    let id = parse_upload_id(&id)?;
    let entry = state.uploads.dismiss(id).await?;
    Ok(Json(json!({
        "status": "success",
        "data": UploadView::from(&entry)
    })))
}
