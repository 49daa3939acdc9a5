//! HTTP handlers for the REST API.
//!
//! Every handler reads the snapshot installed at the time of the request.
//! Chart recomputation runs on the blocking pool.

use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use tokio::task;

use super::dto::{
    ChartRequest, ChartsResponse, CountryList, DashboardData, Figure, HealthResponse,
    SummaryData, TableData,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::Metric;
use crate::routes::dashboard::last_update_message;
use crate::services::dashboard::{resolve_filters, respond};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const INDEX_HTML: &str = include_str!("../../static/index.html");

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Reports the installed snapshot so operators can see refreshes land.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let snapshot = state.store.current();
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        snapshot_version: snapshot.version,
        data_as_of: snapshot.data.as_of(),
        refreshed_at: snapshot.refreshed_at,
    }))
}

/// GET /
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// =============================================================================
// Page data
// =============================================================================

/// GET /v1/dashboard
///
/// Everything the page renders on first load.
pub async fn get_dashboard(State(state): State<AppState>) -> HandlerResult<DashboardData> {
    let snapshot = state.store.current();
    let view = state.controller.state();

    let data = task::spawn_blocking(move || {
        let hours = snapshot.hours_since_refresh(chrono::Utc::now());
        DashboardData {
            summary: snapshot.summary.clone(),
            table: snapshot.table.clone(),
            countries: snapshot.countries.clone(),
            map: snapshot.map.clone(),
            sunbursts: snapshot.sunbursts.clone(),
            charts: respond(&view, &snapshot),
            refreshed_at: snapshot.refreshed_at,
            last_update: last_update_message(hours),
        }
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(data))
}

/// GET /v1/summary
pub async fn get_summary(State(state): State<AppState>) -> HandlerResult<SummaryData> {
    Ok(Json(state.store.current().summary.clone()))
}

/// GET /v1/table
pub async fn get_table(State(state): State<AppState>) -> HandlerResult<TableData> {
    Ok(Json(state.store.current().table.clone()))
}

/// GET /v1/countries
pub async fn get_countries(State(state): State<AppState>) -> HandlerResult<CountryList> {
    Ok(Json(state.store.current().countries.clone()))
}

/// GET /v1/map
pub async fn get_map(State(state): State<AppState>) -> HandlerResult<Figure> {
    Ok(Json(state.store.current().map.clone()))
}

/// GET /v1/sunburst/{metric}
pub async fn get_sunburst(
    State(state): State<AppState>,
    Path(metric): Path<String>,
) -> HandlerResult<Figure> {
    let metric: Metric = metric.parse().map_err(AppError::NotFound)?;
    Ok(Json(state.store.current().sunburst(metric).clone()))
}

// =============================================================================
// Charts
// =============================================================================

/// GET /v1/charts
///
/// The thirteen charts for the current view state.
pub async fn get_charts(State(state): State<AppState>) -> HandlerResult<ChartsResponse> {
    let snapshot = state.store.current();
    let view = state.controller.state();

    let response = task::spawn_blocking(move || respond(&view, &snapshot))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(response))
}

/// POST /v1/charts
///
/// Submit the controls. Invalid values are clamped or replaced by defaults,
/// so this only fails if the chart task itself fails.
pub async fn submit_charts(
    State(state): State<AppState>,
    Json(request): Json<ChartRequest>,
) -> HandlerResult<ChartsResponse> {
    let snapshot = state.store.current();
    let filters = resolve_filters(&request, &snapshot);
    let view = state.controller.submit(filters);

    let response = task::spawn_blocking(move || respond(&view, &snapshot))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(response))
}
