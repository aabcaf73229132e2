//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use super::dto::{
    DatasetSummary, FeaturesQuery, FusedMatrix, HealthResponse, LabelsResponse, LegendsResponse, RefreshRequest,
    RenderQuery, SensorsResponse, StatisticsResponse, MAX_RENDER_SIDE,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{Alert, DataSource, ExportSnapshot, MapId, OverlayId, RasterImage};
use crate::services::{export, pipeline};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const IMAGE_WIDTH: HeaderName = HeaderName::from_static("x-image-width");
const IMAGE_HEIGHT: HeaderName = HeaderName::from_static("x-image-height");

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint reporting the active dataset generation.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        generation: state.store.generation(),
    }))
}

// =============================================================================
// Dataset lifecycle
// =============================================================================

/// POST /v1/datasets
///
/// Generate a fresh dataset, run the full pipeline and publish it.
pub async fn refresh_dataset(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<(StatusCode, Json<DatasetSummary>), AppError> {
    let seed = request
        .seed
        .or(state.config.generator.seed)
        .unwrap_or_else(rand::random::<u64>);
    let config = state.config.clone();
    let today = Utc::now().date_naive();

    // Generation and labeling are CPU-bound
    let snapshot = tokio::task::spawn_blocking(move || match request.source {
        DataSource::Demo => pipeline::load_demo(&config, seed, today),
        DataSource::Upload => pipeline::load_upload(&config, seed, today),
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    let published = state.store.publish(snapshot);
    Ok((
        StatusCode::CREATED,
        Json(DatasetSummary::from(published.as_ref())),
    ))
}

/// GET /v1/datasets/current
pub async fn get_current_dataset(State(state): State<AppState>) -> HandlerResult<DatasetSummary> {
    let snapshot = state.store.current()?;
    Ok(Json(DatasetSummary::from(snapshot.as_ref())))
}

// =============================================================================
// Derived data
// =============================================================================

/// GET /v1/datasets/current/statistics
pub async fn get_statistics(State(state): State<AppState>) -> HandlerResult<StatisticsResponse> {
    let snapshot = state.store.current()?;
    Ok(Json(StatisticsResponse {
        statistics: snapshot.statistics,
        rows: snapshot.statistics.rows(),
    }))
}

/// GET /v1/datasets/current/labels
pub async fn get_labels(State(state): State<AppState>) -> HandlerResult<LabelsResponse> {
    let snapshot = state.store.current()?;
    let counts = snapshot.label_counts;
    let (low, medium_cumulative) = counts.risk_ratios();
    Ok(Json(LabelsResponse {
        label_counts: counts,
        stress_ratio: counts.stress_ratio(snapshot.total_pixels()),
        low_risk_ratio: low,
        medium_cumulative_ratio: medium_cumulative,
        high_risk_percent: counts.high_risk_percent(),
    }))
}

/// GET /v1/datasets/current/alerts
pub async fn get_alerts(State(state): State<AppState>) -> HandlerResult<Vec<Alert>> {
    let snapshot = state.store.current()?;
    Ok(Json(snapshot.alerts.clone()))
}

/// GET /v1/datasets/current/sensors
pub async fn get_sensors(State(state): State<AppState>) -> HandlerResult<SensorsResponse> {
    let snapshot = state.store.current()?;
    Ok(Json(SensorsResponse {
        records: snapshot.sensors.records().to_vec(),
        summary: snapshot.sensor_summary,
    }))
}

/// GET /v1/datasets/current/features
///
/// Per-pixel index values fused with the standardized sensor record nearest
/// to `?date=`.
pub async fn get_features(
    State(state): State<AppState>,
    Query(query): Query<FeaturesQuery>,
) -> HandlerResult<FusedMatrix> {
    let snapshot = state.store.current()?;
    let matrix =
        tokio::task::spawn_blocking(move || pipeline::fused_features(&snapshot, query.date))
            .await
            .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    matrix
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Current dataset has no sensor records".to_string()))
}

// =============================================================================
// Raster Endpoints
// =============================================================================

fn render_size(query: &RenderQuery, default: (usize, usize)) -> Result<(usize, usize), AppError> {
    let width = query.width.unwrap_or(default.0);
    let height = query.height.unwrap_or(default.1);
    if width == 0 || height == 0 || width > MAX_RENDER_SIDE || height > MAX_RENDER_SIDE {
        return Err(AppError::BadRequest(format!(
            "Render size must be between 1 and {} pixels per side, got {}x{}",
            MAX_RENDER_SIDE, width, height
        )));
    }
    Ok((width, height))
}

fn raster_response(image: RasterImage) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (IMAGE_WIDTH, image.width.to_string()),
            (IMAGE_HEIGHT, image.height.to_string()),
        ],
        image.pixels,
    )
        .into_response()
}

/// GET /v1/datasets/current/maps/{map_id}
///
/// Raw RGBA8888 rendering of one index map.
pub async fn get_map(
    State(state): State<AppState>,
    Path(map_id): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, AppError> {
    let map: MapId = map_id.parse()?;
    let render = &state.config.render;
    let (width, height) = render_size(&query, (render.map_width, render.map_height))?;
    let snapshot = state.store.current()?;

    let image = tokio::task::spawn_blocking(move || {
        pipeline::render_map(&snapshot, map, width, height)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(raster_response(image))
}

/// GET /v1/datasets/current/overlays/{overlay_id}
///
/// Raw RGBA8888 rendering of the stress or pest-risk overlay.
pub async fn get_overlay(
    State(state): State<AppState>,
    Path(overlay_id): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, AppError> {
    let overlay: OverlayId = overlay_id.parse()?;
    let render = &state.config.render;
    let (width, height) = render_size(&query, (render.overlay_width, render.overlay_height))?;
    let snapshot = state.store.current()?;

    let image = tokio::task::spawn_blocking(move || {
        pipeline::render_overlay(&snapshot, overlay, width, height)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(raster_response(image))
}

/// GET /v1/datasets/current/legends
pub async fn get_legends(State(state): State<AppState>) -> HandlerResult<LegendsResponse> {
    let snapshot = state.store.current()?;
    Ok(Json(LegendsResponse {
        maps: MapId::ALL
            .into_iter()
            .map(|map| pipeline::map_legend(&snapshot, map))
            .collect(),
        overlays: OverlayId::ALL
            .into_iter()
            .map(|overlay| pipeline::overlay_legend(&snapshot, overlay))
            .collect(),
    }))
}

// =============================================================================
// Export
// =============================================================================

fn export_snapshot(state: &AppState) -> Result<ExportSnapshot, AppError> {
    let snapshot = state.store.current()?;
    Ok(ExportSnapshot::from_snapshot(
        &snapshot,
        Utc::now(),
        state.config.generator.export_sensor_sample,
    ))
}

/// GET /v1/datasets/current/export
pub async fn get_export(State(state): State<AppState>) -> HandlerResult<ExportSnapshot> {
    Ok(Json(export_snapshot(&state)?))
}

/// GET /v1/datasets/current/report
pub async fn get_report(State(state): State<AppState>) -> Result<String, AppError> {
    Ok(export::text_report(&export_snapshot(&state)?))
}

/// GET /v1/datasets/current/report/images
pub async fn get_image_report(State(state): State<AppState>) -> Result<String, AppError> {
    Ok(export::image_report(&export_snapshot(&state)?))
}
