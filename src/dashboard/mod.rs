//! Browser dashboard over the persisted forecast table.
//!
//! A small axum app serves an embedded static page plus two JSON endpoints.
//! The page drives a single-selection location dropdown; every selection
//! change refetches `/api/series` and rerenders the line chart. With zero
//! rows persisted the page shows a plain "no data" message instead of the
//! control and chart.

pub mod series;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use polars::prelude::DataFrame;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use series::ChartSeries;

const INDEX_HTML: &str = include_str!("ui/index.html");
const APP_JS: &str = include_str!("ui/app.js");

/// Shared state for the HTTP handlers: the forecast table, loaded once
/// after persistence completes. Data stays as-is until the process reruns.
#[derive(Clone)]
pub struct AppState {
    frame: Arc<DataFrame>,
}

impl AppState {
    pub fn new(frame: DataFrame) -> AppState {
        AppState {
            frame: Arc::new(frame),
        }
    }
}

/// Builds the dashboard router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/static/app.js", get(serve_app_js))
        .route("/api/locations", get(get_locations))
        .route("/api/series", get(get_series))
        .with_state(state)
}

/// GET /
async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /static/app.js
async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        APP_JS,
    )
        .into_response()
}

/// GET /api/locations
///
/// Distinct locations in first-seen order; empty when no rows are persisted.
async fn get_locations(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let locations = series::locations(&state.frame).map_err(ApiError::internal)?;
    Ok(Json(json!({ "locations": locations })))
}

#[derive(Debug, Deserialize)]
struct SeriesQuery {
    location: String,
}

/// GET /api/series?location=...
///
/// The filter/reshape step for one selection. Unknown locations are 404 so a
/// stale page cannot silently chart an empty series.
async fn get_series(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<ChartSeries>, ApiError> {
    let known = series::locations(&state.frame).map_err(ApiError::internal)?;
    if !known.iter().any(|l| l == &query.location) {
        return Err(ApiError::UnknownLocation(query.location));
    }
    let series = series::series_for(&state.frame, &query.location).map_err(ApiError::internal)?;
    Ok(Json(series))
}

/// Handler-level errors, rendered as JSON.
#[derive(Debug)]
enum ApiError {
    UnknownLocation(String),
    Internal(String),
}

impl ApiError {
    fn internal(e: polars::error::PolarsError) -> ApiError {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::UnknownLocation(location) => (
                StatusCode::NOT_FOUND,
                format!("Unknown location '{location}'"),
            ),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
