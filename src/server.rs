//! Axum routes serving buylist reports.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::builder::BuylistReportBuilder;
use crate::client::{DatasetMeta, MtgjsonClient};
use crate::config::{Config, CACHE_CONTROL};
use crate::error::{BuylistError, Result};
use crate::render::OutputFormat;

/// Shared state handed to every handler. Holds no per-request data.
pub struct AppState {
    pub builder: BuylistReportBuilder,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let client = MtgjsonClient::new(config)?;
        Ok(Self {
            builder: BuylistReportBuilder::new(client),
        })
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/ckbuylist", get(ckbuylist))
        .route("/api/meta", get(meta))
        .route("/healthz", get(healthz))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Renders a [`BuylistError`] as a plain-text body with its status.
pub struct AppError(pub BuylistError);

impl From<BuylistError> for AppError {
    fn from(e: BuylistError) -> Self {
        AppError(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("Request failed: {}", self.0);
        } else {
            log::warn!("Request rejected ({}): {}", status.as_u16(), self.0);
        }
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.0.to_string(),
        )
            .into_response()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct BuylistParams {
    pub set: Option<String>,
    pub format: Option<String>,
    pub finish: Option<String>,
}

/// GET /api/ckbuylist?set=MH3&format=json&finish=foil
///
/// Latest Card Kingdom buylist price per card and finish in a set.
pub async fn ckbuylist(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BuylistParams>,
) -> std::result::Result<Response, AppError> {
    let format = OutputFormat::parse(params.format.as_deref());
    log::info!(
        "ckbuylist set={:?} format={:?} finish={:?}",
        params.set,
        format,
        params.finish
    );

    let report = state
        .builder
        .build(params.set.as_deref(), format, params.finish.as_deref())
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, report.format.content_type()),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        report.body,
    )
        .into_response())
}

/// GET /api/meta
///
/// Version and build date of the upstream dataset.
pub async fn meta(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<Json<DatasetMeta>, AppError> {
    let meta = state
        .builder
        .client()
        .fetch_meta()
        .await
        .map_err(|e| BuylistError::Upstream(format!("Meta.json: {e}")))?;
    Ok(Json(meta))
}

pub async fn healthz() -> &'static str {
    "ok"
}
