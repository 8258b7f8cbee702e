use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::location::{AxisOrder, GeoError, Normalizer};
use crate::providers::{self, Conversion};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

impl From<GeoError> for ApiError {
    fn from(e: GeoError) -> Self {
        let status = match e {
            GeoError::Empty | GeoError::UnknownProvider(_) => StatusCode::BAD_REQUEST,
            GeoError::Unrecognized(_) | GeoError::OutOfRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };
        ApiError(status, e.to_string())
    }
}

// ─── GET /api/convert ────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ConvertQuery {
    pub q: Option<String>,
    /// `lonlat` to read bare pairs longitude first.
    pub order: Option<AxisOrder>,
    /// Comma-separated provider names.
    pub provider: Option<String>,
}

pub async fn convert(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConvertQuery>,
) -> Result<Json<Conversion>, ApiError> {
    let start = Instant::now();

    let query = params.q.as_deref().unwrap_or("").trim();
    if query.is_empty() {
        return Err(ApiError(StatusCode::BAD_REQUEST, "Missing 'q' parameter".into()));
    }

    let normalizer = match params.order {
        Some(order) => Normalizer::with_axis_order(order),
        None => state.normalizer,
    };
    let names: Vec<String> = params
        .provider
        .as_deref()
        .map(|p| {
            p.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let resolution = normalizer.normalize(query)?;
    let conversion = Conversion::new(&resolution, &names)?;

    log::info!(
        "convert '{}' -> {} in {:?}",
        query,
        conversion.canonical,
        start.elapsed()
    );
    Ok(Json(conversion))
}

// ─── GET /api/providers ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProviderInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub default_zoom: Option<u8>,
}

pub async fn provider_list() -> Json<Vec<ProviderInfo>> {
    Json(
        providers::all()
            .iter()
            .map(|p| ProviderInfo {
                name: p.name,
                label: p.label,
                default_zoom: p.default_zoom,
            })
            .collect(),
    )
}
