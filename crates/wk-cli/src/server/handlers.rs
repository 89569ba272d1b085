use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use wk_calendar::{CONTENT_TYPE, LevelProgress};
use wk_core::ApiKey;

use super::AppState;
use super::error::ApiError;

pub async fn healthz() -> &'static str {
    "ok"
}

/// `GET /calendars/{api_key}/blocker.ics`
pub async fn blocker_calendar(
    State(state): State<AppState>,
    Path(api_key): Path<String>,
) -> Result<Response, ApiError> {
    let service = state.ctx.service(ApiKey::parse(&api_key)?);
    Ok(ics(service.blocker_calendar().await?))
}

/// `GET /calendars/{api_key}/reviews.ics`
pub async fn review_calendar(
    State(state): State<AppState>,
    Path(api_key): Path<String>,
) -> Result<Response, ApiError> {
    let service = state.ctx.service(ApiKey::parse(&api_key)?);
    Ok(ics(service.review_calendar().await?))
}

/// `GET /calendars/{api_key}/progress.json`
pub async fn level_progress(
    State(state): State<AppState>,
    Path(api_key): Path<String>,
) -> Result<Json<LevelProgress>, ApiError> {
    let service = state.ctx.service(ApiKey::parse(&api_key)?);
    Ok(Json(service.level_progress().await?))
}

fn ics(body: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}
