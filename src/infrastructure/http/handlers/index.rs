//! Index Handler - 首页

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tokio::fs;

use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 首页 - 返回静态 index.html
///
/// 禁止缓存，刷新页面就能听到换了广告的版本。
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let path = state.static_dir.join("index.html");
    let html = fs::read(&path)
        .await
        .map_err(|e| ApiError::NotFound(format!("index.html not available: {}", e)))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache, no-store, must-revalidate")
        .header(header::PRAGMA, "no-cache")
        .header(header::EXPIRES, "0")
        .body(Body::from(html))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
