//! Feed Handlers - RSS 订阅源

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use std::sync::Arc;

use crate::application::GetFeedQuery;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::routes::{EPISODE_PATH, RSS_PATH};
use crate::infrastructure::http::state::AppState;

/// 解析本次请求应使用的 Base URL
///
/// 优先级：显式配置 > 请求 Host 头 > 监听地址推导
fn resolve_base_url(configured: Option<&str>, host: Option<&str>, fallback: &str) -> String {
    if let Some(url) = configured {
        return url.trim_end_matches('/').to_string();
    }
    if let Some(host) = host {
        return format!("http://{}", host);
    }
    fallback.trim_end_matches('/').to_string()
}

pub async fn get_feed(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
    let base_url = resolve_base_url(
        state.base_url.as_deref(),
        host,
        &state.fallback_base_url,
    );

    let query = GetFeedQuery {
        site_link: format!("{}/", base_url),
        self_link: format!("{}{}", base_url, RSS_PATH),
        episode_url: format!("{}{}", base_url, EPISODE_PATH),
    };

    let result = state.get_feed_handler.handle(query).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .body(Body::from(result.xml))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
