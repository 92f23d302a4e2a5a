//! HTTP Routes
//!
//! 路由定义
//!
//! Endpoints:
//! - /                                        GET  首页（静态 index.html）
//! - /rss                                     GET  RSS 订阅源
//! - /pretend_podcast_that_is_actually_music  GET  单集音频（支持 Range）
//! - /api/ping                                GET  健康检查

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// RSS 订阅源路径
pub const RSS_PATH: &str = "/rss";

/// 单集音频路径
pub const EPISODE_PATH: &str = "/pretend_podcast_that_is_actually_music";

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::index))
        .route(RSS_PATH, get(handlers::get_feed))
        .route(EPISODE_PATH, get(handlers::get_episode))
        .route("/api/ping", get(handlers::ping))
}
