//! Ping Handler
//!
//! 健康检查端点，顺带暴露媒体库概况

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// 单集的固定字节数（订阅源声明的 enclosure length）
    pub episode_size: u64,
    /// 可供轮换的广告数
    pub ads: usize,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        episode_size: state.library.target_size(),
        ads: state.library.ads().len(),
    })
}
