//! Episode Handlers - 固定大小的"单集"音频

use std::io::Cursor;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use tokio_util::io::ReaderStream;

use crate::application::GetEpisodeQuery;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 单集音频请求
///
/// 完整响应恒为 target_size 字节，Range 请求返回其切片。
/// 查询串是播客客户端的缓存击穿参数，整体忽略。
pub async fn get_episode(
    State(state): State<Arc<AppState>>,
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let query = GetEpisodeQuery {
        cache_bust: raw_query,
    };
    let result = state.get_episode_handler.handle(query).await?;

    let audio = result.audio_data;
    let total_size = audio.len() as u64;
    let disposition = format!("attachment; filename=\"{}\"", result.file_name);

    // Range 解析失败按无 Range 处理，退回完整响应
    let range = headers
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| parse_range_header(v, total_size));

    let (status, body_bytes, content_range) = match range {
        Some((start, end)) => {
            let slice = audio[start as usize..=end as usize].to_vec();
            let content_range = format!("bytes {}-{}/{}", start, end, total_size);
            (StatusCode::PARTIAL_CONTENT, slice, Some(content_range))
        }
        None => (StatusCode::OK, audio, None),
    };

    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(header::CONTENT_LENGTH, body_bytes.len())
        .header(header::CONTENT_DISPOSITION, disposition)
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::CACHE_CONTROL, "no-cache, no-store, must-revalidate")
        .header(header::PRAGMA, "no-cache")
        .header(header::EXPIRES, "0");
    if let Some(content_range) = content_range {
        builder = builder.header(header::CONTENT_RANGE, content_range);
    }

    let stream = ReaderStream::new(Cursor::new(body_bytes));
    builder
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}

/// 解析 Range 头，返回字节闭区间 (start, end)
///
/// 非法或越界的 Range 返回 None，调用方退回完整响应。
fn parse_range_header(header: &str, total_size: u64) -> Option<(u64, u64)> {
    if total_size == 0 {
        return None;
    }
    let header = header.strip_prefix("bytes=")?;

    let parts: Vec<&str> = header.split('-').collect();
    if parts.len() != 2 {
        return None;
    }

    let start = parts[0].trim();
    let end = parts[1].trim();

    match (start.is_empty(), end.is_empty()) {
        // bytes=-500（最后 500 字节）
        (true, false) => {
            let suffix_len: u64 = end.parse().ok()?;
            if suffix_len == 0 {
                return None;
            }
            let start = total_size.saturating_sub(suffix_len);
            Some((start, total_size - 1))
        }
        // bytes=500-（从 500 到结尾）
        (false, true) => {
            let start: u64 = start.parse().ok()?;
            if start >= total_size {
                return None;
            }
            Some((start, total_size - 1))
        }
        // bytes=0-499
        (false, false) => {
            let start: u64 = start.parse().ok()?;
            let end: u64 = end.parse().ok()?;
            if start >= total_size {
                return None;
            }
            let end = end.min(total_size - 1);
            if start > end {
                return None;
            }
            Some((start, end))
        }
        // bytes=-（非法）
        (true, true) => None,
    }
}
