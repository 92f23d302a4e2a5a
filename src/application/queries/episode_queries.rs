//! Episode Queries - 单集合成查询

/// 单集的 MIME 类型
pub const EPISODE_MIME_TYPE: &str = "audio/mpeg";

/// 获取单集查询
///
/// 播客客户端常在 URL 上追加随机参数绕过缓存，
/// 这里把它记下来只为日志，不参与任何计算。
#[derive(Debug, Clone, Default)]
pub struct GetEpisodeQuery {
    pub cache_bust: Option<String>,
}

/// 获取单集响应
///
/// audio_data 的长度恒等于媒体库的固定目标大小。
#[derive(Debug, Clone)]
pub struct GetEpisodeResponse {
    pub audio_data: Vec<u8>,
    pub content_type: String,
    /// 下载时建议的文件名
    pub file_name: String,
}
