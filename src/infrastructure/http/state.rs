//! Application State
//!
//! 包含所有 Query Handlers 的应用状态

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{
    // Query handlers
    GetEpisodeHandler,
    GetFeedHandler,
    // Ports
    SpliceCachePort,
    SpliceEncoderPort,
};
use crate::config::AppConfig;
use crate::domain::MediaLibrary;

/// 应用状态
///
/// 媒体库启动时装载完毕后只读，直接以 Arc 共享。
pub struct AppState {
    // ========== Ports ==========
    pub library: Arc<MediaLibrary>,
    pub encoder: Arc<dyn SpliceEncoderPort>,
    pub splice_cache: Arc<dyn SpliceCachePort>,

    // ========== Query Handlers ==========
    pub get_feed_handler: GetFeedHandler,
    pub get_episode_handler: GetEpisodeHandler,

    // ========== 站点信息 ==========
    pub static_dir: PathBuf,
    pub base_url: Option<String>,
    pub fallback_base_url: String,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        library: Arc<MediaLibrary>,
        encoder: Arc<dyn SpliceEncoderPort>,
        splice_cache: Arc<dyn SpliceCachePort>,
        config: &AppConfig,
    ) -> Self {
        Self {
            // Ports
            library: library.clone(),
            encoder: encoder.clone(),
            splice_cache: splice_cache.clone(),

            // Query handlers
            get_feed_handler: GetFeedHandler::new(
                library.clone(),
                &config.feed.title,
                &config.feed.description,
                &config.feed.language,
            ),
            get_episode_handler: GetEpisodeHandler::new(
                library.clone(),
                encoder.clone(),
                splice_cache.clone(),
            ),

            // 站点信息
            static_dir: config.server.static_dir.clone(),
            base_url: config.server.base_url.clone(),
            fallback_base_url: config.server.public_base_url(),
        }
    }
}
