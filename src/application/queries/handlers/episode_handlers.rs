//! Episode Query Handlers - 单集合成

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::error::ApplicationError;
use crate::application::ports::{splice_cache_key, SpliceCachePort, SpliceEncoderPort};
use crate::application::queries::episode_queries::{
    GetEpisodeQuery, GetEpisodeResponse, EPISODE_MIME_TYPE,
};
use crate::domain::library::MediaLibrary;
use crate::domain::mp3::{padding_tag, PADDING_TAG_MIN};

/// GetEpisode Handler - 合成固定大小的单集
///
/// 不变量：返回的 audio_data 长度恒等于 library.target_size()。
/// 做不到时整个请求失败，绝不返回其他大小。
pub struct GetEpisodeHandler {
    library: Arc<MediaLibrary>,
    encoder: Arc<dyn SpliceEncoderPort>,
    splice_cache: Arc<dyn SpliceCachePort>,
}

impl GetEpisodeHandler {
    pub fn new(
        library: Arc<MediaLibrary>,
        encoder: Arc<dyn SpliceEncoderPort>,
        splice_cache: Arc<dyn SpliceCachePort>,
    ) -> Self {
        Self {
            library,
            encoder,
            splice_cache,
        }
    }

    pub async fn handle(
        &self,
        query: GetEpisodeQuery,
    ) -> Result<GetEpisodeResponse, ApplicationError> {
        if let Some(token) = query.cache_bust.as_deref() {
            debug!(token = token, "Ignoring cache busting token");
        }

        let target_size = self.library.target_size();
        let music = self.library.music();
        // 每次请求独立挑选广告
        let ad = self.library.random_ad();

        let ad_key = ad.map(|a| a.key());
        let cache_key = splice_cache_key(&music.key(), ad_key.as_deref());

        if let Some(cached) = self.splice_cache.get(&cache_key).await? {
            debug!(
                cache_key = %cache_key,
                size = cached.len(),
                "Serving episode from splice cache"
            );
            return Ok(self.response(cached));
        }

        // 编码预算给填充标签留出最小空间
        let budget = target_size
            .checked_sub(PADDING_TAG_MIN as u64)
            .ok_or_else(|| {
                ApplicationError::encoding(format!(
                    "Target size {} cannot hold a padding tag",
                    target_size
                ))
            })?;

        let result = self
            .encoder
            .encode(music.mp3(), ad.map(|a| a.mp3()), budget)
            .await?;

        // 用填充标签把输出补到恰好 target_size
        let gap = (target_size as usize)
            .checked_sub(result.audio_data.len())
            .ok_or_else(|| {
                ApplicationError::encoding(format!(
                    "Encoder produced {} bytes, over the {} byte budget",
                    result.audio_data.len(),
                    budget
                ))
            })?;
        let padding = padding_tag(gap)?;

        let mut output = Vec::with_capacity(target_size as usize);
        output.extend_from_slice(&padding);
        output.extend_from_slice(&result.audio_data);

        // 大小不符的输出绝不发出
        if output.len() as u64 != target_size {
            return Err(ApplicationError::SizeMismatch {
                expected: target_size,
                actual: output.len() as u64,
            });
        }

        info!(
            ad = ad.map(|a| a.name()).unwrap_or("none"),
            duration_ms = result.duration_ms,
            inserted_ms = result.inserted_ms,
            dropped_frames = result.dropped_frames,
            padding_bytes = gap,
            size = output.len(),
            "Synthesized episode"
        );

        self.splice_cache.put(&cache_key, output.clone()).await?;

        Ok(self.response(output))
    }

    fn response(&self, audio_data: Vec<u8>) -> GetEpisodeResponse {
        GetEpisodeResponse {
            audio_data,
            content_type: EPISODE_MIME_TYPE.to_string(),
            file_name: self.library.music().name().to_string(),
        }
    }
}
