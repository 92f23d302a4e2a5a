//! Splice Cache Port - 成品缓存管理
//!
//! 缓存整段合成结果。key 由「音乐 + 广告」的组合决定，
//! 组合数有限（音乐 x 广告数），无需淘汰策略。

use async_trait::async_trait;
use thiserror::Error;

/// Splice Cache 错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    BackendError(String),
}

/// 缓存统计信息
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_size_bytes: u64,
    pub hit_count: u64,
    pub miss_count: u64,
}

/// Splice Cache Port
#[async_trait]
pub trait SpliceCachePort: Send + Sync {
    /// 获取缓存的合成结果
    async fn get(&self, cache_key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// 存入合成结果
    async fn put(&self, cache_key: &str, data: Vec<u8>) -> Result<(), CacheError>;

    /// 获取缓存统计信息
    async fn stats(&self) -> CacheStats;
}

/// 生成缓存 key
///
/// 使用 md5(music) + md5(ad) 的组合；没有广告时第二段为 "none"。
pub fn splice_cache_key(music_key: &str, ad_key: Option<&str>) -> String {
    let music_hash = format!("{:x}", md5::compute(music_key.as_bytes()));
    match ad_key {
        Some(ad) => format!("{}:{:x}", music_hash, md5::compute(ad.as_bytes())),
        None => format!("{}:none", music_hash),
    }
}
