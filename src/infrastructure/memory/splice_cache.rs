//! In-Memory Splice Cache Implementation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::ports::{CacheError, CacheStats, SpliceCachePort};

/// 内存成品缓存
///
/// key 空间是「音乐 x 广告」的组合，条目数有上界，不做淘汰。
pub struct InMemorySpliceCache {
    entries: DashMap<String, Vec<u8>>,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl InMemorySpliceCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemorySpliceCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpliceCachePort for InMemorySpliceCache {
    async fn get(&self, cache_key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match self.entries.get(cache_key) {
            Some(entry) => {
                self.hit_count.fetch_add(1, Ordering::Relaxed);
                Ok(Some(entry.clone()))
            }
            None => {
                self.miss_count.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    async fn put(&self, cache_key: &str, data: Vec<u8>) -> Result<(), CacheError> {
        tracing::debug!(cache_key = %cache_key, size = data.len(), "Splice cache entry stored");
        self.entries.insert(cache_key.to_string(), data);
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        let total_size_bytes = self.entries.iter().map(|e| e.value().len() as u64).sum();
        CacheStats {
            total_entries: self.entries.len(),
            total_size_bytes,
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
        }
    }
}
