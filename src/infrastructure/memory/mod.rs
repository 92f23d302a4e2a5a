//! Memory Layer - In-Memory State Management
//!
//! 成品缓存的内存实现

mod splice_cache;

pub use splice_cache::InMemorySpliceCache;
