//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpliceEncoder、SpliceCache）
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod error;
pub mod ports;
pub mod queries;

pub use error::ApplicationError;

pub use ports::{
    // Splice cache
    splice_cache_key,
    CacheError,
    CacheStats,
    SpliceCachePort,
    // Splice encoder
    EncodeError,
    SpliceEncoderPort,
    SpliceResult,
};

pub use queries::{
    // Episode queries
    GetEpisodeQuery,
    GetEpisodeResponse,
    EPISODE_MIME_TYPE,
    // Feed queries
    GetFeedQuery,
    GetFeedResponse,
    // Handlers
    handlers::{GetEpisodeHandler, GetFeedHandler},
};
