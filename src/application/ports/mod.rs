//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod splice_cache;
mod splice_encoder;

pub use splice_cache::{splice_cache_key, CacheError, CacheStats, SpliceCachePort};
pub use splice_encoder::{EncodeError, SpliceEncoderPort, SpliceResult};
