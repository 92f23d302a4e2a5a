//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：本服务只有读操作

mod episode_queries;
mod feed_queries;

pub mod handlers;

pub use episode_queries::*;
pub use feed_queries::*;
