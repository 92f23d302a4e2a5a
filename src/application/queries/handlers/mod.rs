//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod episode_handlers;
mod feed_handlers;

pub use episode_handlers::*;
pub use feed_handlers::*;
