//! Domain Layer - 领域层
//!
//! 与传输和存储无关的核心模型:
//! - mp3: 帧级 MP3 字节流解析与填充标签生成
//! - library: 媒体库与固定目标大小的派生
//! - feed: RSS 频道渲染

pub mod feed;
pub mod library;
pub mod mp3;

pub use feed::{render_rss, EpisodeItem, FeedDocument};
pub use library::{derive_target_size, MediaLibrary, Track};
pub use mp3::{Mp3Error, Mp3Track};
