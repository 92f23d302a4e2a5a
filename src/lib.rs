//! Padcast - 固定大小的"假"播客服务
//!
//! 把一首本地音乐伪装成播客单集对外发布，每次请求随机插入一条广告，
//! 同时保证响应体恰好是订阅源里声明的字节数。
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - mp3: 帧级 MP3 解析与 ID3 标签读写
//! - library: 媒体库（音乐 + 广告 + 固定目标大小）
//! - feed: RSS 订阅源渲染
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SpliceEncoder, SpliceCache）
//! - Queries: CQRS 查询处理器（GetFeed, GetEpisode）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 订阅源 / 单集音频 / 首页路由
//! - Media: 启动时装载媒体库
//! - Memory: 拼接结果内存缓存
//! - Adapters: 帧拼接编码器

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
